//! Signatures in G1, their verification and aggregation

use alloy_primitives::U256;
use ark_bn254::{Bn254, G1Affine, G1Projective, G2Affine};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::{One, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    domain::Domain,
    error::BlsError,
    hash_to_point::hash_to_point,
    keys::{fq_to_u256, u256_to_fq, PublicKey},
};

/// BLS signature: a point of G1 together with the domain it was made under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    point: G1Affine,
    domain: Domain,
}

impl Signature {
    /// Encoded length in bytes
    pub const LEN: usize = 64;

    pub(crate) const fn new(point: G1Affine, domain: Domain) -> Self {
        Self { point, domain }
    }

    /// Domain the signature was produced under
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The underlying curve point
    pub const fn point(&self) -> &G1Affine {
        &self.point
    }

    /// Check `e(sig, -g2) * e(H(m), pk) == 1`.
    pub fn verify(&self, message: &[u8], public_key: &PublicKey) -> Result<bool, BlsError> {
        let hash = hash_to_point(&self.domain, message)?;
        Ok(pairing_check(self.point, [(hash, public_key.0)]))
    }

    /// `[x, y]` as contract words. The point at infinity is `[0, 0]`.
    pub fn to_big_ints(&self) -> [U256; 2] {
        if self.point.infinity {
            return [U256::ZERO; 2];
        }
        [fq_to_u256(self.point.x), fq_to_u256(self.point.y)]
    }

    /// Decode contract words produced under `domain`.
    pub fn from_big_ints(words: &[U256; 2], domain: Domain) -> Result<Self, BlsError> {
        if words.iter().all(U256::is_zero) {
            return Ok(Self::new(G1Affine::identity(), domain));
        }
        let point = G1Affine::new_unchecked(u256_to_fq(&words[0])?, u256_to_fq(&words[1])?);
        if !point.is_on_curve() {
            return Err(BlsError::InvalidPoint);
        }
        Ok(Self::new(point, domain))
    }

    /// 64 big-endian bytes
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let [x, y] = self.to_big_ints();
        let mut bytes = [0u8; Self::LEN];
        bytes[..32].copy_from_slice(&x.to_be_bytes::<32>());
        bytes[32..].copy_from_slice(&y.to_be_bytes::<32>());
        bytes
    }

    /// Inverse of [`Signature::to_bytes`]
    pub fn from_bytes(data: &[u8], domain: Domain) -> Result<Self, BlsError> {
        if data.len() != Self::LEN {
            return Err(BlsError::InvalidSignatureLength(data.len()));
        }
        let words = [U256::from_be_slice(&data[..32]), U256::from_be_slice(&data[32..])];
        Self::from_big_ints(&words, domain)
    }
}

/// Wire form: the 64-byte encoding in hex plus the domain.
#[derive(Serialize, Deserialize)]
struct SignatureRepr {
    signature: String,
    domain: Domain,
}

impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let signature = format!("0x{}", hex::encode(self.to_bytes()));
        SignatureRepr { signature, domain: self.domain }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let repr = SignatureRepr::deserialize(deserializer)?;
        let digits = repr.signature.strip_prefix("0x").unwrap_or(&repr.signature);
        let bytes = hex::decode(digits).map_err(D::Error::custom)?;
        Self::from_bytes(&bytes, repr.domain).map_err(D::Error::custom)
    }
}

/// Sum of signatures that all share one domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedSignature(Signature);

impl AggregatedSignature {
    /// Add up `signatures`. Fails on empty input or when domains differ.
    pub fn new(signatures: &[Signature]) -> Result<Self, BlsError> {
        let first = signatures.first().ok_or(BlsError::EmptyAggregate)?;
        if signatures.iter().any(|signature| signature.domain != first.domain) {
            return Err(BlsError::MixedDomains);
        }

        let sum = signatures
            .iter()
            .fold(G1Projective::zero(), |acc, signature| acc + signature.point);
        debug!(count = signatures.len(), "aggregated signatures");

        Ok(Self(Signature::new(sum.into_affine(), first.domain)))
    }

    /// Verify against one message and public key per aggregated signature, with a
    /// single multi-pairing.
    pub fn verify(&self, messages: &[&[u8]], public_keys: &[PublicKey]) -> Result<bool, BlsError> {
        if messages.len() != public_keys.len() {
            return Err(BlsError::LengthMismatch {
                messages: messages.len(),
                public_keys: public_keys.len(),
            });
        }
        if messages.is_empty() {
            return Err(BlsError::EmptyAggregate);
        }

        let pairs = messages
            .iter()
            .zip(public_keys)
            .map(|(message, public_key)| {
                Ok((hash_to_point(&self.0.domain, message)?, public_key.0))
            })
            .collect::<Result<Vec<_>, BlsError>>()?;
        debug!(count = pairs.len(), "verifying aggregated signature");

        Ok(pairing_check(self.0.point, pairs))
    }

    /// The aggregate as a plain signature
    pub const fn signature(&self) -> &Signature {
        &self.0
    }

    /// See [`Signature::to_big_ints`]
    pub fn to_big_ints(&self) -> [U256; 2] {
        self.0.to_big_ints()
    }
}

/// `e(sig, -g2) * prod e(h_i, pk_i) == 1`
fn pairing_check(
    signature: G1Affine,
    pairs: impl IntoIterator<Item = (G1Affine, G2Affine)>,
) -> bool {
    let (mut g1, mut g2): (Vec<G1Affine>, Vec<G2Affine>) = pairs.into_iter().unzip();
    g1.push(signature);
    g2.push(-G2Affine::generator());
    Bn254::multi_pairing(g1, g2).0.is_one()
}
