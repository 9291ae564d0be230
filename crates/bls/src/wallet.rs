//! Signing wallet

use std::fmt;

use ark_bn254::{Fr, G1Projective, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInt, PrimeField, UniformRand, Zero};

use crate::{
    domain::Domain,
    error::BlsError,
    hash_to_point::hash_to_point,
    keys::PublicKey,
    signature::Signature,
};

/// Secret scalar plus the public key and domain derived from it.
///
/// Every signature it makes carries its domain.
#[derive(Clone)]
pub struct Wallet {
    secret: Fr,
    public_key: PublicKey,
    domain: Domain,
}

impl Wallet {
    /// Wallet with a fresh random secret
    pub fn new_random(domain: Domain) -> Self {
        let mut rng = rand::thread_rng();
        let secret = loop {
            let candidate = Fr::rand(&mut rng);
            if !candidate.is_zero() {
                break candidate;
            }
        };
        Self::from_scalar(secret, domain)
    }

    /// Recover a wallet from a 32-byte big-endian secret.
    ///
    /// The secret must be non-zero and below the group order.
    pub fn from_secret(secret: &[u8], domain: Domain) -> Result<Self, BlsError> {
        let bytes: [u8; 32] = secret.try_into().map_err(|_| BlsError::InvalidSecretKey)?;
        let mut limbs = [0u64; 4];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_be_bytes(word);
        }
        let secret = Fr::from_bigint(BigInt::new(limbs))
            .filter(|scalar| !scalar.is_zero())
            .ok_or(BlsError::InvalidSecretKey)?;
        Ok(Self::from_scalar(secret, domain))
    }

    fn from_scalar(secret: Fr, domain: Domain) -> Self {
        let public_key = PublicKey((G2Affine::generator() * secret).into_affine());
        Self { secret, public_key, domain }
    }

    /// Sign `message` under this wallet's domain.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, BlsError> {
        let hash = hash_to_point(&self.domain, message)?;
        let point = (G1Projective::from(hash) * self.secret).into_affine();
        Ok(Signature::new(point, self.domain))
    }

    /// Public key
    pub const fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Domain every signature is bound to
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Secret as 32 big-endian bytes, accepted back by [`Wallet::from_secret`].
    pub fn secret_bytes(&self) -> [u8; 32] {
        let limbs = self.secret.into_bigint().0;
        let mut bytes = [0u8; 32];
        for (chunk, limb) in bytes.rchunks_exact_mut(8).zip(limbs) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("public_key", &self.public_key)
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
