//! BLS public keys in G2 and the big-endian word codec they share with signatures

use std::fmt;

use alloy_primitives::U256;
use ark_bn254::{Fq, Fq2, G2Affine};
use ark_ff::{BigInt, PrimeField};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BlsError;

/// Public key: a point of G2.
///
/// Encoded as the four base field words `[x.c0, x.c1, y.c0, y.c1]`, the
/// `uint256[4]` the rollup contracts take. `BLS.sol` swaps each pair into the
/// imaginary-first order of the pairing precompile itself.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub(crate) G2Affine);

impl PublicKey {
    /// Encoded length in bytes
    pub const LEN: usize = 128;

    /// The underlying curve point
    pub const fn point(&self) -> &G2Affine {
        &self.0
    }

    /// `[x.c0, x.c1, y.c0, y.c1]` as contract words
    pub fn to_big_ints(&self) -> [U256; 4] {
        let G2Affine { x, y, .. } = self.0;
        [x.c0, x.c1, y.c0, y.c1].map(fq_to_u256)
    }

    /// Decode contract words, checking the point is a valid non-zero G2 element.
    pub fn from_big_ints(words: &[U256; 4]) -> Result<Self, BlsError> {
        let [x0, x1, y0, y1] = words.each_ref().map(u256_to_fq);
        let x = Fq2::new(x0?, x1?);
        let y = Fq2::new(y0?, y1?);

        let point = G2Affine::new_unchecked(x, y);
        if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(BlsError::InvalidPoint);
        }
        Ok(Self(point))
    }

    /// 128 big-endian bytes
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        for (chunk, word) in bytes.chunks_exact_mut(32).zip(self.to_big_ints()) {
            chunk.copy_from_slice(&word.to_be_bytes::<32>());
        }
        bytes
    }

    /// Inverse of [`PublicKey::to_bytes`]
    pub fn from_bytes(data: &[u8]) -> Result<Self, BlsError> {
        if data.len() != Self::LEN {
            return Err(BlsError::InvalidPublicKeyLength(data.len()));
        }
        let mut words = [U256::ZERO; 4];
        for (word, chunk) in words.iter_mut().zip(data.chunks_exact(32)) {
            *word = U256::from_be_slice(chunk);
        }
        Self::from_big_ints(&words)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(0x{})", hex::encode(self.to_bytes()))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.to_bytes())))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

pub(crate) fn fq_to_u256(value: Fq) -> U256 {
    U256::from_limbs(value.into_bigint().0)
}

/// Rejects values that are not below the field modulus.
pub(crate) fn u256_to_fq(value: &U256) -> Result<Fq, BlsError> {
    Fq::from_bigint(BigInt::new(*value.as_limbs())).ok_or(BlsError::InvalidPoint)
}

#[cfg(test)]
mod tests {
    use ark_ec::AffineRepr;

    use super::*;

    fn generator() -> PublicKey {
        PublicKey(G2Affine::generator())
    }

    fn words(decimals: [&str; 4]) -> [U256; 4] {
        decimals.map(|word| word.parse::<U256>().unwrap())
    }

    #[test]
    fn test_generator_words() {
        let expected = words([
            "10857046999023057135944570762232829481370756359578518086990519993285655852781",
            "11559732032986387107991004021392285783925812861821192530917403151452391805634",
            "8495653923123431417604973247489272438418190587263600148770280649306958101930",
            "4082367875863433681332203403145435568316851327593401208105741076214120093531",
        ]);
        assert_eq!(generator().to_big_ints(), expected);
        assert_eq!(PublicKey::from_big_ints(&expected).unwrap(), generator());
        assert_eq!(&generator().to_bytes()[..32], &expected[0].to_be_bytes::<32>());
    }

    #[test]
    fn test_rejects_precompile_word_order() {
        let [x0, x1, y0, y1] = generator().to_big_ints();
        assert_eq!(PublicKey::from_big_ints(&[x1, x0, y1, y0]), Err(BlsError::InvalidPoint));
    }

    #[test]
    fn test_bytes_round_trip() {
        let bytes = generator().to_bytes();
        assert_eq!(PublicKey::from_bytes(&bytes).unwrap(), generator());
        assert_eq!(
            PublicKey::from_bytes(&bytes[..96]),
            Err(BlsError::InvalidPublicKeyLength(96))
        );
    }

    #[test]
    fn test_rejects_invalid_points() {
        let mut words = generator().to_big_ints();
        words[3] += U256::from(1u8);
        assert_eq!(PublicKey::from_big_ints(&words), Err(BlsError::InvalidPoint));

        assert_eq!(PublicKey::from_big_ints(&[U256::ZERO; 4]), Err(BlsError::InvalidPoint));
        assert_eq!(PublicKey::from_big_ints(&[U256::MAX; 4]), Err(BlsError::InvalidPoint));
    }

    #[test]
    fn test_field_word_conversion() {
        let value = Fq::from(123_456_789u64);
        assert_eq!(fq_to_u256(value), U256::from(123_456_789u64));
        assert_eq!(u256_to_fq(&U256::from(123_456_789u64)).unwrap(), value);
        assert!(u256_to_fq(&U256::MAX).is_err());
    }

    #[test]
    fn test_serde_hex() {
        let json = serde_json::to_string(&generator()).unwrap();
        assert!(json.starts_with("\"0x"));
        assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), generator());
    }
}
