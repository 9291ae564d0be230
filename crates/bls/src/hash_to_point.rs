//! Message hashing to G1, matching the on-chain `BLS.hashToPoint`
//!
//! `expand_msg_xmd` with Keccak256 stretches the message to 96 bytes, each half
//! is reduced to a base field element and mapped with the Fouque–Tibouchi
//! encoding for BN curves, and the two points are added.

use ark_bn254::{Fq, G1Affine, G1Projective};
use ark_ec::CurveGroup;
use ark_ff::{Field, MontFp, PrimeField, Zero};
use tiny_keccak::{Hasher, Keccak};

use crate::{domain::Domain, error::BlsError};

/// `sqrt(-3) mod p`
const Z0: Fq = MontFp!("4407920970296243842837207485651524041948558517760411303933");

/// `(sqrt(-3) - 1) / 2 mod p`
const Z1: Fq = MontFp!("2203960485148121921418603742825762020974279258880205651966");

/// `(p + 1) / 4`, little-endian limbs
const SQRT_EXPONENT: [u64; 4] = [
    0x4f08_2305_b61f_3f52,
    0x65e0_5aa4_5a1c_72a3,
    0x6e14_116d_a060_5617,
    0x0c19_139c_b84c_680a,
];

const EXPANDED_LEN: usize = 96;

/// Hash `message` under `domain` to a point of G1.
pub fn hash_to_point(domain: &Domain, message: &[u8]) -> Result<G1Affine, BlsError> {
    let [u0, u1] = hash_to_field(domain, message);
    let p0 = map_to_point(u0)?;
    let p1 = map_to_point(u1)?;
    Ok((G1Projective::from(p0) + p1).into_affine())
}

fn hash_to_field(domain: &Domain, message: &[u8]) -> [Fq; 2] {
    let expanded = expand_message(domain, message);
    [
        Fq::from_be_bytes_mod_order(&expanded[..48]),
        Fq::from_be_bytes_mod_order(&expanded[48..]),
    ]
}

/// `expand_message_xmd` from the hash-to-curve draft with Keccak256 as `H`.
fn expand_message(domain: &Domain, message: &[u8]) -> [u8; EXPANDED_LEN] {
    let dst = domain.as_bytes();
    let dst_len = [Domain::LEN as u8];

    let mut hasher = Keccak::v256();
    hasher.update(&[0u8; 64]);
    hasher.update(message);
    hasher.update(&(EXPANDED_LEN as u16).to_be_bytes());
    hasher.update(&[0]);
    hasher.update(dst);
    hasher.update(&dst_len);
    let b0 = finalize(hasher);

    let mut out = [0u8; EXPANDED_LEN];
    let mut previous = [0u8; 32];
    for (i, chunk) in out.chunks_exact_mut(32).enumerate() {
        let mut input = b0;
        if i > 0 {
            input.iter_mut().zip(previous).for_each(|(byte, prev)| *byte ^= prev);
        }
        let mut hasher = Keccak::v256();
        hasher.update(&input);
        hasher.update(&[i as u8 + 1]);
        hasher.update(dst);
        hasher.update(&dst_len);
        previous = finalize(hasher);
        chunk.copy_from_slice(&previous);
    }
    out
}

fn finalize(hasher: Keccak) -> [u8; 32] {
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Fouque–Tibouchi map of a field element onto `y^2 = x^3 + 3`.
fn map_to_point(u: Fq) -> Result<G1Affine, BlsError> {
    let (_, decision) = sqrt(u);

    let a0 = u.square() + Fq::from(4u64);
    let a1 = u * Z0;
    let a2 = (a1 * a0).inverse().unwrap_or_else(Fq::zero);
    let w = a1.square() * a2;

    let x1 = Z1 - u * w;
    let x2 = -(x1 + Fq::ONE);
    let x3 = a0.square().square() * a2.square() + Fq::ONE;

    for x in [x1, x2, x3] {
        let (y, found) = sqrt(x * x.square() + Fq::from(3u64));
        if found {
            let y = if decision { y } else { -y };
            return Ok(G1Affine::new_unchecked(x, y));
        }
    }
    Err(BlsError::HashToPoint)
}

/// Candidate square root `a^((p + 1) / 4)` and whether it squares back to `a`.
fn sqrt(a: Fq) -> (Fq, bool) {
    let root = a.pow(SQRT_EXPONENT);
    (root, root.square() == a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Domain {
        Domain::new([0xa5; 32])
    }

    #[test]
    fn test_constants() {
        assert_eq!(Z0.square(), -Fq::from(3u64));
        assert_eq!(Z1 + Z1 + Fq::ONE, Z0);
    }

    #[test]
    fn test_sqrt() {
        let (root, found) = sqrt(Fq::from(16u64));
        assert!(found);
        assert_eq!(root.square(), Fq::from(16u64));
        assert!(sqrt(Fq::zero()).1);
        for value in [2u64, 3, 1 << 33, u64::MAX] {
            let square = Fq::from(value).square();
            let (root, found) = sqrt(square);
            assert!(found);
            assert!(root == Fq::from(value) || root == -Fq::from(value));
        }
        // -1 is not a square since p = 3 mod 4
        assert!(!sqrt(-Fq::ONE).1);
    }

    #[test]
    fn test_map_to_point_is_on_curve() {
        for value in [0u64, 1, 2, 3, 4, 5, 42, 1 << 40] {
            let point = map_to_point(Fq::from(value)).unwrap();
            assert!(point.is_on_curve());
        }
        let point = map_to_point(-Fq::from(7u64)).unwrap();
        assert!(point.is_on_curve());
    }

    #[test]
    fn test_expand_message_length_and_blocks() {
        let expanded = expand_message(&domain(), b"deadbeef");
        assert_eq!(expanded.len(), 96);
        assert_ne!(expanded[..32], expanded[32..64]);
        assert_ne!(expanded[32..64], expanded[64..]);
    }

    #[test]
    fn test_hash_to_point_deterministic() {
        let first = hash_to_point(&domain(), &[0xde, 0xad, 0xbe, 0xef]).unwrap();
        let second = hash_to_point(&domain(), &[0xde, 0xad, 0xbe, 0xef]).unwrap();
        assert_eq!(first, second);
        assert!(first.is_on_curve());
        assert!(first.is_in_correct_subgroup_assuming_on_curve());
    }

    #[test]
    fn test_hash_to_point_separates_domains_and_messages() {
        let base = hash_to_point(&domain(), b"message").unwrap();
        assert_ne!(base, hash_to_point(&Domain::default(), b"message").unwrap());
        assert_ne!(base, hash_to_point(&domain(), b"messagf").unwrap());
        assert_ne!(base, hash_to_point(&domain(), b"").unwrap());
    }
}
