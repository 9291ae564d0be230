//! Keccak256 hashing shared by every tree in the rollup

use std::sync::OnceLock;

use alloy_primitives::{b256, B256};
use tiny_keccak::{Hasher, Keccak};

/// Deepest tree supported by [`MerklePath`](crate::MerklePath) addressing.
pub const MAX_DEPTH: u8 = 32;

/// `keccak256(abi.encode(uint256(0)))`, the hash of an empty leaf.
pub const ZERO_LEAF: B256 =
    b256!("290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563");

/// Keccak256 hasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl Keccak256Hasher {
    /// Hash two 32-byte values together.
    ///
    /// This is the parent-node function of every on-chain Merkle verifier, so the
    /// operand order (`left ∥ right`) is part of the contract.
    pub fn hash_pair(left: &B256, right: &B256) -> B256 {
        let mut hasher = Keccak::v256();
        hasher.update(left.as_slice());
        hasher.update(right.as_slice());
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        B256::from(output)
    }

    /// Hash a single value
    pub fn hash(data: &[u8]) -> B256 {
        let mut hasher = Keccak::v256();
        hasher.update(data);
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        B256::from(output)
    }
}

fn zero_hashes() -> &'static [B256; MAX_DEPTH as usize + 1] {
    static ZERO_HASHES: OnceLock<[B256; MAX_DEPTH as usize + 1]> = OnceLock::new();
    ZERO_HASHES.get_or_init(|| {
        let mut hashes = [ZERO_LEAF; MAX_DEPTH as usize + 1];
        for level in 1..hashes.len() {
            hashes[level] = Keccak256Hasher::hash_pair(&hashes[level - 1], &hashes[level - 1]);
        }
        hashes
    })
}

/// Root of an empty subtree that is `level` layers tall (`0` is a single empty leaf).
///
/// Returns `None` above [`MAX_DEPTH`].
pub fn zero_hash(level: u8) -> Option<B256> {
    zero_hashes().get(level as usize).copied()
}

/// Same as [`zero_hash`] for levels already bounded by a tree depth.
pub(crate) fn bounded_zero_hash(level: u8) -> B256 {
    zero_hashes()[level.min(MAX_DEPTH) as usize]
}
