//! Merkle inclusion proofs

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::{path::MerklePath, tree::parent_hash};

/// Inclusion proof of one node
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Position of the proven node
    pub path: MerklePath,
    /// Hash stored at `path`
    pub leaf: B256,
    /// Sibling hashes from the node up to the root
    pub witness: Vec<B256>,
}

impl MerkleProof {
    /// Verify this proof against a root hash
    pub fn verify(&self, root: &B256) -> bool {
        if self.witness.len() != self.path.depth as usize {
            return false;
        }
        self.compute_root() == *root
    }

    /// Compute root from proof
    pub fn compute_root(&self) -> B256 {
        let mut current_path = self.path;
        let mut current_hash = self.leaf;

        for sibling in &self.witness {
            current_hash = parent_hash(&current_path, &current_hash, sibling);
            current_path = MerklePath {
                path: current_path.path >> 1,
                depth: current_path.depth.saturating_sub(1),
            };
        }

        current_hash
    }
}
