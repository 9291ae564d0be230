//! Dense in-memory Merkle tree built from a list of leaves

use alloy_primitives::B256;

use crate::{
    error::SmtError,
    hasher::{bounded_zero_hash, Keccak256Hasher},
    path::MerklePath,
    proof::MerkleProof,
    MAX_DEPTH,
};

/// Merkle tree over a known list of leaves, as merklised by the rollup
/// contract for commitment and withdrawal roots.
///
/// Nodes are stored in a flat array: the root, then the two nodes of the
/// first level left to right, and so on down to the leaves.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    nodes: Vec<B256>,
    /// Number of layers, the root layer included
    layers: u8,
}

impl MerkleTree {
    /// Build the tree. Leaves are padded to the next power of two with the
    /// zero hash of height `layers - 1`.
    pub fn new(leaves: &[B256]) -> Result<Self, SmtError> {
        if leaves.is_empty() {
            return Err(SmtError::NoLeaves);
        }
        let layers = required_layers(leaves.len());
        if layers > MAX_DEPTH + 1 {
            return Err(SmtError::TooManyLeaves(leaves.len()));
        }

        let mut nodes = vec![B256::ZERO; (1usize << layers) - 1];
        let leaf_depth = layers - 1;
        let first_leaf = (1usize << leaf_depth) - 1;
        let padding = bounded_zero_hash(leaf_depth);

        for (slot, node) in nodes[first_leaf..].iter_mut().enumerate() {
            *node = leaves.get(slot).copied().unwrap_or(padding);
        }
        for index in (0..first_leaf).rev() {
            nodes[index] = Keccak256Hasher::hash_pair(&nodes[2 * index + 1], &nodes[2 * index + 2]);
        }

        Ok(Self { nodes, layers })
    }

    /// Get the root hash
    pub fn root(&self) -> B256 {
        self.nodes[0]
    }

    /// Depth of the leaves
    pub const fn depth(&self) -> u8 {
        self.layers - 1
    }

    /// Node at `path`, if it is part of this tree
    pub fn node(&self, path: &MerklePath) -> Option<B256> {
        if path.depth >= self.layers {
            return None;
        }
        self.nodes.get(node_index(path)).copied()
    }

    /// Sibling hashes from leaf `index` up to the root.
    pub fn witness(&self, index: u32) -> Result<Vec<B256>, SmtError> {
        let mut path = MerklePath::new(index, self.depth())?;
        let mut witness = Vec::with_capacity(self.depth() as usize);
        while path.depth > 0 {
            witness.push(self.nodes[node_index(&path.sibling()?)]);
            path = path.parent()?;
        }
        Ok(witness)
    }

    /// Inclusion proof of leaf `index`
    pub fn proof(&self, index: u32) -> Result<MerkleProof, SmtError> {
        let path = MerklePath::new(index, self.depth())?;
        Ok(MerkleProof { path, leaf: self.nodes[node_index(&path)], witness: self.witness(index)? })
    }
}

fn required_layers(leaf_count: usize) -> u8 {
    (leaf_count.next_power_of_two().trailing_zeros() + 1) as u8
}

fn node_index(path: &MerklePath) -> usize {
    (1usize << path.depth) + path.path as usize - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zero_hash;

    fn leaf(value: u8) -> B256 {
        Keccak256Hasher::hash(&[value])
    }

    #[test]
    fn test_single_leaf_is_root() {
        let tree = MerkleTree::new(&[leaf(1)]).unwrap();
        assert_eq!(tree.root(), leaf(1));
        assert_eq!(tree.depth(), 0);
        assert!(tree.witness(0).unwrap().is_empty());
    }

    #[test]
    fn test_two_leaves() {
        let tree = MerkleTree::new(&[leaf(1), leaf(2)]).unwrap();
        assert_eq!(tree.root(), Keccak256Hasher::hash_pair(&leaf(1), &leaf(2)));
    }

    #[test]
    fn test_odd_leaves_are_padded() {
        let tree = MerkleTree::new(&[leaf(1), leaf(2), leaf(3)]).unwrap();
        let expected = Keccak256Hasher::hash_pair(
            &Keccak256Hasher::hash_pair(&leaf(1), &leaf(2)),
            &Keccak256Hasher::hash_pair(&leaf(3), &zero_hash(2).unwrap()),
        );
        assert_eq!(tree.root(), expected);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_witness_and_proof() {
        let leaves: Vec<_> = (1..=3).map(leaf).collect();
        let tree = MerkleTree::new(&leaves).unwrap();

        let h12 = Keccak256Hasher::hash_pair(&leaves[0], &leaves[1]);
        assert_eq!(tree.witness(2).unwrap(), vec![zero_hash(2).unwrap(), h12]);

        for index in 0..3 {
            let proof = tree.proof(index).unwrap();
            assert_eq!(proof.leaf, leaves[index as usize]);
            assert!(proof.verify(&tree.root()));
        }
        assert!(tree.proof(4).is_err());
    }

    #[test]
    fn test_node_lookup() {
        let tree = MerkleTree::new(&[leaf(1), leaf(2)]).unwrap();
        assert_eq!(tree.node(&MerklePath::ROOT), Some(tree.root()));
        assert_eq!(tree.node(&MerklePath::new(1, 1).unwrap()), Some(leaf(2)));
        assert_eq!(tree.node(&MerklePath::new(0, 2).unwrap()), None);
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(MerkleTree::new(&[]), Err(SmtError::NoLeaves)));
    }
}
