//! Fixed-depth Merkle tree persisted node by node

use alloy_primitives::B256;

use crate::{
    error::SmtError,
    hasher::{bounded_zero_hash, Keccak256Hasher},
    path::MerklePath,
    store::NodeStore,
    MAX_DEPTH,
};

/// Sparse Merkle tree of a fixed depth whose nodes live in a [`NodeStore`].
///
/// Nodes that were never written read as the zero hash of their level, so an
/// empty store is a valid empty tree.
#[derive(Clone, Debug)]
pub struct StoredMerkleTree<S> {
    store: S,
    depth: u8,
}

impl<S: NodeStore> StoredMerkleTree<S> {
    /// Create a tree of `depth` levels below the root over `store`.
    pub fn new(store: S, depth: u8) -> Result<Self, SmtError> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(SmtError::InvalidDepth { depth });
        }
        Ok(Self { store, depth })
    }

    /// Depth of the leaves
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Get node hash at `path`, falling back to the zero hash of its level.
    pub fn get(&self, path: &MerklePath) -> Result<B256, SmtError> {
        self.check_depth(path)?;
        Ok(self
            .store
            .get(path)?
            .unwrap_or_else(|| bounded_zero_hash(self.depth - path.depth)))
    }

    /// Get the root hash
    pub fn root(&self) -> Result<B256, SmtError> {
        self.get(&MerklePath::ROOT)
    }

    /// Set the node at `path` and rehash every node on the way to the root.
    ///
    /// Returns the new root and the witness (sibling hashes, bottom-up) that
    /// was used to compute it.
    pub fn set_node(
        &mut self,
        path: MerklePath,
        hash: B256,
    ) -> Result<(B256, Vec<B256>), SmtError> {
        self.check_depth(&path)?;

        let mut current_path = path;
        let mut current_hash = hash;
        let mut witness = Vec::with_capacity(path.depth as usize);

        while current_path.depth > 0 {
            let sibling_hash = self.get(&current_path.sibling()?)?;
            witness.push(sibling_hash);

            self.store.set(current_path, current_hash)?;
            current_hash = parent_hash(&current_path, &current_hash, &sibling_hash);
            current_path = current_path.parent()?;
        }
        self.store.set(MerklePath::ROOT, current_hash)?;

        Ok((current_hash, witness))
    }

    /// Sibling hashes from `path` up to the root.
    pub fn witness(&self, path: &MerklePath) -> Result<Vec<B256>, SmtError> {
        self.check_depth(path)?;
        path.witness_paths()?
            .iter()
            .map(|sibling| self.get(sibling))
            .collect()
    }

    /// Borrow the backing store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give the backing store back
    pub fn into_store(self) -> S {
        self.store
    }

    const fn check_depth(&self, path: &MerklePath) -> Result<(), SmtError> {
        if path.depth > self.depth {
            return Err(SmtError::ExceededTreeDepth { depth: path.depth, tree_depth: self.depth });
        }
        Ok(())
    }
}

pub(crate) fn parent_hash(path: &MerklePath, hash: &B256, sibling: &B256) -> B256 {
    if path.is_left() {
        Keccak256Hasher::hash_pair(hash, sibling)
    } else {
        Keccak256Hasher::hash_pair(sibling, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::MemoryNodeStore, zero_hash, ZERO_LEAF};

    fn tree(depth: u8) -> StoredMerkleTree<MemoryNodeStore> {
        StoredMerkleTree::new(MemoryNodeStore::new(), depth).unwrap()
    }

    #[test]
    fn test_empty_tree() {
        let tree = tree(4);
        assert_eq!(tree.root().unwrap(), zero_hash(4).unwrap());
        assert_eq!(tree.get(&MerklePath::new(3, 4).unwrap()).unwrap(), ZERO_LEAF);
        assert_eq!(tree.get(&MerklePath::new(1, 2).unwrap()).unwrap(), zero_hash(2).unwrap());
    }

    #[test]
    fn test_invalid_depth() {
        assert!(matches!(
            StoredMerkleTree::new(MemoryNodeStore::new(), 0),
            Err(SmtError::InvalidDepth { depth: 0 })
        ));
        assert!(StoredMerkleTree::new(MemoryNodeStore::new(), 33).is_err());
    }

    #[test]
    fn test_set_node_updates_ancestors() {
        let mut tree = tree(2);
        let leaf = B256::repeat_byte(7);
        let (root, witness) = tree.set_node(MerklePath::new(2, 2).unwrap(), leaf).unwrap();

        let right = Keccak256Hasher::hash_pair(&leaf, &ZERO_LEAF);
        let expected = Keccak256Hasher::hash_pair(&zero_hash(1).unwrap(), &right);
        assert_eq!(root, expected);
        assert_eq!(tree.root().unwrap(), expected);
        assert_eq!(tree.get(&MerklePath::new(1, 1).unwrap()).unwrap(), right);
        assert_eq!(witness, vec![ZERO_LEAF, zero_hash(1).unwrap()]);
    }

    #[test]
    fn test_witness_matches_insertion_witness() {
        let mut tree = tree(3);
        for index in 0..5u32 {
            tree.set_node(MerklePath::new(index, 3).unwrap(), B256::with_last_byte(index as u8 + 1))
                .unwrap();
        }
        let path = MerklePath::new(5, 3).unwrap();
        let before = tree.witness(&path).unwrap();
        let (_, witness) = tree.set_node(path, B256::with_last_byte(6)).unwrap();
        assert_eq!(before, witness);
    }

    #[test]
    fn test_rejects_nodes_below_leaves() {
        let mut tree = tree(2);
        let path = MerklePath::new(0, 3).unwrap();
        assert!(matches!(
            tree.get(&path),
            Err(SmtError::ExceededTreeDepth { depth: 3, tree_depth: 2 })
        ));
        assert!(tree.set_node(path, B256::ZERO).is_err());
    }
}
