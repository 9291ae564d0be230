//! Append-only account registry tree
//!
//! Mirrors the on-chain `AccountTree`: public key hashes are appended left to
//! right, and the roots of completed left subtrees are cached so the root can be
//! rebuilt from `depth` hashes instead of the whole tree.

use hubble_bls::PublicKey;
use hubble_smt::{
    zero_hash, Keccak256Hasher, MerklePath, NodeStore, StoredMerkleTree, MAX_DEPTH, ZERO_LEAF,
};
use tracing::{debug, trace};

use crate::{
    error::AccountTreeError,
    types::{Hash, PubKeyId},
};

/// Smallest supported account tree depth
pub const MIN_DEPTH: u8 = 2;

/// Account tree over an injected node store
#[derive(Debug)]
pub struct AccountTree<S> {
    tree: StoredMerkleTree<S>,
    cursor: u64,
    /// `subtrees[k]` is the root of the last completed left subtree of height `k`
    subtrees: Vec<Hash>,
}

impl<S: NodeStore> AccountTree<S> {
    /// Create an empty tree of `depth` levels over `store`. The store must be
    /// empty.
    pub fn new(store: S, depth: u8) -> Result<Self, AccountTreeError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(AccountTreeError::InvalidDepth(depth));
        }
        let tree = StoredMerkleTree::new(store, depth)?;
        let subtrees = (0..depth).map(|level| zero_hash(level).unwrap_or(ZERO_LEAF)).collect();
        debug!(depth, "created account tree");
        Ok(Self { tree, cursor: 0, subtrees })
    }

    /// Depth of the leaves
    pub const fn depth(&self) -> u8 {
        self.tree.depth()
    }

    /// Number of inserted leaves
    pub const fn leaf_count(&self) -> u64 {
        self.cursor
    }

    /// Number of leaves the tree can hold
    pub const fn capacity(&self) -> u64 {
        1 << self.tree.depth()
    }

    /// Cached subtree roots, indexed by height
    pub fn subtrees(&self) -> &[Hash] {
        &self.subtrees
    }

    /// Append `leaf` and return its index.
    pub fn insert(&mut self, leaf: Hash) -> Result<PubKeyId, AccountTreeError> {
        if self.cursor == self.capacity() {
            return Err(AccountTreeError::TreeFull { capacity: self.capacity() });
        }
        let depth = self.depth();
        let index = self.cursor as PubKeyId;

        let leaf_path = MerklePath::new(index, depth)?;
        self.tree.set_node(leaf_path, leaf)?;

        // climb to the first ancestor that is a left child, that subtree is now complete
        let mut path = leaf_path;
        while path.depth > 0 && path.is_right() {
            path = path.parent()?;
        }
        if path.depth > 0 {
            let height = depth - path.depth;
            self.subtrees[height as usize] = self.tree.get(&path)?;
            trace!(index, height, "completed left subtree");
        } else {
            trace!(index, "filled account tree");
        }

        self.cursor += 1;
        Ok(index)
    }

    /// Append `keccak256(public_key)`, as `BLSAccountRegistry.register` does.
    pub fn register_account(
        &mut self,
        public_key: &PublicKey,
    ) -> Result<PubKeyId, AccountTreeError> {
        let index = self.insert(Keccak256Hasher::hash(&public_key.to_bytes()))?;
        debug!(pub_key_id = index, "registered account");
        Ok(index)
    }

    /// Node at `path`, or the zero hash of its level
    pub fn get(&self, path: &MerklePath) -> Result<Hash, AccountTreeError> {
        Ok(self.tree.get(path)?)
    }

    /// Root of the whole tree
    pub fn root(&self) -> Result<Hash, AccountTreeError> {
        Ok(self.tree.root()?)
    }

    /// Root of the left half, where accounts are registered one by one
    pub fn left_root(&self) -> Result<Hash, AccountTreeError> {
        self.get(&MerklePath { path: 0, depth: 1 })
    }

    /// Rebuild the root from the cached subtrees and the leaf count alone.
    pub fn root_from_subtrees(&self) -> Result<Hash, AccountTreeError> {
        if self.cursor == self.capacity() {
            // no slot is open, the last insert completed the root itself
            return self.root();
        }
        let mut node = ZERO_LEAF;
        for height in 0..self.depth() {
            node = if (self.cursor >> height) & 1 == 1 {
                Keccak256Hasher::hash_pair(&self.subtrees[height as usize], &node)
            } else {
                Keccak256Hasher::hash_pair(&node, &zero_hash(height).unwrap_or(ZERO_LEAF))
            };
        }
        Ok(node)
    }

    /// Give the backing store back
    pub fn into_store(self) -> S {
        self.tree.into_store()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;
    use hubble_bls::{Domain, Wallet};
    use hubble_smt::{MemoryNodeStore, SmtError, StoreError};

    use super::*;

    fn leaf(index: u64) -> Hash {
        Keccak256Hasher::hash(&index.to_be_bytes())
    }

    /// Root computed by hashing every level of a fully materialised tree
    fn brute_force_root(leaves: &[Hash], depth: u8) -> Hash {
        let mut level: Vec<Hash> = (0..1usize << depth)
            .map(|i| leaves.get(i).copied().unwrap_or(ZERO_LEAF))
            .collect();
        while level.len() > 1 {
            level = level
                .chunks_exact(2)
                .map(|pair| Keccak256Hasher::hash_pair(&pair[0], &pair[1]))
                .collect();
        }
        level[0]
    }

    #[test]
    fn test_empty_tree() {
        let tree = AccountTree::new(MemoryNodeStore::new(), 4).unwrap();
        assert_eq!(tree.root().unwrap(), zero_hash(4).unwrap());
        assert_eq!(tree.root_from_subtrees().unwrap(), zero_hash(4).unwrap());
        assert_eq!(tree.left_root().unwrap(), zero_hash(3).unwrap());
        assert_eq!(tree.subtrees().len(), 4);
    }

    #[test]
    fn test_invalid_depth() {
        for depth in [0, 1, 33] {
            assert!(matches!(
                AccountTree::new(MemoryNodeStore::new(), depth),
                Err(AccountTreeError::InvalidDepth(d)) if d == depth
            ));
        }
    }

    #[test]
    fn test_incremental_roots_match_brute_force() {
        let depth = 3;
        let mut tree = AccountTree::new(MemoryNodeStore::new(), depth).unwrap();
        let mut leaves = Vec::new();

        for i in 0..8u64 {
            let index = tree.insert(leaf(i)).unwrap();
            assert_eq!(u64::from(index), i);
            leaves.push(leaf(i));

            let expected = brute_force_root(&leaves, depth);
            assert_eq!(tree.root().unwrap(), expected, "stored root after {} leaves", i + 1);
            assert_eq!(
                tree.root_from_subtrees().unwrap(),
                expected,
                "rebuilt root after {} leaves",
                i + 1
            );
        }
        assert_eq!(tree.leaf_count(), 8);
    }

    #[test]
    fn test_subtree_cache() {
        let mut tree = AccountTree::new(MemoryNodeStore::new(), 3).unwrap();
        tree.insert(leaf(0)).unwrap();
        assert_eq!(tree.subtrees()[0], leaf(0));

        tree.insert(leaf(1)).unwrap();
        assert_eq!(tree.subtrees()[1], Keccak256Hasher::hash_pair(&leaf(0), &leaf(1)));

        tree.insert(leaf(2)).unwrap();
        tree.insert(leaf(3)).unwrap();
        assert_eq!(tree.subtrees()[2], tree.left_root().unwrap());
    }

    #[test]
    fn test_tree_full() {
        let mut tree = AccountTree::new(MemoryNodeStore::new(), 2).unwrap();
        for i in 0..4 {
            tree.insert(leaf(i)).unwrap();
        }
        let root = tree.root().unwrap();

        let err = tree.insert(leaf(4)).unwrap_err();
        assert!(matches!(err, AccountTreeError::TreeFull { capacity: 4 }));
        assert!(err.is_invariant_violation());
        assert_eq!(tree.root().unwrap(), root);
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn test_register_account() {
        let wallet = Wallet::new_random(Domain::default());
        let mut tree = AccountTree::new(MemoryNodeStore::new(), 4).unwrap();
        tree.insert(leaf(0)).unwrap();

        let pub_key_id = tree.register_account(&wallet.public_key()).unwrap();
        assert_eq!(pub_key_id, 1);
        assert_eq!(
            tree.get(&MerklePath::new(1, 4).unwrap()).unwrap(),
            Keccak256Hasher::hash(&wallet.public_key().to_bytes())
        );
    }

    #[test]
    fn test_register_account_leaf_matches_registry() {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let generator = Wallet::from_secret(&secret, Domain::default()).unwrap();

        let mut tree = AccountTree::new(MemoryNodeStore::new(), 2).unwrap();
        tree.register_account(&generator.public_key()).unwrap();
        assert_eq!(
            tree.get(&MerklePath::new(0, 2).unwrap()).unwrap(),
            b256!("063e8fa59393758ba795167c214192cf7ca7f7921ac656b483748033d4a87b01")
        );
    }

    #[derive(Debug)]
    struct FailingStore;

    impl NodeStore for FailingStore {
        fn get(&self, _path: &MerklePath) -> Result<Option<Hash>, SmtError> {
            Err(SmtError::Store(StoreError::from("disk unavailable")))
        }

        fn set(&mut self, _path: MerklePath, _hash: Hash) -> Result<(), SmtError> {
            Err(SmtError::Store(StoreError::from("disk unavailable")))
        }
    }

    #[test]
    fn test_store_failure_is_returned() {
        let mut tree = AccountTree::new(FailingStore, 3).unwrap();
        let err = tree.insert(leaf(0)).unwrap_err();
        assert!(matches!(err, AccountTreeError::Smt(SmtError::Store(_))));
        assert!(!err.is_invariant_violation());
        assert_eq!(tree.leaf_count(), 0);
    }
}
