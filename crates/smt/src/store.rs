//! Backing storage for tree nodes

use std::collections::HashMap;

use alloy_primitives::B256;

use crate::{error::SmtError, path::MerklePath};

/// Key-value storage of node hashes keyed by [`MerklePath`].
///
/// A missing node is `Ok(None)`; `Err` is reserved for backend failures.
pub trait NodeStore {
    /// Look up a node hash
    fn get(&self, path: &MerklePath) -> Result<Option<B256>, SmtError>;

    /// Insert or overwrite a node hash
    fn set(&mut self, path: MerklePath, hash: B256) -> Result<(), SmtError>;
}

impl<S: NodeStore + ?Sized> NodeStore for &mut S {
    fn get(&self, path: &MerklePath) -> Result<Option<B256>, SmtError> {
        (**self).get(path)
    }

    fn set(&mut self, path: MerklePath, hash: B256) -> Result<(), SmtError> {
        (**self).set(path, hash)
    }
}

/// In-memory node store
#[derive(Clone, Debug, Default)]
pub struct MemoryNodeStore {
    nodes: HashMap<MerklePath, B256>,
}

impl MemoryNodeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been stored yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl NodeStore for MemoryNodeStore {
    fn get(&self, path: &MerklePath) -> Result<Option<B256>, SmtError> {
        Ok(self.nodes.get(path).copied())
    }

    fn set(&mut self, path: MerklePath, hash: B256) -> Result<(), SmtError> {
        self.nodes.insert(path, hash);
        Ok(())
    }
}
