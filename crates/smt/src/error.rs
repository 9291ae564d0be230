//! Error types for Merkle tree operations

use thiserror::Error;

/// Boxed error returned by a [`NodeStore`](crate::NodeStore) backend.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while addressing or updating a Merkle tree
#[derive(Debug, Error)]
pub enum SmtError {
    /// Tree depth outside of the supported range
    #[error("invalid tree depth {depth}, expected 1..=32")]
    InvalidDepth {
        /// Requested depth
        depth: u8,
    },

    /// Node is deeper than the tree it was addressed in
    #[error("node depth {depth} exceeds the tree depth {tree_depth}")]
    ExceededTreeDepth {
        /// Depth of the addressed node
        depth: u8,
        /// Depth of the tree
        tree_depth: u8,
    },

    /// The root has no parent or sibling
    #[error("path at depth 0 has no parent or sibling")]
    RootHasNoParent,

    /// Child of a node at the maximum depth
    #[error("cannot have a path deeper than 32")]
    PathTooDeep,

    /// Moving along a level left the range of that level
    #[error("invalid index {index} at depth {depth}")]
    IndexOutOfRange {
        /// Resulting node index
        index: u64,
        /// Depth of the level
        depth: u8,
    },

    /// Bit-string path could not be parsed
    #[error("invalid path bits {0:?}")]
    InvalidPathBits(String),

    /// Byte-encoded path has the wrong length
    #[error("invalid path length {0}, expected 5 bytes")]
    InvalidPathLength(usize),

    /// Dense tree built from no leaves
    #[error("cannot build a merkle tree without leaves")]
    NoLeaves,

    /// Dense tree would exceed the maximum depth
    #[error("merkle tree too large: {0} leaves")]
    TooManyLeaves(usize),

    /// The backing node store failed
    #[error("node store failure: {0}")]
    Store(#[source] StoreError),
}

impl SmtError {
    /// Whether the error comes from sizing a tree wrongly rather than from an
    /// address or the store.
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::NoLeaves | Self::TooManyLeaves(_))
    }
}
