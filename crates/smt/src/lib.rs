//! Keccak Merkle trees for the Hubble rollup
//!
//! Two flavours share the same hashing and addressing:
//! - [`StoredMerkleTree`]: fixed depth, nodes persisted one by one in a [`NodeStore`],
//!   missing nodes read as zero hashes
//! - [`MerkleTree`]: dense tree built in memory from a list of leaves, used for
//!   commitment and withdrawal roots

mod error;
mod hasher;
mod merkle_tree;
mod path;
mod proof;
mod store;
mod tree;

pub use error::{SmtError, StoreError};
pub use hasher::{zero_hash, Keccak256Hasher, MAX_DEPTH, ZERO_LEAF};
pub use merkle_tree::MerkleTree;
pub use path::MerklePath;
pub use proof::MerkleProof;
pub use store::{MemoryNodeStore, NodeStore};
pub use tree::StoredMerkleTree;
