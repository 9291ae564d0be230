//! Common types

pub use alloy_primitives::{Address, B256, U256};

/// 32-byte hash type
pub type Hash = B256;

/// Index of a leaf in the state tree
pub type StateId = u32;

/// Index of a leaf in the account tree
pub type PubKeyId = u32;

/// Destination spoke of a mass migration
pub type SpokeId = u32;
