//! Off-chain commitment layer of the Hubble rollup
//!
//! Everything here has an on-chain counterpart that must compute the same bytes:
//! - [`decimal`]: 16-bit lossy encoding of amounts and fees
//! - [`encoder`]: hash, signing and commitment forms of every transaction type
//! - [`commitment`]: commitment body and leaf hashes, commitment roots
//! - [`batch`]: packed batch meta word
//! - [`account_tree`]: append-only registry of BLS public keys
//!
//! Signatures come from [`hubble_bls`] and Merkle primitives from [`hubble_smt`].

pub mod account_tree;
pub mod batch;
pub mod commitment;
pub mod config;
pub mod decimal;
pub mod encoder;
mod error;
pub mod tx;
pub mod types;

pub use account_tree::AccountTree;
pub use batch::{BatchMeta, BatchType};
pub use commitment::{
    commitment_proof, commitment_root, Commitment, MassMigrationCommitment, MassMigrationMeta,
};
pub use config::Config;
pub use decimal::{decode_decimal, encode_decimal};
pub use error::{AccountTreeError, EncodingError};
pub use tx::{Create2Transfer, MassMigration, Transfer, TxType};
pub use types::{Address, Hash, PubKeyId, SpokeId, StateId, B256, U256};

pub use hubble_bls as bls;
pub use hubble_smt as smt;
