//! Error types for encoding and the account tree

use hubble_bls::BlsError;
use hubble_smt::SmtError;
use thiserror::Error;

/// Errors raised while encoding or decoding transactions and batches
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Value has more than 12 bits of mantissa after stripping 15 decimal zeros
    #[error("value is not encodable as multi-precision decimal")]
    NotEncodable,

    /// Input is not a whole number of fixed-size records
    #[error("invalid data length {length}, expected a multiple of {record}")]
    InvalidDataLength {
        /// Input length in bytes
        length: usize,
        /// Record size in bytes
        record: usize,
    },

    /// Parallel slices of different lengths
    #[error("invalid slices length: {left} != {right}")]
    InvalidSlicesLength {
        /// Length of the first slice
        left: usize,
        /// Length of the second slice
        right: usize,
    },

    /// Create2Transfer encoded by public key without one
    #[error("create2transfer has no recipient public key")]
    MissingRecipientPublicKey,

    /// Create2Transfer encoded by state index without one
    #[error("create2transfer has no recipient state id")]
    MissingRecipientStateId,

    /// Nonce too large for the 4-byte signing field
    #[error("nonce does not fit in 4 bytes")]
    NonceOverflow,

    /// Batch type byte with no known meaning
    #[error("unknown batch type {0}")]
    UnknownBatchType(u8),

    /// Transaction type byte with no known meaning
    #[error("unknown transaction type {0}")]
    UnknownTxType(u8),

    /// Signature or public key failure
    #[error(transparent)]
    Bls(#[from] BlsError),
}

impl EncodingError {
    /// Whether the error breaks an encoding invariant instead of rejecting
    /// malformed input. Retrying with the same value never helps.
    pub const fn is_invariant_violation(&self) -> bool {
        match self {
            Self::NotEncodable => true,
            Self::Bls(err) => err.is_invariant_violation(),
            _ => false,
        }
    }
}

/// Errors raised by the account tree
#[derive(Debug, Error)]
pub enum AccountTreeError {
    /// Depth outside of `2..=32`
    #[error("invalid account tree depth {0}, expected 2..=32")]
    InvalidDepth(u8),

    /// Every leaf of the tree is taken
    #[error("account tree is full ({capacity} leaves)")]
    TreeFull {
        /// Number of leaves of the tree
        capacity: u64,
    },

    /// Merkle tree or node store failure
    #[error(transparent)]
    Smt(#[from] SmtError),
}

impl AccountTreeError {
    /// A full tree cannot be recovered from, it has to be redeployed deeper.
    pub const fn is_invariant_violation(&self) -> bool {
        match self {
            Self::TreeFull { .. } => true,
            Self::Smt(err) => err.is_invariant_violation(),
            Self::InvalidDepth(_) => false,
        }
    }
}
