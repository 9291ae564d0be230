//! Error types for BLS keys, signatures and aggregation

use thiserror::Error;

/// Errors returned by the BLS wallet and signature types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlsError {
    /// Domain built from a slice that is not 32 bytes long
    #[error("invalid domain length {0}, expected 32 bytes")]
    InvalidDomainLength(usize),

    /// Domain string is not valid hex
    #[error("invalid domain hex: {0}")]
    InvalidDomainHex(String),

    /// Secret key bytes are not a non-zero canonical scalar
    #[error("invalid secret key")]
    InvalidSecretKey,

    /// Public key bytes of the wrong length
    #[error("invalid public key length {0}, expected 128 bytes")]
    InvalidPublicKeyLength(usize),

    /// Signature bytes of the wrong length
    #[error("invalid signature length {0}, expected 64 bytes")]
    InvalidSignatureLength(usize),

    /// Coordinates that are not a point of the expected group
    #[error("invalid curve point")]
    InvalidPoint,

    /// Aggregation or aggregate verification over nothing
    #[error("cannot aggregate an empty set of signatures")]
    EmptyAggregate,

    /// Aggregated signatures produced under different domains
    #[error("cannot aggregate signatures from different domains")]
    MixedDomains,

    /// Messages and public keys of different counts
    #[error("got {messages} messages and {public_keys} public keys")]
    LengthMismatch {
        /// Number of messages
        messages: usize,
        /// Number of public keys
        public_keys: usize,
    },

    /// The map to G1 found no point for a field element
    #[error("hash to point found no curve point")]
    HashToPoint,
}

impl BlsError {
    /// Errors raised by misuse of the aggregation API rather than by bad input
    /// bytes. These are never worth retrying.
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::EmptyAggregate | Self::MixedDomains | Self::HashToPoint)
    }
}
