//! BLS signatures over BN254 for the Hubble rollup
//!
//! Signatures live in G1 and public keys in G2, so that the on-chain verifier
//! can check a whole batch of transfers with one call to the pairing
//! precompile. Messages are hashed to G1 under a 32-byte [`Domain`].

mod domain;
mod error;
mod hash_to_point;
mod keys;
mod signature;
mod wallet;

pub use domain::Domain;
pub use error::BlsError;
pub use hash_to_point::hash_to_point;
pub use keys::PublicKey;
pub use signature::{AggregatedSignature, Signature};
pub use wallet::Wallet;
