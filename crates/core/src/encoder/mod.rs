//! Byte encodings of transactions
//!
//! Every transaction type has:
//! - a hash form, the ABI tuple hashed into the transaction hash
//! - a signing form, the exact message signed with BLS
//! - a commitment form, the compact record posted on chain

mod create2transfer;
mod mass_migration;
mod transfer;

pub use create2transfer::*;
pub use mass_migration::*;
pub use transfer::*;

use alloy_primitives::U256;
use hubble_bls::PublicKey;
use hubble_smt::Keccak256Hasher;

use crate::{
    decimal::{decode_decimal, encode_decimal},
    error::EncodingError,
    types::Hash,
};

/// Builder of ABI-encoded tuples of static 32-byte words
#[derive(Debug, Default)]
pub(crate) struct AbiWords(Vec<u8>);

impl AbiWords {
    pub(crate) fn with_capacity(words: usize) -> Self {
        Self(Vec::with_capacity(words * 32))
    }

    /// `uint256`
    pub(crate) fn uint(mut self, value: U256) -> Self {
        self.0.extend_from_slice(&value.to_be_bytes::<32>());
        self
    }

    /// Small integer widened to `uint256`
    pub(crate) fn small(self, value: impl Into<u64>) -> Self {
        self.uint(U256::from(value.into()))
    }

    /// `bytes32`
    pub(crate) fn bytes32(mut self, value: &Hash) -> Self {
        self.0.extend_from_slice(value.as_slice());
        self
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.0
    }
}

/// Keccak of the 128-byte public key encoding
pub(crate) fn public_key_hash(public_key: &PublicKey) -> Hash {
    Keccak256Hasher::hash(&public_key.to_bytes())
}

pub(crate) fn put_u32(buf: &mut [u8], value: u32) {
    buf[..4].copy_from_slice(&value.to_be_bytes());
}

pub(crate) fn read_u32(buf: &[u8]) -> u32 {
    u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]])
}

pub(crate) fn put_decimal(buf: &mut [u8], value: U256) -> Result<(), EncodingError> {
    buf[..2].copy_from_slice(&encode_decimal(value)?.to_be_bytes());
    Ok(())
}

pub(crate) fn read_decimal(buf: &[u8]) -> U256 {
    decode_decimal(u16::from_be_bytes([buf[0], buf[1]]))
}

/// Split `data` into records of `N` bytes, rejecting a trailing partial record.
pub(crate) fn records<const N: usize>(
    data: &[u8],
) -> Result<impl Iterator<Item = &[u8]>, EncodingError> {
    if data.len() % N != 0 {
        return Err(EncodingError::InvalidDataLength { length: data.len(), record: N });
    }
    Ok(data.chunks_exact(N))
}

/// Check that `data` is exactly one record of `N` bytes.
pub(crate) fn record<const N: usize>(data: &[u8]) -> Result<&[u8], EncodingError> {
    if data.len() != N {
        return Err(EncodingError::InvalidDataLength { length: data.len(), record: N });
    }
    Ok(data)
}
