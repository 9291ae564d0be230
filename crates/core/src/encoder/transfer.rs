//! Transfer encodings

use hubble_smt::Keccak256Hasher;

use super::{put_decimal, put_u32, read_decimal, read_u32, record, records, AbiWords};
use crate::{
    error::EncodingError,
    tx::{Transfer, TxType},
    types::{Hash, U256},
};

/// Size of a transfer in a commitment
pub const TRANSFER_LENGTH: usize = 12;

/// Hash form: `(txType, fromIndex, toIndex, amount, fee, nonce)`
pub fn encode_transfer(tx: &Transfer) -> Vec<u8> {
    AbiWords::with_capacity(6)
        .small(TxType::Transfer.as_u8())
        .small(tx.from_state_id)
        .small(tx.to_state_id)
        .uint(tx.amount)
        .uint(tx.fee)
        .uint(tx.nonce)
        .finish()
}

/// Signing form: `(txType, fromIndex, toIndex, nonce, amount, fee)`
pub fn encode_transfer_for_signing(tx: &Transfer) -> Vec<u8> {
    AbiWords::with_capacity(6)
        .small(TxType::Transfer.as_u8())
        .small(tx.from_state_id)
        .small(tx.to_state_id)
        .uint(tx.nonce)
        .uint(tx.amount)
        .uint(tx.fee)
        .finish()
}

/// Commitment form: `fromIndex[4] ∥ toIndex[4] ∥ amount[2] ∥ fee[2]`
pub fn encode_transfer_for_commitment(
    tx: &Transfer,
) -> Result<[u8; TRANSFER_LENGTH], EncodingError> {
    let mut encoded = [0u8; TRANSFER_LENGTH];
    put_u32(&mut encoded[0..4], tx.from_state_id);
    put_u32(&mut encoded[4..8], tx.to_state_id);
    put_decimal(&mut encoded[8..10], tx.amount)?;
    put_decimal(&mut encoded[10..12], tx.fee)?;
    Ok(encoded)
}

/// Decode one commitment record. The nonce is not part of it and reads as 0.
pub fn decode_transfer_from_commitment(data: &[u8]) -> Result<Transfer, EncodingError> {
    let data = record::<TRANSFER_LENGTH>(data)?;
    Ok(Transfer {
        from_state_id: read_u32(&data[0..4]),
        to_state_id: read_u32(&data[4..8]),
        amount: read_decimal(&data[8..10]),
        fee: read_decimal(&data[10..12]),
        nonce: U256::ZERO,
    })
}

/// Concatenated commitment records
pub fn serialize_transfers(txs: &[Transfer]) -> Result<Vec<u8>, EncodingError> {
    let mut buf = Vec::with_capacity(txs.len() * TRANSFER_LENGTH);
    for tx in txs {
        buf.extend_from_slice(&encode_transfer_for_commitment(tx)?);
    }
    Ok(buf)
}

/// Split and decode concatenated commitment records
pub fn deserialize_transfers(data: &[u8]) -> Result<Vec<Transfer>, EncodingError> {
    records::<TRANSFER_LENGTH>(data)?.map(decode_transfer_from_commitment).collect()
}

/// Keccak256 of [`encode_transfer`]
pub fn hash_transfer(tx: &Transfer) -> Hash {
    Keccak256Hasher::hash(&encode_transfer(tx))
}
