//! Create2Transfer encodings
//!
//! The recipient is addressed either by public key (hash and signing forms)
//! or by its new state index plus the public key's account tree index
//! (state id hash form and commitment form). Callers pick the form; missing
//! recipient data is an error.

use hubble_bls::PublicKey;
use hubble_smt::Keccak256Hasher;

use super::{
    public_key_hash, put_decimal, put_u32, read_decimal, read_u32, record, records, AbiWords,
};
use crate::{
    error::EncodingError,
    tx::{Create2Transfer, TxType},
    types::{Hash, PubKeyId, StateId, U256},
};

/// Size of a create2transfer in a commitment
pub const CREATE2TRANSFER_LENGTH: usize = 16;

fn recipient_public_key(tx: &Create2Transfer) -> Result<&PublicKey, EncodingError> {
    tx.to_public_key.as_ref().ok_or(EncodingError::MissingRecipientPublicKey)
}

fn recipient_state_id(tx: &Create2Transfer) -> Result<StateId, EncodingError> {
    tx.to_state_id.ok_or(EncodingError::MissingRecipientStateId)
}

/// Hash form: `(txType, fromIndex, keccak(toPubkey), amount, fee, nonce)`
pub fn encode_create2transfer(tx: &Create2Transfer) -> Result<Vec<u8>, EncodingError> {
    let to_public_key = recipient_public_key(tx)?;
    Ok(AbiWords::with_capacity(6)
        .small(TxType::Create2Transfer.as_u8())
        .small(tx.from_state_id)
        .bytes32(&public_key_hash(to_public_key))
        .uint(tx.amount)
        .uint(tx.fee)
        .uint(tx.nonce)
        .finish())
}

/// Hash form by state: `(txType, fromIndex, toIndex, toPubkeyID, amount, fee, nonce)`
pub fn encode_create2transfer_with_state_id(
    tx: &Create2Transfer,
    to_pub_key_id: PubKeyId,
) -> Result<Vec<u8>, EncodingError> {
    let to_state_id = recipient_state_id(tx)?;
    Ok(AbiWords::with_capacity(7)
        .small(TxType::Create2Transfer.as_u8())
        .small(tx.from_state_id)
        .small(to_state_id)
        .small(to_pub_key_id)
        .uint(tx.amount)
        .uint(tx.fee)
        .uint(tx.nonce)
        .finish())
}

/// Signing form: `(txType, fromIndex, keccak(toPubkey), nonce, amount, fee)`
pub fn encode_create2transfer_for_signing(tx: &Create2Transfer) -> Result<Vec<u8>, EncodingError> {
    let to_public_key = recipient_public_key(tx)?;
    Ok(AbiWords::with_capacity(6)
        .small(TxType::Create2Transfer.as_u8())
        .small(tx.from_state_id)
        .bytes32(&public_key_hash(to_public_key))
        .uint(tx.nonce)
        .uint(tx.amount)
        .uint(tx.fee)
        .finish())
}

/// Commitment form: `fromIndex[4] ∥ toIndex[4] ∥ toPubkeyID[4] ∥ amount[2] ∥ fee[2]`
pub fn encode_create2transfer_for_commitment(
    tx: &Create2Transfer,
    to_pub_key_id: PubKeyId,
) -> Result<[u8; CREATE2TRANSFER_LENGTH], EncodingError> {
    let to_state_id = recipient_state_id(tx)?;
    let mut encoded = [0u8; CREATE2TRANSFER_LENGTH];
    put_u32(&mut encoded[0..4], tx.from_state_id);
    put_u32(&mut encoded[4..8], to_state_id);
    put_u32(&mut encoded[8..12], to_pub_key_id);
    put_decimal(&mut encoded[12..14], tx.amount)?;
    put_decimal(&mut encoded[14..16], tx.fee)?;
    Ok(encoded)
}

/// Decode one commitment record into the transfer and its recipient's public key id.
pub fn decode_create2transfer_from_commitment(
    data: &[u8],
) -> Result<(Create2Transfer, PubKeyId), EncodingError> {
    let data = record::<CREATE2TRANSFER_LENGTH>(data)?;
    let tx = Create2Transfer {
        from_state_id: read_u32(&data[0..4]),
        to_state_id: Some(read_u32(&data[4..8])),
        to_public_key: None,
        amount: read_decimal(&data[12..14]),
        fee: read_decimal(&data[14..16]),
        nonce: U256::ZERO,
    };
    Ok((tx, read_u32(&data[8..12])))
}

/// Concatenated commitment records, pairing each transfer with its public key id
pub fn serialize_create2transfers(
    txs: &[Create2Transfer],
    pub_key_ids: &[PubKeyId],
) -> Result<Vec<u8>, EncodingError> {
    if txs.len() != pub_key_ids.len() {
        return Err(EncodingError::InvalidSlicesLength {
            left: txs.len(),
            right: pub_key_ids.len(),
        });
    }
    let mut buf = Vec::with_capacity(txs.len() * CREATE2TRANSFER_LENGTH);
    for (tx, pub_key_id) in txs.iter().zip(pub_key_ids) {
        buf.extend_from_slice(&encode_create2transfer_for_commitment(tx, *pub_key_id)?);
    }
    Ok(buf)
}

/// Split and decode concatenated commitment records
pub fn deserialize_create2transfers(
    data: &[u8],
) -> Result<(Vec<Create2Transfer>, Vec<PubKeyId>), EncodingError> {
    records::<CREATE2TRANSFER_LENGTH>(data)?
        .map(decode_create2transfer_from_commitment)
        .collect::<Result<Vec<_>, _>>()
        .map(|decoded| decoded.into_iter().unzip())
}

/// Keccak256 of [`encode_create2transfer`]
pub fn hash_create2transfer(tx: &Create2Transfer) -> Result<Hash, EncodingError> {
    Ok(Keccak256Hasher::hash(&encode_create2transfer(tx)?))
}
