//! MassMigration encodings

use hubble_smt::Keccak256Hasher;

use super::{put_decimal, put_u32, read_decimal, read_u32, record, records, AbiWords};
use crate::{
    error::EncodingError,
    tx::{MassMigration, TxType},
    types::{Hash, U256},
};

/// Size of a mass migration in a commitment
pub const MASS_MIGRATION_LENGTH: usize = 8;

/// Size of the signed mass migration message
pub const MASS_MIGRATION_FOR_SIGNING_LENGTH: usize = 77;

/// Hash form: `(txType, fromIndex, amount, fee, spokeID, nonce)`
pub fn encode_mass_migration(tx: &MassMigration) -> Vec<u8> {
    AbiWords::with_capacity(6)
        .small(TxType::MassMigration.as_u8())
        .small(tx.from_state_id)
        .uint(tx.amount)
        .uint(tx.fee)
        .small(tx.spoke_id)
        .uint(tx.nonce)
        .finish()
}

/// Signing form, tightly packed:
/// `txType[1] ∥ fromIndex[4] ∥ amount[32] ∥ fee[32] ∥ nonce[4] ∥ spokeID[4]`
pub fn encode_mass_migration_for_signing(
    tx: &MassMigration,
) -> Result<[u8; MASS_MIGRATION_FOR_SIGNING_LENGTH], EncodingError> {
    if tx.nonce > U256::from(u32::MAX) {
        return Err(EncodingError::NonceOverflow);
    }
    let nonce = tx.nonce.to::<u32>();

    let mut encoded = [0u8; MASS_MIGRATION_FOR_SIGNING_LENGTH];
    encoded[0] = TxType::MassMigration.as_u8();
    put_u32(&mut encoded[1..5], tx.from_state_id);
    encoded[5..37].copy_from_slice(&tx.amount.to_be_bytes::<32>());
    encoded[37..69].copy_from_slice(&tx.fee.to_be_bytes::<32>());
    put_u32(&mut encoded[69..73], nonce);
    put_u32(&mut encoded[73..77], tx.spoke_id);
    Ok(encoded)
}

/// Commitment form: `fromIndex[4] ∥ amount[2] ∥ fee[2]`. The spoke is shared
/// by the whole commitment and kept in its meta.
pub fn encode_mass_migration_for_commitment(
    tx: &MassMigration,
) -> Result<[u8; MASS_MIGRATION_LENGTH], EncodingError> {
    let mut encoded = [0u8; MASS_MIGRATION_LENGTH];
    put_u32(&mut encoded[0..4], tx.from_state_id);
    put_decimal(&mut encoded[4..6], tx.amount)?;
    put_decimal(&mut encoded[6..8], tx.fee)?;
    Ok(encoded)
}

/// Decode one commitment record. Spoke and nonce read as 0.
pub fn decode_mass_migration_from_commitment(data: &[u8]) -> Result<MassMigration, EncodingError> {
    let data = record::<MASS_MIGRATION_LENGTH>(data)?;
    Ok(MassMigration {
        from_state_id: read_u32(&data[0..4]),
        spoke_id: 0,
        amount: read_decimal(&data[4..6]),
        fee: read_decimal(&data[6..8]),
        nonce: U256::ZERO,
    })
}

/// Concatenated commitment records
pub fn serialize_mass_migrations(txs: &[MassMigration]) -> Result<Vec<u8>, EncodingError> {
    let mut buf = Vec::with_capacity(txs.len() * MASS_MIGRATION_LENGTH);
    for tx in txs {
        buf.extend_from_slice(&encode_mass_migration_for_commitment(tx)?);
    }
    Ok(buf)
}

/// Split and decode concatenated commitment records
pub fn deserialize_mass_migrations(data: &[u8]) -> Result<Vec<MassMigration>, EncodingError> {
    records::<MASS_MIGRATION_LENGTH>(data)?.map(decode_mass_migration_from_commitment).collect()
}

/// Keccak256 of [`encode_mass_migration`]
pub fn hash_mass_migration(tx: &MassMigration) -> Hash {
    Keccak256Hasher::hash(&encode_mass_migration(tx))
}
