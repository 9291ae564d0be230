//! Transaction structures

use hubble_bls::PublicKey;
use serde::{Deserialize, Serialize};

use crate::{
    error::EncodingError,
    types::{SpokeId, StateId, U256},
};

/// Transaction type, as tagged on chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxType {
    /// Transfer between two existing states
    Transfer = 1,
    /// Transfer creating the recipient state
    Create2Transfer = 3,
    /// Withdrawal of funds to a spoke
    MassMigration = 5,
}

impl TxType {
    /// Tag as written in encodings
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<TxType> for u8 {
    fn from(tx_type: TxType) -> Self {
        tx_type.as_u8()
    }
}

impl TryFrom<u8> for TxType {
    type Error = EncodingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Transfer),
            3 => Ok(Self::Create2Transfer),
            5 => Ok(Self::MassMigration),
            other => Err(EncodingError::UnknownTxType(other)),
        }
    }
}

/// Transfer between two existing states
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Sender state
    pub from_state_id: StateId,
    /// Recipient state
    pub to_state_id: StateId,
    /// Amount to transfer
    pub amount: U256,
    /// Fee paid to the commitment's fee receiver
    pub fee: U256,
    /// Sender's nonce
    pub nonce: U256,
}

/// Transfer to a state that is created for the recipient.
///
/// Before the recipient state exists the transfer addresses it by public key;
/// once applied it is addressed by the new state index plus the public key's
/// position in the account tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Create2Transfer {
    /// Sender state
    pub from_state_id: StateId,
    /// Created recipient state, once known
    pub to_state_id: Option<StateId>,
    /// Recipient public key, when addressing it directly
    pub to_public_key: Option<PublicKey>,
    /// Amount to transfer
    pub amount: U256,
    /// Fee paid to the commitment's fee receiver
    pub fee: U256,
    /// Sender's nonce
    pub nonce: U256,
}

/// Withdrawal of funds from the rollup to a spoke
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassMigration {
    /// Sender state
    pub from_state_id: StateId,
    /// Destination spoke
    pub spoke_id: SpokeId,
    /// Amount to migrate
    pub amount: U256,
    /// Fee paid to the commitment's fee receiver
    pub fee: U256,
    /// Sender's nonce
    pub nonce: U256,
}

impl Transfer {
    /// Create a new transfer
    pub const fn new(
        from_state_id: StateId,
        to_state_id: StateId,
        amount: U256,
        fee: U256,
        nonce: U256,
    ) -> Self {
        Self { from_state_id, to_state_id, amount, fee, nonce }
    }
}

impl Create2Transfer {
    /// Create a transfer to a new state owned by `to_public_key`
    pub const fn with_public_key(
        from_state_id: StateId,
        to_public_key: PublicKey,
        amount: U256,
        fee: U256,
        nonce: U256,
    ) -> Self {
        Self {
            from_state_id,
            to_state_id: None,
            to_public_key: Some(to_public_key),
            amount,
            fee,
            nonce,
        }
    }
}

impl MassMigration {
    /// Create a new mass migration
    pub const fn new(
        from_state_id: StateId,
        spoke_id: SpokeId,
        amount: U256,
        fee: U256,
        nonce: U256,
    ) -> Self {
        Self { from_state_id, spoke_id, amount, fee, nonce }
    }
}
