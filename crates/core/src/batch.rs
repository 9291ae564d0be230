//! Batch descriptors stored by the rollup contract

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// Kind of batch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BatchType {
    /// Initial state of the rollup
    Genesis = 0,
    /// Transfer commitments
    Transfer = 1,
    /// MassMigration commitments
    MassMigration = 2,
    /// Create2Transfer commitments
    Create2Transfer = 3,
    /// Deposit subtree
    Deposit = 4,
}

impl TryFrom<u8> for BatchType {
    type Error = EncodingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Genesis),
            1 => Ok(Self::Transfer),
            2 => Ok(Self::MassMigration),
            3 => Ok(Self::Create2Transfer),
            4 => Ok(Self::Deposit),
            other => Err(EncodingError::UnknownBatchType(other)),
        }
    }
}

/// Packed batch meta word:
/// `batchType[1] ∥ size[1] ∥ committer[20] ∥ finaliseOn[4] ∥ reserved[6]`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMeta {
    /// Kind of batch
    pub batch_type: BatchType,
    /// Number of commitments
    pub size: u8,
    /// Account that submitted the batch
    pub committer: Address,
    /// Block at which the batch becomes final
    pub finalise_on: u32,
}

impl BatchMeta {
    /// Pack into one 32-byte word
    pub fn encode(&self) -> B256 {
        let mut word = [0u8; 32];
        word[0] = self.batch_type as u8;
        word[1] = self.size;
        word[2..22].copy_from_slice(self.committer.as_slice());
        word[22..26].copy_from_slice(&self.finalise_on.to_be_bytes());
        B256::from(word)
    }

    /// Unpack a meta word. Reserved bytes are ignored.
    pub fn decode(word: &B256) -> Result<Self, EncodingError> {
        let bytes = word.as_slice();
        Ok(Self {
            batch_type: BatchType::try_from(bytes[0])?,
            size: bytes[1],
            committer: Address::from_slice(&bytes[2..22]),
            finalise_on: u32::from_be_bytes([bytes[22], bytes[23], bytes[24], bytes[25]]),
        })
    }
}
