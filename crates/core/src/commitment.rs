//! Commitment hashing, matching the rollup contract's `toHash` and `toCommitmentRoot`

use hubble_bls::AggregatedSignature;
use hubble_smt::{Keccak256Hasher, MerkleProof, MerkleTree, SmtError};
use serde::{Deserialize, Serialize};

use crate::types::{Hash, SpokeId, U256};

/// Commitment of Transfer or Create2Transfer transactions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// State root after applying the transactions
    pub state_root: Hash,
    /// Aggregated signature of all transactions as contract words
    pub combined_signature: [U256; 2],
    /// State receiving the fees
    pub fee_receiver: u32,
    /// Serialized transactions
    pub transactions: Vec<u8>,
}

/// Shared parameters of every mass migration in one commitment
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassMigrationMeta {
    /// Destination spoke
    pub spoke_id: SpokeId,
    /// Migrated token
    pub token_id: U256,
    /// Total amount migrated
    pub amount: U256,
    /// State receiving the fees
    pub fee_receiver: u32,
}

/// Commitment of MassMigration transactions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassMigrationCommitment {
    /// State root after applying the transactions
    pub state_root: Hash,
    /// Aggregated signature of all transactions as contract words
    pub combined_signature: [U256; 2],
    /// Migration parameters
    pub meta: MassMigrationMeta,
    /// Root of the withdrawal tree on the spoke
    pub withdraw_root: Hash,
    /// Serialized transactions
    pub transactions: Vec<u8>,
}

impl Commitment {
    /// Commitment signed by `signature`
    pub fn new(
        state_root: Hash,
        signature: &AggregatedSignature,
        fee_receiver: u32,
        transactions: Vec<u8>,
    ) -> Self {
        Self {
            state_root,
            combined_signature: signature.to_big_ints(),
            fee_receiver,
            transactions,
        }
    }

    /// `keccak256(accountRoot ∥ signature ∥ uint256(feeReceiver) ∥ txs)`
    pub fn body_hash(&self, account_root: &Hash) -> Hash {
        let mut preimage = Vec::with_capacity(32 * 4 + self.transactions.len());
        preimage.extend_from_slice(account_root.as_slice());
        push_signature(&mut preimage, &self.combined_signature);
        push_word(&mut preimage, U256::from(self.fee_receiver));
        preimage.extend_from_slice(&self.transactions);
        Keccak256Hasher::hash(&preimage)
    }

    /// Leaf of the batch's commitment tree: `hash_pair(stateRoot, bodyHash)`
    pub fn leaf_hash(&self, account_root: &Hash) -> Hash {
        Keccak256Hasher::hash_pair(&self.state_root, &self.body_hash(account_root))
    }
}

impl MassMigrationCommitment {
    /// `keccak256(accountRoot ∥ signature ∥ spokeID ∥ withdrawRoot ∥ tokenID ∥ amount ∥
    /// feeReceiver ∥ txs)` with every integer widened to a 32-byte word.
    pub fn body_hash(&self, account_root: &Hash) -> Hash {
        let mut preimage = Vec::with_capacity(32 * 8 + self.transactions.len());
        preimage.extend_from_slice(account_root.as_slice());
        push_signature(&mut preimage, &self.combined_signature);
        push_word(&mut preimage, U256::from(self.meta.spoke_id));
        preimage.extend_from_slice(self.withdraw_root.as_slice());
        push_word(&mut preimage, self.meta.token_id);
        push_word(&mut preimage, self.meta.amount);
        push_word(&mut preimage, U256::from(self.meta.fee_receiver));
        preimage.extend_from_slice(&self.transactions);
        Keccak256Hasher::hash(&preimage)
    }

    /// Leaf of the batch's commitment tree: `hash_pair(stateRoot, bodyHash)`
    pub fn leaf_hash(&self, account_root: &Hash) -> Hash {
        Keccak256Hasher::hash_pair(&self.state_root, &self.body_hash(account_root))
    }
}

fn push_word(preimage: &mut Vec<u8>, value: U256) {
    preimage.extend_from_slice(&value.to_be_bytes::<32>());
}

fn push_signature(preimage: &mut Vec<u8>, signature: &[U256; 2]) {
    signature.iter().for_each(|word| push_word(preimage, *word));
}

/// Root over the leaf hashes of one batch
pub fn commitment_root(leaf_hashes: &[Hash]) -> Result<Hash, SmtError> {
    Ok(MerkleTree::new(leaf_hashes)?.root())
}

/// Inclusion proof of commitment `index` in its batch
pub fn commitment_proof(leaf_hashes: &[Hash], index: u32) -> Result<MerkleProof, SmtError> {
    MerkleTree::new(leaf_hashes)?.proof(index)
}
