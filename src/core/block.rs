//! Blocks of the ledger
//!
//! A block wraps an ordered batch of transactions together with a header
//! linking it to its predecessor. Difficulty is carried as a plain weight
//! used by the fork-choice rule; there is no proof-of-work search here.

use crate::core::blockchain::DEFAULT_DIFFICULTY;
use crate::core::transaction::Transaction;
use crate::crypto::{calculate_merkle_root, double_sha256_hex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed timestamp of the genesis block (2021-05-03 00:00:00 UTC)
pub const GENESIS_TIMESTAMP: i64 = 1_620_000_000;

/// Address credited by the genesis coinbase
pub const GENESIS_ADDRESS: &str = "genesis";

/// Amount minted by the genesis coinbase
pub const GENESIS_REWARD: u64 = 50;

/// Block header containing metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    /// Hash of the previous block
    pub previous_hash: String,
    /// Merkle root of all transaction ids
    pub merkle_root: String,
    /// Block creation timestamp
    pub timestamp: DateTime<Utc>,
    /// Weight this block contributes to the chain's total difficulty
    pub difficulty: u64,
}

/// A block in the chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    /// Block index/height
    pub index: u64,
    /// Block header
    pub header: BlockHeader,
    /// Block hash (cached for efficiency)
    pub hash: String,
    /// List of transactions in the block
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Build a block from its parts, deriving the merkle root and hash
    pub fn build(
        index: u64,
        previous_hash: String,
        timestamp: DateTime<Utc>,
        transactions: Vec<Transaction>,
        difficulty: u64,
    ) -> Self {
        let merkle_root = Self::merkle_root_of(&transactions);

        let header = BlockHeader {
            previous_hash,
            merkle_root,
            timestamp,
            difficulty,
        };

        let mut block = Self {
            index,
            header,
            hash: String::new(),
            transactions,
        };
        block.hash = block.compute_hash();
        block
    }

    /// The fixed genesis block every chain is rooted at
    ///
    /// Deterministic: fixed timestamp and a single seed coinbase granting
    /// [`GENESIS_REWARD`] units to [`GENESIS_ADDRESS`]. Two independently
    /// constructed chains always share this exact block.
    pub fn genesis() -> Self {
        let timestamp = DateTime::from_timestamp(GENESIS_TIMESTAMP, 0)
            .expect("genesis timestamp is in range");
        let seed = Transaction::coinbase(GENESIS_ADDRESS, GENESIS_REWARD, timestamp);

        Self::build(0, "0".repeat(64), timestamp, vec![seed], DEFAULT_DIFFICULTY)
    }

    /// Calculate the merkle root committing to a transaction list
    fn merkle_root_of(transactions: &[Transaction]) -> String {
        let tx_hashes: Vec<Vec<u8>> = transactions
            .iter()
            .map(|tx| hex::decode(&tx.id).unwrap_or_default())
            .collect();

        hex::encode(calculate_merkle_root(&tx_hashes))
    }

    /// Compute the block hash from index and header fields
    pub fn compute_hash(&self) -> String {
        let data = format!(
            "{}{}{}{}{}",
            self.index,
            self.header.previous_hash,
            self.header.merkle_root,
            self.header.timestamp.timestamp(),
            self.header.difficulty
        );
        double_sha256_hex(data.as_bytes())
    }

    /// Verify the block's merkle root
    pub fn verify_merkle_root(&self) -> bool {
        Self::merkle_root_of(&self.transactions) == self.header.merkle_root
    }

    /// Verify the declared block hash
    pub fn verify_hash(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Check this block is a valid successor of `previous`
    ///
    /// Index continuity, hash linkage and self-consistency have to hold.
    pub fn valid(&self, previous: &Block) -> bool {
        self.index == previous.index + 1
            && self.header.previous_hash == previous.hash
            && self.verify_merkle_root()
            && self.verify_hash()
    }

    /// Get number of transactions in this block
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn successor_of(previous: &Block) -> Block {
        Block::build(
            previous.index + 1,
            previous.hash.clone(),
            Utc::now(),
            vec![],
            DEFAULT_DIFFICULTY,
        )
    }

    #[test]
    fn test_genesis_block() {
        let genesis = Block::genesis();
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.header.previous_hash, "0".repeat(64));
        assert_eq!(genesis.tx_count(), 1);
        assert!(genesis.transactions[0].is_coinbase);
        assert_eq!(genesis.transactions[0].total_output(), GENESIS_REWARD);
        assert!(genesis.verify_hash());
        assert!(genesis.verify_merkle_root());
    }

    #[test]
    fn test_genesis_deterministic() {
        assert_eq!(Block::genesis(), Block::genesis());
    }

    #[test]
    fn test_valid_successor() {
        let genesis = Block::genesis();
        let block = successor_of(&genesis);
        assert!(block.valid(&genesis));
    }

    #[test]
    fn test_invalid_index() {
        let genesis = Block::genesis();
        let mut block = successor_of(&genesis);
        block.index = 5;
        block.hash = block.compute_hash();
        assert!(!block.valid(&genesis));
    }

    #[test]
    fn test_invalid_previous_hash() {
        let genesis = Block::genesis();
        let mut block = successor_of(&genesis);
        block.header.previous_hash = "f".repeat(64);
        block.hash = block.compute_hash();
        assert!(!block.valid(&genesis));
    }

    #[test]
    fn test_invalid_self_hash() {
        let genesis = Block::genesis();
        let mut block = successor_of(&genesis);
        block.header.timestamp = Utc::now() + chrono::Duration::seconds(10);
        // hash no longer matches the tampered header
        assert!(!block.verify_hash());
        assert!(!block.valid(&genesis));
    }

    #[test]
    fn test_tampered_transactions_break_merkle_root() {
        let genesis = Block::genesis();
        let mut block = Block::build(
            1,
            genesis.hash.clone(),
            Utc::now(),
            vec![Transaction::coinbase("miner", 10, Utc::now())],
            DEFAULT_DIFFICULTY,
        );
        assert!(block.verify_merkle_root());

        block.transactions[0].id = "tampered".to_string();
        assert!(!block.verify_merkle_root());
        assert!(!block.valid(&genesis));
    }
}
