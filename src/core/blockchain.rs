//! The blockchain ledger
//!
//! Owns the ordered list of accepted blocks and the UTXO set derived from
//! them. The chain is always rooted at the fixed genesis block and every
//! link is validated before mutation, so a failed operation leaves both the
//! chain and the UTXO set untouched.
//!
//! Mutating operations take `&mut self` and read-only queries `&self`, which
//! statically enforces the single-writer model; share a ledger between
//! threads behind an `RwLock<Blockchain>`.

use crate::core::block::Block;
use crate::core::transaction::Transaction;
use crate::core::utxo_set::UtxoSet;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weight every new block contributes to the chain's total difficulty
pub const DEFAULT_DIFFICULTY: u64 = 1;

/// Ledger errors
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Invalid transaction batch: {0}")]
    InvalidTransaction(String),
    #[error("Invalid block: {0}")]
    InvalidBlock(String),
    #[error("Invalid blockchain: {0}")]
    InvalidBlockchain(String),
    #[error("Worse blockchain: candidate weight {candidate} <= current weight {current}")]
    WorseBlockchain { candidate: u64, current: u64 },
}

/// The blockchain ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blockchain {
    /// The chain of blocks, genesis first
    blocks: Vec<Block>,
    /// Unspent outputs, derived from `blocks`
    ///
    /// Skipped in serialization; call [`Blockchain::rebuild_utxo_set`] after
    /// deserializing.
    #[serde(skip)]
    utxo_set: UtxoSet,
}

impl Blockchain {
    /// Create a new ledger rooted at the genesis block
    pub fn new() -> Self {
        let blocks = vec![Block::genesis()];
        let utxo_set = UtxoSet::build(&blocks);
        Self { blocks, utxo_set }
    }

    /// Get the latest block
    pub fn latest(&self) -> &Block {
        self.blocks
            .last()
            .expect("chain always holds at least the genesis block")
    }

    /// Get all blocks, genesis first
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get a block by index
    pub fn get_block(&self, index: u64) -> Option<&Block> {
        self.blocks.get(index as usize)
    }

    /// Get a block by hash
    pub fn get_block_by_hash(&self, hash: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.hash == hash)
    }

    /// Chain height (index of the latest block)
    pub fn height(&self) -> u64 {
        self.blocks.len() as u64 - 1
    }

    /// Get the current UTXO set
    pub fn utxo_set(&self) -> &UtxoSet {
        &self.utxo_set
    }

    /// Package a transaction batch as a candidate successor of the tip
    ///
    /// Pure construction: the candidate is not appended, submit it through
    /// [`Blockchain::add_block`]. Fails with [`ChainError::InvalidTransaction`]
    /// when the batch does not pass UTXO validation.
    pub fn create_block(&self, transactions: Vec<Transaction>) -> Result<Block, ChainError> {
        if !self.utxo_set.validate(&transactions) {
            return Err(ChainError::InvalidTransaction(
                "batch double-spends or references missing outputs".to_string(),
            ));
        }

        let latest = self.latest();
        Ok(Block::build(
            latest.index + 1,
            latest.hash.clone(),
            Utc::now(),
            transactions,
            DEFAULT_DIFFICULTY,
        ))
    }

    /// Append a block to the chain and apply its transactions
    ///
    /// All checks precede all mutation: a rejected block has zero effect on
    /// the chain or the UTXO set.
    pub fn add_block(&mut self, block: Block) -> Result<(), ChainError> {
        self.validate_block(&block)?;

        for tx in &block.transactions {
            self.utxo_set.add(tx);
        }
        log::debug!("accepted block {} ({})", block.index, block.hash);
        self.blocks.push(block);

        Ok(())
    }

    /// Validate a block against the current tip
    fn validate_block(&self, block: &Block) -> Result<(), ChainError> {
        let latest = self.latest();

        if block.index != latest.index + 1 {
            return Err(ChainError::InvalidBlock(format!(
                "index {} does not follow tip index {}",
                block.index, latest.index
            )));
        }

        if block.header.previous_hash != latest.hash {
            return Err(ChainError::InvalidBlock(
                "previous hash does not match tip".to_string(),
            ));
        }

        if !block.verify_merkle_root() {
            return Err(ChainError::InvalidBlock("merkle root mismatch".to_string()));
        }

        if !block.verify_hash() {
            return Err(ChainError::InvalidBlock(
                "hash does not match contents".to_string(),
            ));
        }

        Ok(())
    }

    /// Check every link of the chain
    ///
    /// Read-only, O(n); stops at the first broken link.
    pub fn is_chain_valid(&self) -> bool {
        for i in 1..self.blocks.len() {
            if !self.blocks[i].valid(&self.blocks[i - 1]) {
                return false;
            }
        }
        true
    }

    /// Total chain weight (sum of every block's difficulty)
    pub fn total_difficulty(&self) -> u64 {
        self.blocks.iter().map(|block| block.header.difficulty).sum()
    }

    /// Adopt `other` if it is valid and strictly heavier
    ///
    /// The fork-choice rule: heaviest valid chain wins, ties go to the
    /// incumbent. On success the chain is swapped wholesale and the UTXO set
    /// rebuilt from genesis.
    pub fn replace(&mut self, other: Blockchain) -> Result<(), ChainError> {
        if other.blocks.first().map(|b| b.hash.as_str()) != Some(self.blocks[0].hash.as_str()) {
            return Err(ChainError::InvalidBlockchain(
                "candidate is not rooted at the genesis block".to_string(),
            ));
        }

        if !other.is_chain_valid() {
            return Err(ChainError::InvalidBlockchain(
                "candidate chain has a broken link".to_string(),
            ));
        }

        let current = self.total_difficulty();
        let candidate = other.total_difficulty();
        if candidate <= current {
            return Err(ChainError::WorseBlockchain { candidate, current });
        }

        log::info!(
            "replacing chain at height {} (weight {}) with candidate at height {} (weight {})",
            self.height(),
            current,
            other.height(),
            candidate
        );
        self.blocks = other.blocks;
        self.rebuild_utxo_set();

        Ok(())
    }

    /// Discard and recompute the UTXO set by replaying the chain from genesis
    pub fn rebuild_utxo_set(&mut self) {
        self.utxo_set = UtxoSet::build(&self.blocks);
    }

    /// Get the balance of an address
    pub fn balance(&self, address: &str) -> u64 {
        self.utxo_set.balance(address)
    }

    /// Get chain statistics
    pub fn stats(&self) -> ChainStats {
        let total_transactions: usize = self.blocks.iter().map(|b| b.tx_count()).sum();

        ChainStats {
            height: self.height(),
            total_blocks: self.blocks.len() as u64,
            total_transactions: total_transactions as u64,
            total_difficulty: self.total_difficulty(),
            latest_hash: self.latest().hash.clone(),
        }
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

/// Chain statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainStats {
    pub height: u64,
    pub total_blocks: u64,
    pub total_transactions: u64,
    pub total_difficulty: u64,
    pub latest_hash: String,
}
