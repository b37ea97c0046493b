//! Core ledger components
//!
//! This module contains the fundamental building blocks:
//! - Transactions (UTXO model, unsigned)
//! - Blocks (merkle-committed batches linked by hash)
//! - UTXO set (derived unspent-output index)
//! - Blockchain (chain management with heaviest-chain fork choice)

pub mod block;
pub mod blockchain;
pub mod transaction;
pub mod utxo_set;

pub use block::{Block, BlockHeader, GENESIS_ADDRESS, GENESIS_REWARD, GENESIS_TIMESTAMP};
pub use blockchain::{Blockchain, ChainError, ChainStats, DEFAULT_DIFFICULTY};
pub use transaction::{
    Transaction, TransactionBuilder, TransactionInput, TransactionOutput, UTXO,
};
pub use utxo_set::UtxoSet;
