//! Nanochain: a minimal in-memory UTXO blockchain ledger
//!
//! This crate provides the consensus core of a toy blockchain:
//! - an append-only chain of blocks rooted at a fixed genesis block
//! - a derived UTXO set used for balances and batch validation
//! - heaviest-chain fork choice (strictly heavier wins, ties go to the
//!   incumbent)
//!
//! There is no networking, mining, signing or persistence here; the crate is
//! the single-process core an API layer would wrap. Mutating operations take
//! `&mut self`, so a shared ledger goes behind an `RwLock<Blockchain>`.
//!
//! # Example
//!
//! ```rust
//! use nanochain::{Blockchain, TransactionBuilder, GENESIS_ADDRESS};
//!
//! let mut chain = Blockchain::new();
//! assert_eq!(chain.balance(GENESIS_ADDRESS), 50);
//!
//! // Spend 20 of the genesis grant, keep the change
//! let utxo = chain.utxo_set().get(GENESIS_ADDRESS)[0].clone();
//! let tx = TransactionBuilder::new()
//!     .add_input(&utxo)
//!     .add_output("bob", 20)
//!     .add_output(GENESIS_ADDRESS, 30)
//!     .build();
//!
//! let block = chain.create_block(vec![tx]).unwrap();
//! chain.add_block(block).unwrap();
//!
//! assert_eq!(chain.balance("bob"), 20);
//! assert_eq!(chain.total_difficulty(), 2);
//! ```

pub mod core;
pub mod crypto;

// Re-export commonly used types
pub use self::core::{
    Block, BlockHeader, Blockchain, ChainError, ChainStats, Transaction, TransactionBuilder,
    TransactionInput, TransactionOutput, UtxoSet, DEFAULT_DIFFICULTY, GENESIS_ADDRESS,
    GENESIS_REWARD, UTXO,
};
