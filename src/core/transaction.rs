//! Transactions for the UTXO ledger
//!
//! A transaction consumes previously unspent outputs and creates new ones.
//! There is no signature scheme at this layer: inputs reference outputs by
//! outpoint only, and ownership is modelled as plain recipient addresses.

use crate::crypto::sha256_hex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction input (reference to a previous output)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionInput {
    /// Transaction ID of the previous transaction
    pub tx_id: String,
    /// Index of the output in the previous transaction
    pub output_index: u32,
}

/// Transaction output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionOutput {
    /// Amount of coins
    pub amount: u64,
    /// Recipient's address
    pub recipient: String,
}

impl TransactionOutput {
    /// Check if this output belongs to the given address
    pub fn is_owned_by(&self, address: &str) -> bool {
        self.recipient == address
    }
}

/// Unspent Transaction Output (UTXO)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UTXO {
    pub tx_id: String,
    pub output_index: u32,
    pub output: TransactionOutput,
}

/// A ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Unique transaction ID (hash of transaction data)
    pub id: String,
    /// Transaction inputs
    pub inputs: Vec<TransactionInput>,
    /// Transaction outputs
    pub outputs: Vec<TransactionOutput>,
    /// Timestamp of transaction creation
    pub timestamp: DateTime<Utc>,
    /// Whether this transaction mints coins (no inputs consumed)
    pub is_coinbase: bool,
}

impl Transaction {
    /// Create a new transaction spending existing outputs
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        let mut tx = Self {
            id: String::new(),
            inputs,
            outputs,
            timestamp: Utc::now(),
            is_coinbase: false,
        };
        tx.id = tx.calculate_hash();
        tx
    }

    /// Create a coinbase transaction minting `amount` to `recipient`
    ///
    /// The timestamp is passed in explicitly so the genesis coinbase is
    /// deterministic across processes.
    pub fn coinbase(recipient: &str, amount: u64, timestamp: DateTime<Utc>) -> Self {
        let outputs = vec![TransactionOutput {
            amount,
            recipient: recipient.to_string(),
        }];

        let mut tx = Self {
            id: String::new(),
            inputs: Vec::new(),
            outputs,
            timestamp,
            is_coinbase: true,
        };
        tx.id = tx.calculate_hash();
        tx
    }

    /// Calculate the transaction hash
    pub fn calculate_hash(&self) -> String {
        let data = format!(
            "{:?}{:?}{}{}",
            self.inputs, self.outputs, self.timestamp, self.is_coinbase
        );
        sha256_hex(data.as_bytes())
    }

    /// Verify the declared id against the transaction contents
    pub fn verify_hash(&self) -> bool {
        self.id == self.calculate_hash()
    }

    /// Get total output amount
    pub fn total_output(&self) -> u64 {
        self.outputs.iter().map(|o| o.amount).sum()
    }
}

/// Builder for assembling transactions from unspent outputs
pub struct TransactionBuilder {
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add an input from a UTXO
    pub fn add_input(mut self, utxo: &UTXO) -> Self {
        self.inputs.push(TransactionInput {
            tx_id: utxo.tx_id.clone(),
            output_index: utxo.output_index,
        });
        self
    }

    /// Add an output
    pub fn add_output(mut self, recipient: &str, amount: u64) -> Self {
        self.outputs.push(TransactionOutput {
            amount,
            recipient: recipient.to_string(),
        });
        self
    }

    /// Build the transaction
    pub fn build(self) -> Transaction {
        Transaction::new(self.inputs, self.outputs)
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coinbase_transaction() {
        let tx = Transaction::coinbase("recipient_address", 50, Utc::now());
        assert!(tx.is_coinbase);
        assert!(tx.inputs.is_empty());
        assert_eq!(tx.total_output(), 50);
        assert!(tx.verify_hash());
    }

    #[test]
    fn test_coinbase_deterministic() {
        let stamp = DateTime::from_timestamp(1_620_000_000, 0).unwrap();
        let tx1 = Transaction::coinbase("addr", 50, stamp);
        let tx2 = Transaction::coinbase("addr", 50, stamp);
        assert_eq!(tx1.id, tx2.id);
        assert_eq!(tx1, tx2);
    }

    #[test]
    fn test_transaction_hash_distinct() {
        let tx1 = Transaction::coinbase("addr1", 50, Utc::now());
        let tx2 = Transaction::coinbase("addr2", 50, Utc::now());
        assert_ne!(tx1.id, tx2.id);
    }

    #[test]
    fn test_builder() {
        let utxo = UTXO {
            tx_id: "abc123".to_string(),
            output_index: 0,
            output: TransactionOutput {
                amount: 100,
                recipient: "alice".to_string(),
            },
        };

        let tx = TransactionBuilder::new()
            .add_input(&utxo)
            .add_output("bob", 40)
            .add_output("alice", 60)
            .build();

        assert!(!tx.is_coinbase);
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(tx.inputs[0].tx_id, "abc123");
        assert_eq!(tx.total_output(), 100);
        assert!(tx.verify_hash());
    }

    #[test]
    fn test_tampered_id_detected() {
        let mut tx = Transaction::coinbase("addr", 50, Utc::now());
        tx.id = "tampered".to_string();
        assert!(!tx.verify_hash());
    }
}
