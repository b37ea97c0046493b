//! Unspent transaction output set
//!
//! Derived index over the chain: maps every live outpoint to its output.
//! The set is always reconstructible by replaying the blocks in order, and
//! balances are defined purely as sums over it.

use crate::core::block::Block;
use crate::core::transaction::{Transaction, UTXO};
use std::collections::{HashMap, HashSet};

/// Outpoint key: `tx_id:output_index`
fn outpoint_key(tx_id: &str, output_index: u32) -> String {
    format!("{}:{}", tx_id, output_index)
}

/// The set of unspent transaction outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtxoSet {
    /// Live outputs by outpoint
    entries: HashMap<String, UTXO>,
}

impl UtxoSet {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build the set from scratch by replaying blocks in chain order
    pub fn build(blocks: &[Block]) -> Self {
        let mut set = Self::new();
        for block in blocks {
            for tx in &block.transactions {
                set.add(tx);
            }
        }
        set
    }

    /// Apply a transaction: consume its inputs, create its outputs
    pub fn add(&mut self, tx: &Transaction) {
        if !tx.is_coinbase {
            for input in &tx.inputs {
                self.entries
                    .remove(&outpoint_key(&input.tx_id, input.output_index));
            }
        }

        for (index, output) in tx.outputs.iter().enumerate() {
            let utxo = UTXO {
                tx_id: tx.id.clone(),
                output_index: index as u32,
                output: output.clone(),
            };
            self.entries
                .insert(outpoint_key(&tx.id, index as u32), utxo);
        }
    }

    /// Validate a transaction batch against the current set
    ///
    /// Returns true when the batch is valid: every input resolves to an
    /// unspent output (outputs created earlier in the batch count — order
    /// matters), no outpoint is spent twice, and for non-coinbase
    /// transactions the input value covers the output value.
    pub fn validate(&self, txs: &[Transaction]) -> bool {
        let mut spent: HashSet<String> = HashSet::new();
        let mut created: HashMap<String, u64> = HashMap::new();

        for tx in txs {
            if tx.is_coinbase {
                for (index, output) in tx.outputs.iter().enumerate() {
                    created.insert(outpoint_key(&tx.id, index as u32), output.amount);
                }
                continue;
            }

            if tx.inputs.is_empty() {
                return false;
            }

            let mut input_total: u64 = 0;
            for input in &tx.inputs {
                let key = outpoint_key(&input.tx_id, input.output_index);
                if spent.contains(&key) {
                    return false;
                }
                let amount = match self.entries.get(&key) {
                    Some(utxo) => utxo.output.amount,
                    None => match created.get(&key) {
                        Some(amount) => *amount,
                        None => return false,
                    },
                };
                spent.insert(key);
                input_total += amount;
            }

            if input_total < tx.total_output() {
                return false;
            }

            for (index, output) in tx.outputs.iter().enumerate() {
                created.insert(outpoint_key(&tx.id, index as u32), output.amount);
            }
        }

        true
    }

    /// Check if an outpoint is live
    pub fn contains(&self, tx_id: &str, output_index: u32) -> bool {
        self.entries.contains_key(&outpoint_key(tx_id, output_index))
    }

    /// Get all unspent outputs owned by an address
    pub fn get(&self, address: &str) -> Vec<&UTXO> {
        self.entries
            .values()
            .filter(|utxo| utxo.output.is_owned_by(address))
            .collect()
    }

    /// Get the balance of an address
    pub fn balance(&self, address: &str) -> u64 {
        self.get(address).iter().map(|utxo| utxo.output.amount).sum()
    }

    /// Number of live outputs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
