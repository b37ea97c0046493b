//! Cryptographic utilities for the ledger
//!
//! This module provides:
//! - SHA-256 hashing
//! - Merkle root calculations

pub mod hash;
pub mod merkle;

pub use hash::{double_sha256, double_sha256_hex, sha256, sha256_hex};
pub use merkle::{calculate_merkle_root, calculate_merkle_root_hex};
