//! Merkle root calculation over transaction ids
//!
//! Each block header commits to its transaction list through a binary hash
//! tree. An odd leaf at any level is paired with itself, Bitcoin-style.

use super::hash::sha256;

/// Calculate the merkle root from a list of transaction hashes
pub fn calculate_merkle_root(hashes: &[Vec<u8>]) -> Vec<u8> {
    if hashes.is_empty() {
        return sha256(b"");
    }

    if hashes.len() == 1 {
        return hashes[0].clone();
    }

    let mut current_level: Vec<Vec<u8>> = hashes.to_vec();

    while current_level.len() > 1 {
        let mut next_level = Vec::new();

        for chunk in current_level.chunks(2) {
            let mut data = chunk[0].clone();
            if chunk.len() == 2 {
                data.extend_from_slice(&chunk[1]);
            } else {
                // Duplicate the last hash if the level has an odd count
                data.extend_from_slice(&chunk[0]);
            }
            next_level.push(sha256(&data));
        }

        current_level = next_level;
    }

    current_level.remove(0)
}

/// Calculate the merkle root from hex-encoded hashes, hex-encoded
pub fn calculate_merkle_root_hex(hex_hashes: &[String]) -> String {
    let hashes: Vec<Vec<u8>> = hex_hashes
        .iter()
        .filter_map(|h| hex::decode(h).ok())
        .collect();
    hex::encode(calculate_merkle_root(&hashes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merkle_root_single() {
        let hashes = vec![sha256(b"tx1")];
        let root = calculate_merkle_root(&hashes);
        assert_eq!(root, hashes[0]);
    }

    #[test]
    fn test_merkle_root_two() {
        let hash1 = sha256(b"tx1");
        let hash2 = sha256(b"tx2");
        let hashes = vec![hash1.clone(), hash2.clone()];

        let root = calculate_merkle_root(&hashes);

        let mut expected = hash1;
        expected.extend_from_slice(&hash2);
        assert_eq!(root, sha256(&expected));
    }

    #[test]
    fn test_merkle_root_odd() {
        let hashes = vec![sha256(b"tx1"), sha256(b"tx2"), sha256(b"tx3")];
        let root = calculate_merkle_root(&hashes);
        assert_eq!(root.len(), 32);
    }

    #[test]
    fn test_empty_merkle_root() {
        let hashes: Vec<Vec<u8>> = vec![];
        let root = calculate_merkle_root(&hashes);
        assert_eq!(root, sha256(b""));
    }
}
