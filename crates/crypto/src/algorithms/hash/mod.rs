// Path: crates/crypto/src/algorithms/hash/mod.rs
//! SHA-256 helpers over the RustCrypto `sha2` crate.

use sha2::{Digest, Sha256};

/// SHA-256 of a single buffer.
pub fn sha256(message: &[u8]) -> [u8; 32] {
    sha256_concat(&[message])
}

/// SHA-256 over the concatenation of `parts`, without allocating the joined buffer.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
