//! Cryptographic Utilities

use rand::{RngCore, rngs::OsRng};

/// Cryptographically secure random bytes from the OS generator.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}
