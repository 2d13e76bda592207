//! # Digest Helpers
//!
//! Keccak-256 for identities and signed messages, SHA-256 for certificate
//! content digests.

use sha2::Sha256;
use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Prefix for the personal-sign domain separation of 32-byte message hashes.
const PERSONAL_SIGN_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 hash.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// SHA-256 hash (certificate content digests).
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Domain-separated digest of a 32-byte message hash.
///
/// Signatures over application messages (the derived-key hop of a delegation
/// chain, ZK ownership signatures) commit to this digest rather than the raw
/// hash, so they can never be replayed as transaction signatures.
pub fn personal_sign_digest(message_hash: &Hash) -> Hash {
    let mut buf = Vec::with_capacity(PERSONAL_SIGN_PREFIX.len() + 32);
    buf.extend_from_slice(PERSONAL_SIGN_PREFIX);
    buf.extend_from_slice(message_hash);
    keccak256(&buf)
}
