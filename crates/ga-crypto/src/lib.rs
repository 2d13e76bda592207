//! # GroupAuth Crypto - Trust-Root Verification Primitives
//!
//! Pure, stateless cryptographic building blocks for the GroupAuth engine.
//! Nothing in this crate touches a store; every function is a deterministic
//! map from inputs to a verdict.
//!
//! ## Components
//!
//! | Module | Concern |
//! |--------|---------|
//! | `hashing` | Keccak-256 / SHA-256 digests, personal-sign domain separation |
//! | `recovery` | ECDSA signer recovery over secp256k1 |
//! | `decompress` | SEC1 compressed-key decompression to a canonical identity |
//! | `chain` | 3-hop key-delegation chain verification (derived → app → root) |
//! | `binding` | Content-digest binding and literal field checks over certificates |
//!
//! ## Security Properties
//!
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are rejected
//! - **No Partial Credit**: a delegation chain verifies atomically or not at all
//! - **Exact Binding**: certificate digests compare constant-time, full length

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binding;
pub mod chain;
pub mod decompress;
pub mod errors;
pub mod hashing;
pub mod recovery;

// Re-exports
pub use binding::{bind_certificate, contains_field, field_pattern, require_field, verify_binding};
pub use chain::{verify_chain, SignatureChainProof, VerifiedChain, KMS_ISSUANCE_PREFIX};
pub use decompress::decompress_and_identify;
pub use errors::{CertField, ChainHop, CryptoError};
pub use hashing::{keccak256, personal_sign_digest, sha256};
pub use recovery::{recover_signer, Signature65};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
