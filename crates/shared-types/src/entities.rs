//! # Core Identifier Types
//!
//! Identifiers shared between the crypto and registry crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte digest (Keccak-256 or SHA-256 depending on context).
pub type Hash = [u8; 32];

/// 20-byte identity derived from a public key (last 20 bytes of
/// keccak256(uncompressed pubkey)).
pub type Address = [u8; 20];

/// 20-byte git commit identifier from a build-provenance attestation.
pub type CommitSha = [u8; 20];

/// 20-byte enclave application identifier issued by the KMS root.
pub type AppId = [u8; 20];

/// Length of a SEC1 compressed secp256k1 public key.
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Which trust root vouched for a code identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeKind {
    /// A CI build-provenance attestation naming a commit.
    CiCommit,
    /// A hardware-enclave application vouched for by the KMS root.
    EnclaveApp,
}

/// Opaque code identity: a commit sha or enclave app id, right-padded to
/// 32 bytes. Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CodeId([u8; 32]);

impl CodeId {
    /// Build a code identity from raw 32 bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Code identity for a CI commit: the 20-byte sha, right-padded.
    pub fn from_commit_sha(sha: &CommitSha) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..20].copy_from_slice(sha);
        Self(bytes)
    }

    /// Code identity for an enclave application: the 20-byte app id,
    /// right-padded.
    pub fn from_app_id(app_id: &AppId) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..20].copy_from_slice(app_id);
        Self(bytes)
    }

    /// The raw 32-byte value.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The 20-byte commit/app prefix this identity was built from.
    pub fn prefix20(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.0[..20]);
        out
    }
}

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Member identifier: keccak256 of the member's compressed public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub Hash);

impl MemberId {
    /// The raw 32-byte value.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Caller-chosen channel identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Construct from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
