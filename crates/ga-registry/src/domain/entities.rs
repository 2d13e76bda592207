//! # Domain Entities
//!
//! Members, onboarding messages, decoded attestations and attestation
//! channels. Members and onboarding messages are append-only; channels move
//! monotonically toward mutual attestation and never leave it.

use super::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_types::{AppId, ChannelId, CodeId, CodeKind, CommitSha, Hash, MemberId};

/// One fixed-width public-input field element of the external verifier.
pub type FieldElement = [u8; 32];

/// Number of public-input elements the attestation layout occupies:
/// 32 artifact-hash bytes + 32 repo-hash bytes + 20 commit-sha bytes,
/// one byte per element.
pub const PUBLIC_INPUT_LEN: usize = 84;

/// A registered group member. Created exactly once; never updated or
/// deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// keccak256 of the member's compressed public key.
    pub member_id: MemberId,
    /// The code identity this member registered under.
    pub code_id: CodeId,
    /// Which trust root vouched for the code identity.
    pub kind: CodeKind,
    /// Compressed secp256k1 public key (33 bytes).
    pub pubkey: Vec<u8>,
    /// Registration timestamp, supplied by the caller.
    pub registered_at: u64,
}

/// An onboarding message deposited for a member. The engine never inspects
/// the payload; confidentiality is encryption to the recipient, done by the
/// sender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardMessage {
    /// The sending member.
    pub from_member: MemberId,
    /// Opaque encrypted payload.
    pub encrypted_payload: Vec<u8>,
}

/// A decoded build-provenance attestation. Ephemeral: consumed by the call
/// that decoded it, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attestation {
    /// Content digest of the attested artifact.
    pub artifact_hash: Hash,
    /// Digest identifying the source repository.
    pub repo_hash: Hash,
    /// The commit the artifact was built from.
    pub commit_sha: CommitSha,
}

impl Attestation {
    /// Decode the fixed public-input layout: one byte per 32-byte element
    /// (carried in the last byte), elements 0..32 artifact hash, 32..64 repo
    /// hash, 64..84 commit sha. Fails `InvalidProof` on fewer elements.
    pub fn from_public_inputs(inputs: &[FieldElement]) -> Result<Self, RegistryError> {
        if inputs.len() < PUBLIC_INPUT_LEN {
            return Err(RegistryError::InvalidProof);
        }
        let mut artifact_hash = [0u8; 32];
        let mut repo_hash = [0u8; 32];
        let mut commit_sha = [0u8; 20];
        for (i, byte) in artifact_hash.iter_mut().enumerate() {
            *byte = inputs[i][31];
        }
        for (i, byte) in repo_hash.iter_mut().enumerate() {
            *byte = inputs[32 + i][31];
        }
        for (i, byte) in commit_sha.iter_mut().enumerate() {
            *byte = inputs[64 + i][31];
        }
        Ok(Self {
            artifact_hash,
            repo_hash,
            commit_sha,
        })
    }
}

/// Constraints a channel imposes on both attesting sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConstraints {
    /// Repository digest the github side must attest to.
    pub required_repo_hash: Hash,
    /// Commit the github side must attest to; all-zero accepts any commit.
    pub required_commit_sha: CommitSha,
    /// Enclave application identity the tee side must prove.
    pub required_app_id: AppId,
}

impl ChannelConstraints {
    /// Whether any commit is acceptable.
    pub fn any_commit(&self) -> bool {
        self.required_commit_sha == [0u8; 20]
    }
}

/// The github side of a channel, set exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubSide {
    /// Artifact digest from the decoded attestation.
    pub artifact_hash: Hash,
    /// Commit from the decoded attestation.
    pub commit_sha: CommitSha,
    /// Deposited payload, disclosed only on mutual attestation.
    pub payload: Vec<u8>,
}

/// The tee side of a channel, set exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeeSide {
    /// Compressed derived key the verified chain vouched for.
    pub derived_pubkey: Vec<u8>,
    /// Deposited payload, disclosed only on mutual attestation.
    pub payload: Vec<u8>,
}

/// A two-party mutual-attestation channel gating disclosure of deposited
/// payloads. Created once per id; each side settable exactly once;
/// mutual attestation is derived and monotonic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Caller-chosen identifier.
    pub channel_id: ChannelId,
    /// Constraints both sides are verified against.
    pub constraints: ChannelConstraints,
    /// Github side, once attested.
    pub github: Option<GithubSide>,
    /// Tee side, once attested.
    pub tee: Option<TeeSide>,
}

impl Channel {
    /// A fresh channel with neither side attested.
    pub fn new(channel_id: ChannelId, constraints: ChannelConstraints) -> Self {
        Self {
            channel_id,
            constraints,
            github: None,
            tee: None,
        }
    }

    /// Set the github side. Fails `AlreadyRegistered` if it was ever set.
    pub fn set_github(&mut self, side: GithubSide) -> Result<(), RegistryError> {
        if self.github.is_some() {
            return Err(RegistryError::AlreadyRegistered);
        }
        self.github = Some(side);
        Ok(())
    }

    /// Set the tee side. Fails `AlreadyRegistered` if it was ever set.
    pub fn set_tee(&mut self, side: TeeSide) -> Result<(), RegistryError> {
        if self.tee.is_some() {
            return Err(RegistryError::AlreadyRegistered);
        }
        self.tee = Some(side);
        Ok(())
    }

    /// Both sides verified. Monotonic: once true, stays true.
    pub fn is_mutually_attested(&self) -> bool {
        self.github.is_some() && self.tee.is_some()
    }

    /// Deposited payloads in `(github, tee)` order, or
    /// `NotMutuallyAttested`.
    pub fn payloads(&self) -> Result<(Vec<u8>, Vec<u8>), RegistryError> {
        match (&self.github, &self.tee) {
            (Some(github), Some(tee)) => Ok((github.payload.clone(), tee.payload.clone())),
            _ => Err(RegistryError::NotMutuallyAttested),
        }
    }
}
