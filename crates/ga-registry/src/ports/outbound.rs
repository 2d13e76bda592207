//! # Outbound Ports (Driven Ports)
//!
//! Store abstractions and the external proof verifier. Every store mutation
//! is a single atomic check-and-set: two concurrent attempts to insert the
//! same key resolve so exactly one succeeds and the other fails with the
//! matching "already" error.

use crate::domain::entities::{
    Attestation, Channel, FieldElement, GithubSide, Member, OnboardMessage, TeeSide,
};
use crate::domain::errors::RegistryError;
use shared_types::{ChannelId, CodeId, Hash, MemberId};

/// External zero-knowledge verifier. Opaque: given proof bytes and the fixed
/// public-input sequence it either returns the decoded attestation or fails
/// `InvalidProof`. The engine never reinterprets the layout behind it.
pub trait ProofVerifier: Send + Sync {
    /// Verify a proof and decode its attestation.
    fn verify_and_decode(
        &self,
        proof: &[u8],
        public_inputs: &[FieldElement],
    ) -> Result<Attestation, RegistryError>;
}

/// Administrator-toggled set of accepted code identities. Checked at
/// registration time only; never retroactively enforced.
pub trait AllowListStore: Send + Sync {
    /// Add a code identity to the allow-list.
    fn allow_code(&self, code_id: CodeId) -> Result<(), RegistryError>;
    /// Remove a code identity from the allow-list.
    fn revoke_code(&self, code_id: &CodeId) -> Result<(), RegistryError>;
    /// Whether a code identity is currently allowed.
    fn is_code_allowed(&self, code_id: &CodeId) -> Result<bool, RegistryError>;
}

/// Append-only member table and per-recipient onboarding mailboxes.
pub trait MemberStore: Send + Sync {
    /// Insert a new member. Fails `AlreadyRegistered` if the id exists;
    /// the unique-key insert is the registration's single winner rule.
    fn insert_member(&self, member: Member) -> Result<(), RegistryError>;
    /// Fetch a member record.
    fn get_member(&self, id: &MemberId) -> Result<Option<Member>, RegistryError>;
    /// Whether a member exists.
    fn is_member(&self, id: &MemberId) -> Result<bool, RegistryError>;
    /// Append an onboarding message to a recipient's mailbox.
    fn append_onboarding(&self, to: &MemberId, msg: OnboardMessage) -> Result<(), RegistryError>;
    /// A recipient's messages, in insertion order.
    fn get_onboarding(&self, id: &MemberId) -> Result<Vec<OnboardMessage>, RegistryError>;
}

/// Channel table. Sides are set through the store so the check-and-set is
/// atomic with respect to concurrent attempts.
pub trait ChannelStore: Send + Sync {
    /// Create a channel. Fails `ChannelExists` on id reuse.
    fn insert_channel(&self, channel: Channel) -> Result<(), RegistryError>;
    /// Fetch a channel.
    fn get_channel(&self, id: &ChannelId) -> Result<Option<Channel>, RegistryError>;
    /// Set the github side exactly once. Fails `ChannelNotFound` or
    /// `AlreadyRegistered`.
    fn set_github_side(&self, id: &ChannelId, side: GithubSide) -> Result<(), RegistryError>;
    /// Set the tee side exactly once. Fails `ChannelNotFound` or
    /// `AlreadyRegistered`.
    fn set_tee_side(&self, id: &ChannelId, side: TeeSide) -> Result<(), RegistryError>;
}

/// Write-once claims and forward-only cooldown timestamps.
pub trait GuardStore: Send + Sync {
    /// Claim a key exactly once. Fails `AlreadyClaimed` on any later attempt.
    fn claim(&self, key: Hash) -> Result<(), RegistryError>;
    /// Whether a key was claimed.
    fn is_claimed(&self, key: &Hash) -> Result<bool, RegistryError>;
    /// Stored cooldown expiry for a key, if any.
    fn cooldown_until(&self, key: &Hash) -> Result<Option<u64>, RegistryError>;
    /// Advance a cooldown expiry. Timestamps only move forward; an earlier
    /// value than the stored one is ignored.
    fn advance_cooldown(&self, key: Hash, until: u64) -> Result<(), RegistryError>;
}
