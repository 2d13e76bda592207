//! # Inbound Port (Driving Port / API)
//!
//! The public API of the engine. All operations are synchronous: pure
//! verification followed by at most one atomic store mutation.

use crate::domain::entities::{ChannelConstraints, FieldElement, Member, OnboardMessage};
use crate::domain::errors::RegistryError;
use ga_crypto::SignatureChainProof;
use shared_types::{Address, ChannelId, CodeId, Hash, MemberId};

/// Primary GroupAuth API. Implementations must be thread-safe
/// (`Send + Sync`).
pub trait GroupAuthApi: Send + Sync {
    // =========================================================================
    // Allow-list administration
    // =========================================================================

    /// Add a code identity to the allow-list. `NotAuthorized` unless the
    /// caller is the designated administrator.
    fn add_allowed_code(&self, caller: Address, code_id: CodeId) -> Result<(), RegistryError>;

    /// Remove a code identity from the allow-list. Existing members are not
    /// affected.
    fn remove_allowed_code(&self, caller: Address, code_id: CodeId) -> Result<(), RegistryError>;

    // =========================================================================
    // Member registration
    // =========================================================================

    /// Register a member via a zero-knowledge build-provenance proof.
    ///
    /// The ownership signature (the presenting key signing the digest of the
    /// proof bytes) converts a replayable, publicly observable proof into a
    /// non-replayable registration: a relayer without the private key cannot
    /// produce it. The same proof may still be witnessed by other keys; each
    /// key registers at most once.
    fn register_via_zk(
        &self,
        proof: &[u8],
        public_inputs: &[FieldElement],
        compressed_pubkey: &[u8],
        ownership_sig: &[u8],
        now: u64,
    ) -> Result<MemberId, RegistryError>;

    /// Register a member via an enclave key-delegation chain for an
    /// allow-listed application identity.
    fn register_via_signature_chain(
        &self,
        code_id: CodeId,
        proof: &SignatureChainProof,
        now: u64,
    ) -> Result<MemberId, RegistryError>;

    // =========================================================================
    // Membership and onboarding
    // =========================================================================

    /// Whether a member id is registered.
    fn is_member(&self, member: &MemberId) -> Result<bool, RegistryError>;

    /// Fetch a member record.
    fn get_member(&self, member: &MemberId) -> Result<Option<Member>, RegistryError>;

    /// Deposit an encrypted payload for another member. Both must exist;
    /// the payload is never inspected.
    fn onboard(
        &self,
        from: MemberId,
        to: MemberId,
        encrypted_payload: Vec<u8>,
    ) -> Result<(), RegistryError>;

    /// A recipient's onboarding messages, in insertion order.
    fn get_onboarding(&self, member: &MemberId) -> Result<Vec<OnboardMessage>, RegistryError>;

    // =========================================================================
    // Attestation channels
    // =========================================================================

    /// Create a channel with the given constraints. `ChannelExists` on
    /// id reuse.
    fn create_channel(
        &self,
        channel_id: ChannelId,
        constraints: ChannelConstraints,
    ) -> Result<(), RegistryError>;

    /// Attest the github side of a channel with a provenance proof and
    /// deposit its payload.
    fn register_github_side(
        &self,
        channel_id: &ChannelId,
        proof: &[u8],
        public_inputs: &[FieldElement],
        payload: Vec<u8>,
    ) -> Result<(), RegistryError>;

    /// Attest the tee side of a channel with a delegation chain and deposit
    /// its payload.
    fn register_tee_side(
        &self,
        channel_id: &ChannelId,
        proof: &SignatureChainProof,
        payload: Vec<u8>,
    ) -> Result<(), RegistryError>;

    /// Whether both sides have attested. Monotonic.
    fn is_mutually_attested(&self, channel_id: &ChannelId) -> Result<bool, RegistryError>;

    /// Both payloads in `(github, tee)` order, byte-for-byte, once mutually
    /// attested.
    fn get_payloads(&self, channel_id: &ChannelId) -> Result<(Vec<u8>, Vec<u8>), RegistryError>;

    // =========================================================================
    // Uniqueness bookkeeping
    // =========================================================================

    /// Claim an artifact digest exactly once.
    fn claim_artifact(&self, digest: Hash) -> Result<(), RegistryError>;

    /// Claim a normalized identity string exactly once (keyed by the keccak
    /// digest of its bytes).
    fn claim_identity(&self, normalized: &str) -> Result<(), RegistryError>;

    /// Start or extend a cooldown window. Fails `AlreadyClaimed` while the
    /// stored window is still active; timestamps only advance.
    fn begin_cooldown(&self, key: Hash, now: u64, window: u64) -> Result<(), RegistryError>;
}
