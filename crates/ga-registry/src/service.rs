//! # GroupAuth Service
//!
//! Application service that implements `GroupAuthApi`: pure verification via
//! `ga-crypto` and the external prover, then exactly one atomic store
//! mutation per successful operation. The service holds no mutable state of
//! its own; everything lives behind the store ports.

use crate::domain::entities::{
    Channel, ChannelConstraints, FieldElement, GithubSide, Member, OnboardMessage, TeeSide,
};
use crate::domain::errors::RegistryError;
use crate::ports::inbound::GroupAuthApi;
use crate::ports::outbound::{
    AllowListStore, ChannelStore, GuardStore, MemberStore, ProofVerifier,
};
use ga_crypto::{
    decompress_and_identify, keccak256, personal_sign_digest, recover_signer, verify_chain,
    CryptoError, SignatureChainProof,
};
use shared_types::{Address, ChannelId, CodeId, CodeKind, Hash, MemberId};
use tracing::{debug, info, warn};

/// Deployment-time constants. The KMS root identity is configured, never
/// discovered at runtime; the administrator is the single identity allowed
/// to toggle the allow-list.
#[derive(Clone, Copy, Debug)]
pub struct RegistryConfig {
    /// Designated administrator identity.
    pub admin: Address,
    /// Root-of-trust identity for enclave key-delegation chains.
    pub kms_root: Address,
}

/// GroupAuth application service.
pub struct GroupAuthService<S, Z> {
    config: RegistryConfig,
    store: S,
    prover: Z,
}

impl<S, Z> GroupAuthService<S, Z>
where
    S: AllowListStore + MemberStore + ChannelStore + GuardStore,
    Z: ProofVerifier,
{
    /// Create a service over a store and an external proof verifier.
    pub fn new(config: RegistryConfig, store: S, prover: Z) -> Self {
        Self {
            config,
            store,
            prover,
        }
    }

    fn require_admin(&self, caller: Address) -> Result<(), RegistryError> {
        if caller != self.config.admin {
            warn!(caller = %hex::encode(caller), "allow-list change rejected");
            return Err(RegistryError::NotAuthorized);
        }
        Ok(())
    }
}

impl<S, Z> GroupAuthApi for GroupAuthService<S, Z>
where
    S: AllowListStore + MemberStore + ChannelStore + GuardStore,
    Z: ProofVerifier,
{
    fn add_allowed_code(&self, caller: Address, code_id: CodeId) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        self.store.allow_code(code_id)?;
        info!(%code_id, "code identity allowed");
        Ok(())
    }

    fn remove_allowed_code(&self, caller: Address, code_id: CodeId) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        self.store.revoke_code(&code_id)?;
        info!(%code_id, "code identity revoked");
        Ok(())
    }

    fn register_via_zk(
        &self,
        proof: &[u8],
        public_inputs: &[FieldElement],
        compressed_pubkey: &[u8],
        ownership_sig: &[u8],
        now: u64,
    ) -> Result<MemberId, RegistryError> {
        let attestation = self.prover.verify_and_decode(proof, public_inputs)?;

        let code_id = CodeId::from_commit_sha(&attestation.commit_sha);
        if !self.store.is_code_allowed(&code_id)? {
            return Err(RegistryError::CodeNotAllowed);
        }

        // Ownership check: the presenting key must have signed the digest of
        // the proof bytes. This is what makes an observable proof
        // non-replayable by relayers.
        let owner = decompress_and_identify(compressed_pubkey)?;
        let proof_digest = personal_sign_digest(&keccak256(proof));
        let signer = recover_signer(&proof_digest, ownership_sig)?;
        if signer != owner {
            return Err(CryptoError::InvalidSignature.into());
        }

        let member_id = MemberId(keccak256(compressed_pubkey));
        self.store.insert_member(Member {
            member_id,
            code_id,
            kind: CodeKind::CiCommit,
            pubkey: compressed_pubkey.to_vec(),
            registered_at: now,
        })?;
        info!(%member_id, %code_id, "member registered via zk attestation");
        Ok(member_id)
    }

    fn register_via_signature_chain(
        &self,
        code_id: CodeId,
        proof: &SignatureChainProof,
        now: u64,
    ) -> Result<MemberId, RegistryError> {
        if !self.store.is_code_allowed(&code_id)? {
            return Err(RegistryError::CodeNotAllowed);
        }

        let verified = verify_chain(proof, &code_id.prefix20(), &self.config.kms_root)?;

        let member_id = MemberId(keccak256(&verified.derived_pubkey));
        self.store.insert_member(Member {
            member_id,
            code_id,
            kind: CodeKind::EnclaveApp,
            pubkey: verified.derived_pubkey.to_vec(),
            registered_at: now,
        })?;
        info!(%member_id, %code_id, "member registered via signature chain");
        Ok(member_id)
    }

    fn is_member(&self, member: &MemberId) -> Result<bool, RegistryError> {
        MemberStore::is_member(&self.store, member)
    }

    fn get_member(&self, member: &MemberId) -> Result<Option<Member>, RegistryError> {
        self.store.get_member(member)
    }

    fn onboard(
        &self,
        from: MemberId,
        to: MemberId,
        encrypted_payload: Vec<u8>,
    ) -> Result<(), RegistryError> {
        if !MemberStore::is_member(&self.store, &from)?
            || !MemberStore::is_member(&self.store, &to)?
        {
            return Err(RegistryError::MemberNotFound);
        }
        self.store.append_onboarding(
            &to,
            OnboardMessage {
                from_member: from,
                encrypted_payload,
            },
        )?;
        debug!(%from, %to, "onboarding message deposited");
        Ok(())
    }

    fn get_onboarding(&self, member: &MemberId) -> Result<Vec<OnboardMessage>, RegistryError> {
        self.store.get_onboarding(member)
    }

    fn create_channel(
        &self,
        channel_id: ChannelId,
        constraints: ChannelConstraints,
    ) -> Result<(), RegistryError> {
        info!(%channel_id, "channel created");
        self.store
            .insert_channel(Channel::new(channel_id, constraints))
    }

    fn register_github_side(
        &self,
        channel_id: &ChannelId,
        proof: &[u8],
        public_inputs: &[FieldElement],
        payload: Vec<u8>,
    ) -> Result<(), RegistryError> {
        let channel = self
            .store
            .get_channel(channel_id)?
            .ok_or(RegistryError::ChannelNotFound)?;

        let attestation = self.prover.verify_and_decode(proof, public_inputs)?;

        if attestation.repo_hash != channel.constraints.required_repo_hash {
            return Err(RegistryError::RepoMismatch);
        }
        if !channel.constraints.any_commit()
            && attestation.commit_sha != channel.constraints.required_commit_sha
        {
            return Err(RegistryError::WrongCommit);
        }

        self.store.set_github_side(
            channel_id,
            GithubSide {
                artifact_hash: attestation.artifact_hash,
                commit_sha: attestation.commit_sha,
                payload,
            },
        )?;
        info!(%channel_id, "github side attested");
        Ok(())
    }

    fn register_tee_side(
        &self,
        channel_id: &ChannelId,
        proof: &SignatureChainProof,
        payload: Vec<u8>,
    ) -> Result<(), RegistryError> {
        let channel = self
            .store
            .get_channel(channel_id)?
            .ok_or(RegistryError::ChannelNotFound)?;

        let verified = verify_chain(
            proof,
            &channel.constraints.required_app_id,
            &self.config.kms_root,
        )?;

        self.store.set_tee_side(
            channel_id,
            TeeSide {
                derived_pubkey: verified.derived_pubkey.to_vec(),
                payload,
            },
        )?;
        info!(%channel_id, "tee side attested");
        Ok(())
    }

    fn is_mutually_attested(&self, channel_id: &ChannelId) -> Result<bool, RegistryError> {
        let channel = self
            .store
            .get_channel(channel_id)?
            .ok_or(RegistryError::ChannelNotFound)?;
        Ok(channel.is_mutually_attested())
    }

    fn get_payloads(&self, channel_id: &ChannelId) -> Result<(Vec<u8>, Vec<u8>), RegistryError> {
        let channel = self
            .store
            .get_channel(channel_id)?
            .ok_or(RegistryError::ChannelNotFound)?;
        channel.payloads()
    }

    fn claim_artifact(&self, digest: Hash) -> Result<(), RegistryError> {
        self.store.claim(digest)?;
        debug!(digest = %hex::encode(digest), "artifact digest claimed");
        Ok(())
    }

    fn claim_identity(&self, normalized: &str) -> Result<(), RegistryError> {
        self.store.claim(keccak256(normalized.as_bytes()))?;
        debug!(identity = normalized, "normalized identity claimed");
        Ok(())
    }

    fn begin_cooldown(&self, key: Hash, now: u64, window: u64) -> Result<(), RegistryError> {
        if let Some(until) = self.store.cooldown_until(&key)? {
            if now < until {
                return Err(RegistryError::AlreadyClaimed);
            }
        }
        self.store.advance_cooldown(key, now.saturating_add(window))
    }
}
