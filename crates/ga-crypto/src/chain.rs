//! # Key-Delegation Chain Verification
//!
//! Verifies the 3-hop signature chain an enclave presents as evidence that a
//! derived key is controlled by audited enclave code:
//!
//! ```text
//! derived key  <-- vouched by --  application key  <-- vouched by --  KMS root
//! ```
//!
//! Verification is stateless and atomic: every hop must recover to the
//! expected identity or the whole chain is rejected. The allow-list check on
//! the application identity is the registry's responsibility, not this
//! module's.

use crate::decompress::decompress_and_identify;
use crate::errors::{ChainHop, CryptoError};
use crate::hashing::{keccak256, personal_sign_digest};
use crate::recovery::recover_signer;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{Address, AppId, Hash};

/// Prefix of the message the KMS root signs when issuing an application key.
pub const KMS_ISSUANCE_PREFIX: &[u8] = b"issued:";

/// A complete delegation-chain proof, as presented by an enclave. Ephemeral:
/// consumed by one verification call, never stored.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureChainProof {
    /// Hash of the application message the derived key signed.
    pub message_hash: Hash,
    /// Derived key's signature over the domain-separated message hash.
    pub message_signature: Vec<u8>,
    /// Application key's signature over `purpose ":" hex(derived_pubkey)`.
    pub app_signature: Vec<u8>,
    /// KMS root's signature over the application-key issuance message.
    pub kms_signature: Vec<u8>,
    /// Compressed derived public key.
    #[serde_as(as = "Bytes")]
    pub derived_pubkey: [u8; 33],
    /// Compressed application public key.
    #[serde_as(as = "Bytes")]
    pub app_pubkey: [u8; 33],
    /// Key-derivation purpose string, bound into the app delegation hop.
    pub purpose: String,
}

/// Output of a successful chain verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedChain {
    /// The application identity the KMS root vouched for.
    pub app_id: AppId,
    /// The compressed derived key the application vouched for.
    pub derived_pubkey: [u8; 33],
}

/// Verify a 3-hop delegation chain against an expected application identity
/// and the configured KMS root identity.
///
/// Any single hop failure (including a malformed key or signature inside a
/// hop) yields `InvalidSignatureChain` naming that hop. No partial credit.
pub fn verify_chain(
    proof: &SignatureChainProof,
    app_id: &AppId,
    kms_root: &Address,
) -> Result<VerifiedChain, CryptoError> {
    // Hop 1: application key vouches for the derived key.
    let delegation_msg = format!("{}:{}", proof.purpose, hex::encode(proof.derived_pubkey));
    let delegation_digest = keccak256(delegation_msg.as_bytes());
    let app_identity = decompress_and_identify(&proof.app_pubkey)
        .map_err(|_| hop_failure(ChainHop::AppDelegation))?;
    let delegation_signer = recover_signer(&delegation_digest, &proof.app_signature)
        .map_err(|_| hop_failure(ChainHop::AppDelegation))?;
    if delegation_signer != app_identity {
        return Err(hop_failure(ChainHop::AppDelegation));
    }

    // Hop 2: KMS root vouches for the application key under this app id.
    let mut issuance_msg =
        Vec::with_capacity(KMS_ISSUANCE_PREFIX.len() + app_id.len() + proof.app_pubkey.len());
    issuance_msg.extend_from_slice(KMS_ISSUANCE_PREFIX);
    issuance_msg.extend_from_slice(app_id);
    issuance_msg.extend_from_slice(&proof.app_pubkey);
    let issuance_digest = keccak256(&issuance_msg);
    let issuance_signer = recover_signer(&issuance_digest, &proof.kms_signature)
        .map_err(|_| hop_failure(ChainHop::KmsIssuance))?;
    if issuance_signer != *kms_root {
        return Err(hop_failure(ChainHop::KmsIssuance));
    }

    // Hop 3: derived key signs the actual message, domain-separated.
    let derived_identity = decompress_and_identify(&proof.derived_pubkey)
        .map_err(|_| hop_failure(ChainHop::DerivedMessage))?;
    let message_digest = personal_sign_digest(&proof.message_hash);
    let message_signer = recover_signer(&message_digest, &proof.message_signature)
        .map_err(|_| hop_failure(ChainHop::DerivedMessage))?;
    if message_signer != derived_identity {
        return Err(hop_failure(ChainHop::DerivedMessage));
    }

    Ok(VerifiedChain {
        app_id: *app_id,
        derived_pubkey: proof.derived_pubkey,
    })
}

fn hop_failure(hop: ChainHop) -> CryptoError {
    CryptoError::InvalidSignatureChain { hop }
}
