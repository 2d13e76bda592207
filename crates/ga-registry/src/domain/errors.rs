//! # Registry Errors
//!
//! Every failure is a distinct, named, non-retryable condition. Atomicity of
//! the service operations guarantees no partial state survives any of these.

use ga_crypto::CryptoError;
use thiserror::Error;

/// Errors raised by registry and channel operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A cryptographic verification step failed (signature, public key,
    /// delegation chain, certificate binding).
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The external verifier rejected the proof or its public inputs.
    #[error("Invalid proof")]
    InvalidProof,

    /// The presented code identity is not on the allow-list.
    #[error("Code identity not allowed")]
    CodeNotAllowed,

    /// The member key or channel side is already registered.
    #[error("Already registered")]
    AlreadyRegistered,

    /// The uniqueness key was already claimed, or its cooldown is active.
    #[error("Already claimed")]
    AlreadyClaimed,

    /// A channel with this identifier already exists.
    #[error("Channel already exists")]
    ChannelExists,

    /// No channel with this identifier.
    #[error("Channel not found")]
    ChannelNotFound,

    /// A referenced member does not exist.
    #[error("Member not found")]
    MemberNotFound,

    /// Both channel sides must be verified before payloads are disclosed.
    #[error("Channel is not mutually attested")]
    NotMutuallyAttested,

    /// Caller is not the designated administrator.
    #[error("Not authorized")]
    NotAuthorized,

    /// The attested commit does not match the channel's required commit.
    #[error("Wrong commit")]
    WrongCommit,

    /// The attested repository does not match the channel's required
    /// repository.
    #[error("Repository mismatch")]
    RepoMismatch,

    /// A store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    StorePoisoned,
}
