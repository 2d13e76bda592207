//! # GroupAuth Registry
//!
//! Stateful half of the GroupAuth engine: allow-listed code identities,
//! member registration over two independent trust roots, the peer onboarding
//! mailbox, two-party attestation channels, and write-once/forward-only
//! uniqueness bookkeeping.
//!
//! ## Architecture
//!
//! Hexagonal:
//! - **Domain Layer** (`domain/`): entities, state transitions, errors; pure
//! - **Ports Layer** (`ports/`): the inbound `GroupAuthApi` plus outbound
//!   store and prover traits
//! - **Adapters** (`adapters/`): in-memory store, mock proof verifier
//! - **Service Layer** (`service.rs`): wires domain logic to ports
//!
//! ## Trust model
//!
//! Verification sub-steps are pure functions of the inputs; only the final
//! state transition mutates the store, and the store's unique-key inserts
//! guarantee exactly one winner under concurrency. Nothing is ever deleted:
//! members, onboarding messages and claims are an audit trail.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::memory::InMemoryStore;
pub use adapters::mock_prover::{encode_attestation, MockProofVerifier, MOCK_PROOF_MAGIC};
pub use domain::entities::{
    Attestation, Channel, ChannelConstraints, FieldElement, GithubSide, Member, OnboardMessage,
    TeeSide, PUBLIC_INPUT_LEN,
};
pub use domain::errors::RegistryError;
pub use ports::inbound::GroupAuthApi;
pub use ports::outbound::{AllowListStore, ChannelStore, GuardStore, MemberStore, ProofVerifier};
pub use service::{GroupAuthService, RegistryConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
