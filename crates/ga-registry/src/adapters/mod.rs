//! Adapters: in-memory store and the mock proof verifier.

pub mod memory;
pub mod mock_prover;
