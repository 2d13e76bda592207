//! # Mock Proof Verifier
//!
//! Reference `ProofVerifier` adapter until a real circuit backend is wired.
//! Accepts proofs carrying a magic prefix and decodes the fixed public-input
//! layout; everything else fails `InvalidProof`. The layout decode is the
//! same one a real backend adapter performs after its pairing checks.

use crate::domain::entities::{Attestation, FieldElement, PUBLIC_INPUT_LEN};
use crate::domain::errors::RegistryError;
use crate::ports::outbound::ProofVerifier;

/// Prefix a proof must carry for the mock to accept it.
pub const MOCK_PROOF_MAGIC: &[u8] = b"groupauth-mock-proof:";

/// Mock of the external zero-knowledge verifier.
#[derive(Debug, Clone, Default)]
pub struct MockProofVerifier;

impl MockProofVerifier {
    /// Create a new mock verifier.
    pub fn new() -> Self {
        Self
    }
}

impl ProofVerifier for MockProofVerifier {
    fn verify_and_decode(
        &self,
        proof: &[u8],
        public_inputs: &[FieldElement],
    ) -> Result<Attestation, RegistryError> {
        if !proof.starts_with(MOCK_PROOF_MAGIC) {
            return Err(RegistryError::InvalidProof);
        }
        Attestation::from_public_inputs(public_inputs)
    }
}

/// Encode an attestation into the fixed public-input layout, one byte per
/// element. Fixture support for tests and demos; a real prover emits these
/// from the circuit.
pub fn encode_attestation(attestation: &Attestation) -> Vec<FieldElement> {
    let mut inputs = vec![[0u8; 32]; PUBLIC_INPUT_LEN];
    for (i, element) in inputs.iter_mut().enumerate() {
        element[31] = match i {
            0..=31 => attestation.artifact_hash[i],
            32..=63 => attestation.repo_hash[i - 32],
            _ => attestation.commit_sha[i - 64],
        };
    }
    inputs
}
