//! # Delegation Chain Properties
//!
//! Atomicity of the three-hop verification against realistic tampering, the
//! wire encoding of chain proofs, and certificate binding over JSON
//! documents produced the way a KMS would emit them.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ga_crypto::{
        bind_certificate, keccak256, sha256, verify_chain, CertField, ChainHop, CryptoError,
        SignatureChainProof,
    };
    use shared_types::AppId;

    const APP: AppId = [0x42; 20];

    fn expect_hop(result: Result<impl std::fmt::Debug, CryptoError>, expected: ChainHop) {
        match result {
            Err(CryptoError::InvalidSignatureChain { hop }) => assert_eq!(hop, expected),
            other => panic!("expected hop {expected} failure, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_chain_verifies() {
        let builder = ChainBuilder::new(APP);
        let proof = builder.prove(b"payload");
        let verified = verify_chain(&proof, &APP, &builder.kms_root()).unwrap();
        assert_eq!(verified.app_id, APP);
        assert_eq!(verified.derived_pubkey, builder.derived_pubkey());
    }

    /// Swapping any hop's signature for one from an unrelated key fails the
    /// whole chain at exactly that hop.
    #[test]
    fn test_hop_swap_matrix() {
        let builder = ChainBuilder::new(APP);
        let intruder = ChainBuilder::new(APP);
        let proof = builder.prove(b"payload");
        let foreign = intruder.prove(b"payload");
        let root = builder.kms_root();

        let mut bad = proof.clone();
        bad.app_signature = foreign.app_signature.clone();
        expect_hop(verify_chain(&bad, &APP, &root), ChainHop::AppDelegation);

        let mut bad = proof.clone();
        bad.kms_signature = foreign.kms_signature.clone();
        expect_hop(verify_chain(&bad, &APP, &root), ChainHop::KmsIssuance);

        let mut bad = proof.clone();
        bad.message_signature = foreign.message_signature.clone();
        expect_hop(verify_chain(&bad, &APP, &root), ChainHop::DerivedMessage);
    }

    #[test]
    fn test_purpose_is_part_of_delegation() {
        let builder = ChainBuilder::new(APP);
        let mut proof = builder.prove(b"payload");
        // The app signed "ethereum:<key>", not "solana:<key>".
        proof.purpose = "solana".to_string();
        expect_hop(
            verify_chain(&proof, &APP, &builder.kms_root()),
            ChainHop::AppDelegation,
        );
    }

    #[test]
    fn test_issuance_binds_the_app_identity() {
        let builder = ChainBuilder::new(APP);
        let proof = builder.prove(b"payload");
        expect_hop(
            verify_chain(&proof, &[0x99; 20], &builder.kms_root()),
            ChainHop::KmsIssuance,
        );
    }

    #[test]
    fn test_message_hash_is_bound() {
        let builder = ChainBuilder::new(APP);
        let mut proof = builder.prove(b"payload");
        proof.message_hash = keccak256(b"other payload");
        expect_hop(
            verify_chain(&proof, &APP, &builder.kms_root()),
            ChainHop::DerivedMessage,
        );
    }

    /// Chain proofs survive their JSON wire encoding byte for byte.
    #[test]
    fn test_chain_proof_wire_roundtrip() {
        let builder = ChainBuilder::new(APP);
        let proof = builder.prove(b"payload");

        let wire = serde_json::to_string(&proof).unwrap();
        let decoded: SignatureChainProof = serde_json::from_str(&wire).unwrap();
        assert_eq!(decoded, proof);
        verify_chain(&decoded, &APP, &builder.kms_root()).unwrap();
    }

    #[test]
    fn test_certificate_binding_over_kms_document() {
        let cert = serde_json::json!({
            "username": "build-bot",
            "recipient": "release-channel",
            "email": "bot@example.org",
            "issued_at": 1_700_000_000u64,
        })
        .to_string();
        let cert = cert.as_bytes();
        let digest = sha256(cert);

        bind_certificate(
            cert,
            &digest,
            &[
                (CertField::Username, "build-bot"),
                (CertField::Recipient, "release-channel"),
                (CertField::Email, "bot@example.org"),
            ],
        )
        .unwrap();

        // Digest over different bytes: rejected before any field check.
        assert_eq!(
            bind_certificate(cert, &sha256(b"other"), &[(CertField::Username, "build-bot")]),
            Err(CryptoError::CertificateMismatch)
        );

        // Right digest, wrong expected field value.
        assert_eq!(
            bind_certificate(cert, &digest, &[(CertField::Username, "someone-else")]),
            Err(CryptoError::FieldMismatch(CertField::Username))
        );
    }
}
