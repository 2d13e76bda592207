//! # Registration Flows
//!
//! End-to-end member registration over both trust roots, the replay matrix
//! for observable proofs, and onboarding between registered members.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ga_crypto::{keccak256, CryptoError};
    use ga_registry::{Attestation, GroupAuthApi, RegistryError};
    use shared_types::{CodeId, CodeKind, MemberId};

    fn attestation() -> Attestation {
        Attestation {
            artifact_hash: [0x11; 32],
            repo_hash: [0x22; 32],
            commit_sha: [0x33; 20],
        }
    }

    #[test]
    fn test_zk_registration_end_to_end() {
        init_tracing();
        let service = service_with_root([0; 20]);
        let att = attestation();
        let code_id = CodeId::from_commit_sha(&att.commit_sha);
        service.add_allowed_code(ADMIN, code_id).unwrap();

        let proof = mock_proof(b"e2e");
        let key = keypair();
        let member_id = service
            .register_via_zk(
                &proof,
                &inputs_for(&att),
                &compressed(&key),
                &ownership_sig(&proof, &key),
                NOW,
            )
            .unwrap();

        // Member id is the digest of the presented key, and the record
        // carries everything needed for later audit.
        assert_eq!(member_id, MemberId(keccak256(&compressed(&key))));
        let member = service.get_member(&member_id).unwrap().unwrap();
        assert_eq!(member.code_id, code_id);
        assert_eq!(member.kind, CodeKind::CiCommit);
        assert_eq!(member.pubkey, compressed(&key).to_vec());
        assert_eq!(member.registered_at, NOW);
    }

    /// Same proof, different keys: each key registers once. A proof is
    /// evidence about code, not about a key, so witnessing it publicly must
    /// not let an observer register the prover's key.
    #[test]
    fn test_proof_reuse_matrix() {
        let service = service_with_root([0; 20]);
        let att = attestation();
        service
            .add_allowed_code(ADMIN, CodeId::from_commit_sha(&att.commit_sha))
            .unwrap();

        let proof = mock_proof(b"matrix");
        let inputs = inputs_for(&att);
        let key_a = keypair();
        let key_b = keypair();

        let member_a = service
            .register_via_zk(
                &proof,
                &inputs,
                &compressed(&key_a),
                &ownership_sig(&proof, &key_a),
                NOW,
            )
            .unwrap();

        // Replay with the same key loses.
        assert_eq!(
            service.register_via_zk(
                &proof,
                &inputs,
                &compressed(&key_a),
                &ownership_sig(&proof, &key_a),
                NOW,
            ),
            Err(RegistryError::AlreadyRegistered)
        );

        // A relayer who saw the proof but holds a different key cannot
        // forge the ownership signature of key_b's identity.
        assert_eq!(
            service.register_via_zk(
                &proof,
                &inputs,
                &compressed(&key_b),
                &ownership_sig(&proof, &key_a),
                NOW,
            ),
            Err(RegistryError::Crypto(CryptoError::InvalidSignature))
        );

        // The legitimate holder of key_b registers fine with the same proof.
        let member_b = service
            .register_via_zk(
                &proof,
                &inputs,
                &compressed(&key_b),
                &ownership_sig(&proof, &key_b),
                NOW,
            )
            .unwrap();
        assert_ne!(member_a, member_b);
    }

    #[test]
    fn test_zk_registration_rejects_unlisted_commit() {
        let service = service_with_root([0; 20]);
        let att = attestation();
        let proof = mock_proof(b"unlisted");
        let key = keypair();
        assert_eq!(
            service.register_via_zk(
                &proof,
                &inputs_for(&att),
                &compressed(&key),
                &ownership_sig(&proof, &key),
                NOW,
            ),
            Err(RegistryError::CodeNotAllowed)
        );
    }

    #[test]
    fn test_chain_registration_end_to_end() {
        let app_id = [0x42; 20];
        let builder = crate::fixtures::ChainBuilder::new(app_id);
        let service = service_with_root(builder.kms_root());
        let code_id = CodeId::from_app_id(&app_id);
        service.add_allowed_code(ADMIN, code_id).unwrap();

        let proof = builder.prove(b"enclave-register");
        let member_id = service
            .register_via_signature_chain(code_id, &proof, NOW)
            .unwrap();
        assert_eq!(member_id, MemberId(keccak256(&builder.derived_pubkey())));

        let member = service.get_member(&member_id).unwrap().unwrap();
        assert_eq!(member.kind, CodeKind::EnclaveApp);
        assert_eq!(member.pubkey, builder.derived_pubkey().to_vec());
    }

    #[test]
    fn test_chain_registration_wrong_root_rejected() {
        let app_id = [0x42; 20];
        let builder = crate::fixtures::ChainBuilder::new(app_id);
        // Registry trusts a different KMS root than the one that issued.
        let service = service_with_root([0x99; 20]);
        let code_id = CodeId::from_app_id(&app_id);
        service.add_allowed_code(ADMIN, code_id).unwrap();

        assert!(matches!(
            service.register_via_signature_chain(code_id, &builder.prove(b"m"), NOW),
            Err(RegistryError::Crypto(CryptoError::InvalidSignatureChain { .. }))
        ));
    }

    #[test]
    fn test_revoked_code_blocks_new_registrations() {
        let service = service_with_root([0; 20]);
        let att = attestation();
        let code_id = CodeId::from_commit_sha(&att.commit_sha);
        service.add_allowed_code(ADMIN, code_id).unwrap();

        let proof = mock_proof(b"revoke");
        let key_a = keypair();
        let member_a = service
            .register_via_zk(
                &proof,
                &inputs_for(&att),
                &compressed(&key_a),
                &ownership_sig(&proof, &key_a),
                NOW,
            )
            .unwrap();

        service.remove_allowed_code(ADMIN, code_id).unwrap();

        // Existing membership survives revocation; new registrations stop.
        assert!(service.is_member(&member_a).unwrap());
        let key_b = keypair();
        assert_eq!(
            service.register_via_zk(
                &proof,
                &inputs_for(&att),
                &compressed(&key_b),
                &ownership_sig(&proof, &key_b),
                NOW,
            ),
            Err(RegistryError::CodeNotAllowed)
        );
    }

    #[test]
    fn test_onboarding_between_registered_members() {
        let service = service_with_root([0; 20]);
        let att = attestation();
        service
            .add_allowed_code(ADMIN, CodeId::from_commit_sha(&att.commit_sha))
            .unwrap();

        let proof = mock_proof(b"onboard");
        let key_a = keypair();
        let key_b = keypair();
        let member_a = service
            .register_via_zk(
                &proof,
                &inputs_for(&att),
                &compressed(&key_a),
                &ownership_sig(&proof, &key_a),
                NOW,
            )
            .unwrap();
        let member_b = service
            .register_via_zk(
                &proof,
                &inputs_for(&att),
                &compressed(&key_b),
                &ownership_sig(&proof, &key_b),
                NOW,
            )
            .unwrap();

        service
            .onboard(member_a, member_b, b"wrapped-group-key".to_vec())
            .unwrap();
        service.onboard(member_a, member_b, b"rotation".to_vec()).unwrap();

        let inbox = service.get_onboarding(&member_b).unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].from_member, member_a);
        assert_eq!(inbox[0].encrypted_payload, b"wrapped-group-key");
        assert_eq!(inbox[1].encrypted_payload, b"rotation");

        // Non-members cannot send or receive.
        let ghost = MemberId([0xEE; 32]);
        assert_eq!(
            service.onboard(ghost, member_b, vec![]),
            Err(RegistryError::MemberNotFound)
        );
        assert_eq!(
            service.onboard(member_a, ghost, vec![]),
            Err(RegistryError::MemberNotFound)
        );
    }
}
