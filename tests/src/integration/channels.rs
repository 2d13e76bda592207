//! # Attestation Channel Flows
//!
//! The two-party disclosure scenario: a repository build proves one side, an
//! enclave delegation chain proves the other, and payloads unlock only once
//! both are in.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use ga_crypto::CryptoError;
    use ga_registry::{Attestation, ChannelConstraints, GroupAuthApi, RegistryError};
    use shared_types::{AppId, ChannelId, Hash};

    const REPO: Hash = [0x22; 32];
    const APP: AppId = [0x42; 20];

    fn attestation() -> Attestation {
        Attestation {
            artifact_hash: [0x11; 32],
            repo_hash: REPO,
            commit_sha: [0x33; 20],
        }
    }

    fn any_commit_constraints() -> ChannelConstraints {
        ChannelConstraints {
            required_repo_hash: REPO,
            required_commit_sha: [0; 20],
            required_app_id: APP,
        }
    }

    #[test]
    fn test_mutual_attestation_github_first() {
        init_tracing();
        let builder = ChainBuilder::new(APP);
        let service = service_with_root(builder.kms_root());
        let channel = ChannelId::new("demo");
        service
            .create_channel(channel.clone(), any_commit_constraints())
            .unwrap();

        service
            .register_github_side(
                &channel,
                &mock_proof(b"gh"),
                &inputs_for(&attestation()),
                b"build-secret".to_vec(),
            )
            .unwrap();
        assert!(!service.is_mutually_attested(&channel).unwrap());
        assert_eq!(
            service.get_payloads(&channel),
            Err(RegistryError::NotMutuallyAttested)
        );

        service
            .register_tee_side(&channel, &builder.prove(b"attest"), b"enclave-secret".to_vec())
            .unwrap();
        assert!(service.is_mutually_attested(&channel).unwrap());

        let (github, tee) = service.get_payloads(&channel).unwrap();
        assert_eq!(github, b"build-secret");
        assert_eq!(tee, b"enclave-secret");
    }

    /// Order independence: tee side first reaches the same state.
    #[test]
    fn test_mutual_attestation_tee_first() {
        let builder = ChainBuilder::new(APP);
        let service = service_with_root(builder.kms_root());
        let channel = ChannelId::new("demo");
        service
            .create_channel(channel.clone(), any_commit_constraints())
            .unwrap();

        service
            .register_tee_side(&channel, &builder.prove(b"attest"), b"enclave-secret".to_vec())
            .unwrap();
        assert!(!service.is_mutually_attested(&channel).unwrap());

        service
            .register_github_side(
                &channel,
                &mock_proof(b"gh"),
                &inputs_for(&attestation()),
                b"build-secret".to_vec(),
            )
            .unwrap();

        let (github, tee) = service.get_payloads(&channel).unwrap();
        assert_eq!(github, b"build-secret");
        assert_eq!(tee, b"enclave-secret");
    }

    #[test]
    fn test_channel_ids_are_unique() {
        let service = service_with_root([0; 20]);
        let channel = ChannelId::new("demo");
        service
            .create_channel(channel.clone(), any_commit_constraints())
            .unwrap();
        assert_eq!(
            service.create_channel(channel, any_commit_constraints()),
            Err(RegistryError::ChannelExists)
        );
    }

    #[test]
    fn test_github_side_constraint_enforcement() {
        let service = service_with_root([0; 20]);

        // Pinned commit different from the attested one.
        let pinned = ChannelId::new("pinned");
        let mut constraints = any_commit_constraints();
        constraints.required_commit_sha = [0x77; 20];
        service.create_channel(pinned.clone(), constraints).unwrap();
        assert_eq!(
            service.register_github_side(
                &pinned,
                &mock_proof(b"gh"),
                &inputs_for(&attestation()),
                vec![],
            ),
            Err(RegistryError::WrongCommit)
        );

        // Wrong repository.
        let other_repo = ChannelId::new("other-repo");
        let mut constraints = any_commit_constraints();
        constraints.required_repo_hash = [0xEE; 32];
        service
            .create_channel(other_repo.clone(), constraints)
            .unwrap();
        assert_eq!(
            service.register_github_side(
                &other_repo,
                &mock_proof(b"gh"),
                &inputs_for(&attestation()),
                vec![],
            ),
            Err(RegistryError::RepoMismatch)
        );

        // A failed side attempt leaves the channel unattested and retryable.
        let mut pinned_att = attestation();
        pinned_att.commit_sha = [0x77; 20];
        service
            .register_github_side(&pinned, &mock_proof(b"gh"), &inputs_for(&pinned_att), vec![])
            .unwrap();
    }

    #[test]
    fn test_tee_side_must_prove_required_app() {
        // Chain is rooted correctly but delegates for a different app.
        let builder = ChainBuilder::new([0x99; 20]);
        let service = service_with_root(builder.kms_root());
        let channel = ChannelId::new("strict-app");
        service
            .create_channel(channel.clone(), any_commit_constraints())
            .unwrap();

        assert!(matches!(
            service.register_tee_side(&channel, &builder.prove(b"attest"), vec![]),
            Err(RegistryError::Crypto(CryptoError::InvalidSignatureChain { .. }))
        ));
        assert!(!service.is_mutually_attested(&channel).unwrap());

        // The right app succeeds afterwards.
        let good = ChainBuilder {
            kms_key: builder.kms_key,
            ..ChainBuilder::new(APP)
        };
        service
            .register_tee_side(&channel, &good.prove(b"attest"), vec![])
            .unwrap();
    }

    #[test]
    fn test_unknown_channel_everywhere() {
        let service = service_with_root([0; 20]);
        let ghost = ChannelId::new("ghost");
        assert_eq!(
            service.register_github_side(
                &ghost,
                &mock_proof(b"gh"),
                &inputs_for(&attestation()),
                vec![],
            ),
            Err(RegistryError::ChannelNotFound)
        );
        assert_eq!(
            service.is_mutually_attested(&ghost),
            Err(RegistryError::ChannelNotFound)
        );
        assert_eq!(
            service.get_payloads(&ghost),
            Err(RegistryError::ChannelNotFound)
        );
    }
}
