//! # Crypto Errors
//!
//! Every verification failure is a distinct, named condition. Nothing here is
//! retryable: a rejected signature stays rejected.

use thiserror::Error;

/// The hop of a delegation chain that failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainHop {
    /// Application key vouching for the derived key.
    AppDelegation,
    /// KMS root vouching for the application key.
    KmsIssuance,
    /// Derived key signing the actual message.
    DerivedMessage,
}

impl std::fmt::Display for ChainHop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChainHop::AppDelegation => "app delegation",
            ChainHop::KmsIssuance => "kms issuance",
            ChainHop::DerivedMessage => "derived message",
        };
        f.write_str(name)
    }
}

/// A certificate field checked by the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertField {
    /// Account name of the attested identity.
    Username,
    /// Recipient bound into the certificate.
    Recipient,
    /// Email address bound into the certificate.
    Email,
}

impl CertField {
    /// The literal key this field appears under in certificate bytes.
    pub const fn key(&self) -> &'static str {
        match self {
            CertField::Username => "username",
            CertField::Recipient => "recipient",
            CertField::Email => "email",
        }
    }
}

impl std::fmt::Display for CertField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Cryptographic verification errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature is malformed (wrong length, invalid scalars, bad
    /// recovery id) or recovery failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature has a high S value (EIP-2 malleability protection).
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// The compressed public key is malformed or not a curve point.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// A hop of the key-delegation chain failed to verify.
    #[error("Invalid signature chain at {hop} hop")]
    InvalidSignatureChain {
        /// Which hop failed.
        hop: ChainHop,
    },

    /// Certificate bytes do not hash to the expected content digest.
    #[error("Certificate content digest mismatch")]
    CertificateMismatch,

    /// A required quoted key/value pair is absent from the certificate.
    #[error("Certificate field mismatch: {0}")]
    FieldMismatch(CertField),
}
