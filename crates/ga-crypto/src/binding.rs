//! # Certificate Binding
//!
//! Ties opaque certificate bytes to a decoded artifact hash and checks
//! required fields by literal byte search. There is deliberately no parser
//! here: callers trust only what the content digest binds, and re-derive any
//! field they need by brute-force substring search over the exact bytes that
//! were hashed. A field pattern must carry its own delimiters (quotes,
//! colon), so unrelated adjacent text containing the same literal value can
//! never satisfy a check.

use crate::errors::{CertField, CryptoError};
use crate::hashing::sha256;
use shared_types::Hash;
use subtle::ConstantTimeEq;

/// Exact content-digest binding: SHA-256 of the certificate bytes must equal
/// `expected`, compared constant-time over the full 32 bytes.
pub fn verify_binding(cert: &[u8], expected: &Hash) -> bool {
    let digest = sha256(cert);
    digest.ct_eq(expected).into()
}

/// Literal byte-substring search. No normalization, no parsing.
pub fn contains_field(cert: &[u8], pattern: &[u8]) -> bool {
    if pattern.is_empty() || pattern.len() > cert.len() {
        return false;
    }
    cert.windows(pattern.len()).any(|window| window == pattern)
}

/// Build the quoted `"key":"value"` pattern, delimiters included.
pub fn field_pattern(key: &str, value: &str) -> Vec<u8> {
    format!("\"{key}\":\"{value}\"").into_bytes()
}

/// The same pattern with a single space after the colon; certificate
/// serializers disagree on this, so both spellings are accepted.
fn field_pattern_spaced(key: &str, value: &str) -> Vec<u8> {
    format!("\"{key}\": \"{value}\"").into_bytes()
}

/// Require a quoted key/value pair to be present, accepting the two known
/// colon spacings. Fails `FieldMismatch` naming the field otherwise.
pub fn require_field(cert: &[u8], field: CertField, value: &str) -> Result<(), CryptoError> {
    let key = field.key();
    if contains_field(cert, &field_pattern(key, value))
        || contains_field(cert, &field_pattern_spaced(key, value))
    {
        Ok(())
    } else {
        Err(CryptoError::FieldMismatch(field))
    }
}

/// The shared binding pattern: digest equality first, then each required
/// field, in order. First failure wins.
pub fn bind_certificate(
    cert: &[u8],
    expected_digest: &Hash,
    required_fields: &[(CertField, &str)],
) -> Result<(), CryptoError> {
    if !verify_binding(cert, expected_digest) {
        return Err(CryptoError::CertificateMismatch);
    }
    for (field, value) in required_fields {
        require_field(cert, *field, value)?;
    }
    Ok(())
}
