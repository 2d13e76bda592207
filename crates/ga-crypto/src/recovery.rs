//! # ECDSA Signer Recovery (secp256k1)
//!
//! Recovers a canonical 20-byte identity from a fixed-length 65-byte
//! signature over a known digest.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must be strictly less than n/2
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **Constant-Time Comparisons**: scalar checks use the `subtle` crate

use crate::errors::CryptoError;
use crate::hashing::keccak256;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use shared_types::{Address, Hash};
use subtle::{Choice, ConstantTimeEq};

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for the malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Byte length of a recoverable signature: r || s || v.
pub const SIGNATURE_LEN: usize = 65;

/// A recoverable ECDSA signature in r || s || v form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature65 {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl Signature65 {
    /// Parse from 65 raw bytes. Fails `InvalidSignature` on any other length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CryptoError::InvalidSignature);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Serialize back to 65 bytes.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

/// Recover the signer identity from a 65-byte signature over `digest`.
///
/// Validations performed before recovery:
/// 1. R and S are in [1, n-1] per SEC1
/// 2. S is in the lower half of the order (EIP-2)
/// 3. v is one of {0, 1, 27, 28}
pub fn recover_signer(digest: &Hash, signature: &[u8]) -> Result<Address, CryptoError> {
    let sig = Signature65::from_bytes(signature)?;

    if !is_valid_scalar(&sig.r) || !is_valid_scalar(&sig.s) {
        return Err(CryptoError::InvalidSignature);
    }
    if !is_low_s(&sig.s) {
        return Err(CryptoError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(sig.v)?;

    recover_unchecked(digest, &sig, recovery_id)
}

/// Recovery after scalar validation has passed.
fn recover_unchecked(
    digest: &Hash,
    sig: &Signature65,
    recovery_id: RecoveryId,
) -> Result<Address, CryptoError> {
    use zeroize::Zeroize;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&sig.r);
    sig_bytes[32..].copy_from_slice(&sig.s);

    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let parsed = parsed.map_err(|_| CryptoError::InvalidSignature)?;

    let recovered = VerifyingKey::recover_from_prehash(digest, &parsed, recovery_id)
        .map_err(|_| CryptoError::InvalidSignature)?;

    Ok(identity_from_verifying_key(&recovered))
}

/// Canonical identity of a public key: last 20 bytes of
/// keccak256(uncompressed point without the 0x04 prefix).
pub fn identity_from_verifying_key(key: &VerifyingKey) -> Address {
    let encoded = key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Constant-time check that S is strictly below half the curve order.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((s[i] < SECP256K1_HALF_ORDER[i]) as u8);
        let byte_greater = Choice::from((s[i] > SECP256K1_HALF_ORDER[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less.into()
}

/// Constant-time check that a scalar is in [1, n-1].
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((scalar[i] < SECP256K1_ORDER[i]) as u8);
        let byte_greater = Choice::from((scalar[i] > SECP256K1_ORDER[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!is_zero & less).into()
}

/// Normalize the recovery id encoding. Valid v values: 0, 1, 27, 28.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(CryptoError::InvalidSignature),
    };

    RecoveryId::try_from(id).map_err(|_| CryptoError::InvalidSignature)
}
