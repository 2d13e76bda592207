//! # SEC1 Point Decompression (secp256k1)
//!
//! Recovers the full curve point behind a 33-byte compressed public key and
//! hashes it to a canonical 20-byte identity. The square root is computed by
//! modular exponentiation; secp256k1's field prime satisfies `p ≡ 3 mod 4`,
//! so the single-exponentiation fast path `y = (x³ + 7)^((p+1)/4) mod p`
//! applies.

use crate::errors::CryptoError;
use crate::hashing::keccak256;
use primitive_types::{U256, U512};
use shared_types::{Address, COMPRESSED_PUBKEY_LEN};

/// secp256k1 field prime p
/// p = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F
const FIELD_PRIME: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFC, 0x2F,
];

/// Curve coefficient b in y² = x³ + b.
const CURVE_B: u64 = 7;

/// Decompress a 1-byte-parity-prefixed SEC1 key and hash the uncompressed
/// point to a canonical identity.
///
/// Fails `InvalidPublicKey` if the prefix is not 0x02/0x03, the length is not
/// 33, x is not a field element, or x is not on the curve (x³ + 7 is a
/// quadratic non-residue).
pub fn decompress_and_identify(compressed: &[u8]) -> Result<Address, CryptoError> {
    if compressed.len() != COMPRESSED_PUBKEY_LEN {
        return Err(CryptoError::InvalidPublicKey);
    }
    let prefix = compressed[0];
    if prefix != 0x02 && prefix != 0x03 {
        return Err(CryptoError::InvalidPublicKey);
    }

    let p = U256::from_big_endian(&FIELD_PRIME);
    let x = U256::from_big_endian(&compressed[1..]);
    if x >= p {
        return Err(CryptoError::InvalidPublicKey);
    }

    // rhs = x³ + 7 mod p
    let x_sq = mul_mod(x, x, p);
    let rhs = add_mod(mul_mod(x_sq, x, p), U256::from(CURVE_B), p);

    // p ≡ 3 mod 4, so (rhs)^((p+1)/4) is a square root whenever one exists.
    let exponent = (p + U256::one()) >> 2;
    let mut y = pow_mod(rhs, exponent, p);

    // Non-residue: the candidate fails y² = rhs, so x is not on the curve.
    if mul_mod(y, y, p) != rhs {
        return Err(CryptoError::InvalidPublicKey);
    }

    // Select the root matching the prefix parity.
    let want_odd = prefix == 0x03;
    if y.bit(0) != want_odd {
        y = p - y;
    }

    let mut point = [0u8; 64];
    x.to_big_endian(&mut point[..32]);
    y.to_big_endian(&mut point[32..]);

    let hash = keccak256(&point);
    let mut identity = [0u8; 20];
    identity.copy_from_slice(&hash[12..]);
    Ok(identity)
}

/// (a * b) mod m, widening through 512 bits.
fn mul_mod(a: U256, b: U256, m: U256) -> U256 {
    let rem = a.full_mul(b) % U512::from(m);
    low_u256(rem)
}

/// (a + b) mod m, widening through 512 bits.
fn add_mod(a: U256, b: U256, m: U256) -> U256 {
    let rem = (U512::from(a) + U512::from(b)) % U512::from(m);
    low_u256(rem)
}

/// base^exp mod m by square-and-multiply, MSB first.
fn pow_mod(base: U256, exp: U256, m: U256) -> U256 {
    let mut result = U256::one();
    let base = base % m;
    for i in (0..exp.bits()).rev() {
        result = mul_mod(result, result, m);
        if exp.bit(i) {
            result = mul_mod(result, base, m);
        }
    }
    result
}

/// Truncate a U512 known to fit in 256 bits.
fn low_u256(x: U512) -> U256 {
    U256([x.0[0], x.0[1], x.0[2], x.0[3]])
}
