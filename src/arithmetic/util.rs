//! Helper functions.

use num_bigint::BigUint;

/// Serializes `value` as exactly 32 big-endian bytes, left-padding with
/// zeros.
///
/// # Panics
///
/// If `value` does not fit in 256 bits.
pub(crate) fn to_be_bytes_32(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    assert!(bytes.len() <= 32, "integer does not fit in 32 bytes");
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
