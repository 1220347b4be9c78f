//! The hash primitives Bitcoin key material is built from.
//!
//! Every function is a stateless one-shot over a fresh hasher, so the
//! whole module is safe to call concurrently from any number of threads.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Double SHA-256 of `data`, i.e. `SHA256(SHA256(data))`.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// Double SHA-256 of the concatenation `a ‖ b`, without materialising
/// the joined buffer.
pub fn sha256d_pair(a: &[u8], b: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    Sha256::digest(hasher.finalize()).into()
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// HASH160, `RIPEMD160(SHA256(data))`. This is the digest inside every
/// pay-to-pubkey-hash address.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}
