//! Error types.

use crate::address::Network;

/// Decoding and validation errors for externally supplied material.
///
/// Everything in here is recoverable: it describes malformed input, not a
/// bug in the caller. API misuse (out-of-range field values, signing
/// without a secret scalar and the like) panics instead, and the panics
/// are documented on the operations that raise them.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Base58 decoding failed (bad character, truncated input or a
    /// Base58Check checksum mismatch).
    #[error("base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    /// A Base58Check payload contained no version byte.
    #[error("versioned payload is empty")]
    MissingVersion,

    /// An SEC1 point encoding began with an unknown prefix byte.
    #[error("invalid SEC1 prefix {0:#04x}")]
    InvalidSec1Prefix(u8),

    /// An SEC1 point encoding had the wrong length for its prefix.
    #[error("invalid SEC1 encoding length {0}")]
    InvalidSec1Length(usize),

    /// A serialized coordinate was not a canonical base field element.
    #[error("coordinate is not a canonical field element")]
    NonCanonicalCoordinate,

    /// A compressed x-coordinate has no matching point on the curve.
    #[error("x-coordinate is not on the curve")]
    InvalidXCoordinate,

    /// An address payload was not the 20 bytes of a HASH160.
    #[error("address payload must be 20 bytes, got {0}")]
    InvalidAddressLength(usize),

    /// A WIF payload was neither 32 nor 33 bytes long.
    #[error("WIF payload must be 32 or 33 bytes, got {0}")]
    InvalidWifLength(usize),

    /// A 33-byte WIF payload did not end in the 0x01 compression marker.
    #[error("WIF compression marker must be 0x01, got {0:#04x}")]
    InvalidWifMarker(u8),

    /// A WIF version byte did not belong to the expected network.
    #[error("version byte {actual} does not match the {expected:?} network")]
    WrongNetwork {
        /// The network the caller asked to decode for.
        expected: Network,
        /// The version byte actually found.
        actual: u8,
    },

    /// A secret scalar was zero or not below the group order.
    #[error("secret scalar must be in [1, n-1]")]
    InvalidSecretKey,

    /// A public key was the point at infinity.
    #[error("public key cannot be the point at infinity")]
    InvalidPublicKey,
}
