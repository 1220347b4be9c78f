//! Base58 and Base58Check codecs.
//!
//! Bitcoin's textual envelope for addresses and dumped private keys: the
//! 58-character alphabet with one leading `1` per leading zero byte, and
//! the checked form `version ‖ payload ‖ first 4 bytes of SHA256d`.
//! Encoding and checksumming are delegated to [`bs58`]; this module pins
//! the envelope layout and maps failures into [`Error`].

use crate::error::Error;

/// Encodes `data` as Base58.
///
/// Leading zero bytes are preserved, one `'1'` character each.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decodes a Base58 string.
///
/// Any character outside the alphabet is rejected. Leading `'1'`
/// characters come back as leading zero bytes.
pub fn decode(input: &str) -> Result<Vec<u8>, Error> {
    Ok(bs58::decode(input).into_vec()?)
}

/// Encodes `version ‖ payload` as Base58Check.
///
/// The four checksum bytes are the leading bytes of
/// `SHA256(SHA256(version ‖ payload))`.
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    bs58::encode(payload)
        .with_check_version(version)
        .into_string()
}

/// Decodes a Base58Check string into its version byte and payload.
///
/// Fails on any Base58 error, on input too short to carry a checksum and
/// on checksum mismatch.
pub fn decode_check(input: &str) -> Result<(u8, Vec<u8>), Error> {
    let bytes = bs58::decode(input).with_check(None).into_vec()?;
    match bytes.split_first() {
        Some((version, payload)) => Ok((*version, payload.to_vec())),
        None => Err(Error::MissingVersion),
    }
}
