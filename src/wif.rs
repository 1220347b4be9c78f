//! Dumped private keys (WIF).
//!
//! The `dumpprivkey` interchange format: Base58Check over the 32-byte
//! secret scalar, with a trailing `0x01` marker when the address belongs
//! to the compressed public key, under version byte 128 (mainnet) or
//! 239 (testnet).

use core::fmt;

use crate::address::Network;
use crate::base58;
use crate::error::Error;
use crate::key::Key;

/// A parsed or freshly built WIF string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wif {
    network: Network,
    secret: [u8; 32],
    compressed: bool,
}

impl Wif {
    /// Dumps the secret scalar of `key` for `network`.
    ///
    /// # Panics
    ///
    /// If `key` is watch-only, i.e. carries no secret scalar.
    pub fn from_key(network: Network, key: &Key, compressed: bool) -> Self {
        let Some(secret) = key.secret_scalar() else {
            panic!("dumping a private key requires a key with a secret scalar");
        };
        Self {
            network,
            secret: secret.to_bytes(),
            compressed,
        }
    }

    /// Parses a WIF string, insisting that it belongs to `expected`.
    ///
    /// Fails on Base58/checksum errors, on a version byte that is not
    /// the WIF version of `expected`, and on payloads that are neither
    /// 32 bytes nor 33 bytes ending in `0x01`.
    pub fn parse(expected: Network, input: &str) -> Result<Self, Error> {
        let (version, payload) = base58::decode_check(input)?;
        if version != expected.wif_version() {
            return Err(Error::WrongNetwork {
                expected,
                actual: version,
            });
        }
        let (compressed, secret_bytes) = match payload.len() {
            32 => (false, &payload[..]),
            33 if payload[32] == 0x01 => (true, &payload[..32]),
            33 => return Err(Error::InvalidWifMarker(payload[32])),
            other => return Err(Error::InvalidWifLength(other)),
        };
        let mut secret = [0u8; 32];
        secret.copy_from_slice(secret_bytes);
        Ok(Self {
            network: expected,
            secret,
            compressed,
        })
    }

    /// The network this WIF belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Should addresses derived from this key hash the compressed
    /// public point?
    pub fn compressed(&self) -> bool {
        self.compressed
    }

    /// The raw 32-byte secret scalar.
    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret
    }

    /// Rebuilds the signing key this WIF dumps.
    pub fn to_key(&self) -> Result<Key, Error> {
        Key::from_secret_bytes(&self.secret)
    }
}

impl fmt::Display for Wif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = Vec::with_capacity(33);
        payload.extend_from_slice(&self.secret);
        if self.compressed {
            payload.push(0x01);
        }
        f.write_str(&base58::encode_check(self.network.wif_version(), &payload))
    }
}
