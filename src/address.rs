//! Bitcoin addresses.
//!
//! A legacy pay-to-pubkey-hash address is the Base58Check encoding of a
//! version byte followed by `RIPEMD160(SHA256(encoded public key))`.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::base58;
use crate::error::Error;
use crate::hashes;
use crate::key::Key;

/// The Bitcoin network a piece of key material belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// The production network.
    Mainnet,
    /// The test network.
    Testnet,
}

impl Network {
    /// The address version byte of this network.
    pub const fn address_version(self) -> u8 {
        match self {
            Network::Mainnet => 0,
            Network::Testnet => 111,
        }
    }

    /// The dumped-private-key (WIF) version byte of this network.
    pub const fn wif_version(self) -> u8 {
        match self {
            Network::Mainnet => 128,
            Network::Testnet => 239,
        }
    }

    /// Maps an address version byte back to its network.
    pub fn from_address_version(version: u8) -> Option<Self> {
        match version {
            0 => Some(Network::Mainnet),
            111 => Some(Network::Testnet),
            _ => None,
        }
    }
}

/// A legacy Bitcoin address: a version byte and the 20-byte HASH160 of
/// an encoded public key.
///
/// Equality and hashing look at the hash bytes only; a mainnet and a
/// testnet address over the same key hash compare equal.
#[derive(Clone, Debug)]
pub struct Address {
    version: u8,
    hash: [u8; 20],
}

impl Address {
    /// Derives the address of `key` on `network`, hashing the public
    /// point in compressed or uncompressed form.
    pub fn from_key(network: Network, key: &Key, compressed: bool) -> Self {
        Self {
            version: network.address_version(),
            hash: hashes::hash160(&key.to_encoded_point(compressed)),
        }
    }

    /// Wraps an existing HASH160.
    pub fn from_hash160(network: Network, hash: [u8; 20]) -> Self {
        Self {
            version: network.address_version(),
            hash,
        }
    }

    /// The version byte this address was parsed or built with.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The 20-byte key hash.
    pub fn hash160(&self) -> &[u8; 20] {
        &self.hash
    }

    /// The network implied by the version byte, or `None` for a version
    /// this library does not know.
    pub fn network(&self) -> Option<Network> {
        Network::from_address_version(self.version)
    }

    /// Does the version byte belong to a known network?
    pub fn is_valid(&self) -> bool {
        self.network().is_some()
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58::encode_check(self.version, &self.hash))
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses a Base58Check address string.
    ///
    /// Fails on Base58 errors, checksum mismatch and payloads that are
    /// not 20 bytes. An unknown version byte parses successfully but
    /// leaves [`Address::is_valid`] false.
    fn from_str(s: &str) -> Result<Self, Error> {
        let (version, payload) = base58::decode_check(s)?;
        let hash: [u8; 20] = payload
            .try_into()
            .map_err(|payload: Vec<u8>| Error::InvalidAddressLength(payload.len()))?;
        Ok(Self { version, hash })
    }
}
