//! Bitcoin key material.

use std::time::{SystemTime, UNIX_EPOCH};

use rand_core::{CryptoRng, RngCore};

use crate::arithmetic::affine::AffinePoint;
use crate::arithmetic::scalar::Scalar;
use crate::error::Error;

/// An elliptic curve key: a mandatory public point and, when the key can
/// sign, the secret scalar it was derived from.
///
/// Keys are immutable. Two keys are equal when their public points are
/// equal; the secret side and the creation timestamp do not participate
/// in comparisons.
#[derive(Clone, Debug)]
pub struct Key {
    secret: Option<Scalar>,
    public: AffinePoint,
    creation_time: Option<u64>,
}

impl Key {
    /// Generates a fresh keypair from `rng` and stamps it with the
    /// current Unix time.
    pub fn random(rng: &mut (impl CryptoRng + RngCore)) -> Self {
        let secret = Scalar::random(rng);
        let public = AffinePoint::generator().multiply(secret.inner());
        Self {
            secret: Some(secret),
            public,
            creation_time: unix_time_secs(),
        }
    }

    /// Builds a signing key from a secret scalar.
    ///
    /// The scalar must be in `[1, n-1]`; zero is rejected.
    pub fn from_secret_scalar(secret: Scalar) -> Result<Self, Error> {
        if secret.is_zero() {
            return Err(Error::InvalidSecretKey);
        }
        let public = AffinePoint::generator().multiply(secret.inner());
        Ok(Self {
            secret: Some(secret),
            public,
            creation_time: None,
        })
    }

    /// Builds a signing key from a 32-byte big-endian secret scalar.
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let secret = Scalar::from_bytes(bytes).ok_or(Error::InvalidSecretKey)?;
        Self::from_secret_scalar(secret)
    }

    /// Builds a watch-only key from a public point.
    ///
    /// The point at infinity is not a valid public key.
    pub fn from_public_point(public: AffinePoint) -> Result<Self, Error> {
        if public.is_identity() {
            return Err(Error::InvalidPublicKey);
        }
        Ok(Self {
            secret: None,
            public,
            creation_time: None,
        })
    }

    /// Returns a copy of this key carrying the given creation time, in
    /// seconds since the Unix epoch.
    pub fn with_creation_time(mut self, seconds: u64) -> Self {
        self.creation_time = Some(seconds);
        self
    }

    /// When this key was created, if known.
    pub fn creation_time(&self) -> Option<u64> {
        self.creation_time
    }

    /// The public point. Never the point at infinity.
    pub fn public_point(&self) -> &AffinePoint {
        &self.public
    }

    /// The secret scalar, when this key can sign.
    pub fn secret_scalar(&self) -> Option<&Scalar> {
        self.secret.as_ref()
    }

    /// Can this key produce signatures?
    pub fn can_sign(&self) -> bool {
        self.secret.is_some()
    }

    /// Returns the SEC1 encoding of the public point, 33 bytes when
    /// `compressed` and 65 otherwise.
    pub fn to_encoded_point(&self, compressed: bool) -> Vec<u8> {
        self.public.to_encoded_point(compressed)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for Key {}

impl core::hash::Hash for Key {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.public.hash(state);
    }
}

fn unix_time_secs() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|duration| duration.as_secs())
}
