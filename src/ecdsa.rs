//! Elliptic Curve Digital Signature Algorithm (ECDSA) over secp256k1.
//!
//! Signing draws its nonce from a caller-supplied CSPRNG (or the system
//! RNG); verification and the two public key recovery modes are pure.
//! Freshly produced signatures are canonicalised into "low S" form as
//! described in [BIP 0062: Dealing with Malleability][1]; signatures from
//! elsewhere can be canonicalised with [`Signature::normalize_s`] and
//! verify either way.
//!
//! [1]: https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, OsRng, RngCore};

use crate::address::{Address, Network};
use crate::arithmetic::affine::AffinePoint;
use crate::arithmetic::field::{FieldElement, MODULUS};
use crate::arithmetic::mul::lincomb;
use crate::arithmetic::scalar::{Scalar, FRAC_ORDER_2, ORDER};
use crate::arithmetic::util::to_be_bytes_32;
use crate::hashes;
use crate::key::Key;

/// An ECDSA signature, the pair (r, s).
///
/// The type itself places no bounds on the components; [`is_valid`]
/// reports whether both lie in `[1, n-1]`, and [`verify`] rejects
/// anything that does not.
///
/// [`is_valid`]: Self::is_valid
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Builds a signature from its components.
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// The r component.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The s component.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Parses the fixed-size encoding, `r ‖ s` as 32-byte big-endian
    /// integers.
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        Self {
            r: BigUint::from_bytes_be(&bytes[..32]),
            s: BigUint::from_bytes_be(&bytes[32..]),
        }
    }

    /// Returns the fixed-size encoding, `r ‖ s` as 32-byte big-endian
    /// integers.
    ///
    /// # Panics
    ///
    /// If either component does not fit in 256 bits.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&to_be_bytes_32(&self.r));
        out[32..].copy_from_slice(&to_be_bytes_32(&self.s));
        out
    }

    /// Are both components in `[1, n-1]`?
    pub fn is_valid(&self) -> bool {
        !self.r.is_zero() && self.r < *ORDER && !self.s.is_zero() && self.s < *ORDER
    }

    /// Is the s component in the low half of the order?
    pub fn is_low_s(&self) -> bool {
        self.s <= *FRAC_ORDER_2
    }

    /// Returns the low-S form of this signature, replacing a high s with
    /// `n - s`. Both forms verify under the same key and message.
    pub fn normalize_s(&self) -> Self {
        if self.s > *FRAC_ORDER_2 && self.s < *ORDER {
            Self {
                r: self.r.clone(),
                s: &*ORDER - &self.s,
            }
        } else {
            self.clone()
        }
    }
}

/// Interprets `digest` as a big-endian integer, keeping only the
/// leftmost 256 bits when it is longer.
fn truncated_digest(digest: &[u8]) -> BigUint {
    let z = BigUint::from_bytes_be(digest);
    let bits = z.bits();
    if bits > 256 {
        z >> (bits - 256)
    } else {
        z
    }
}

/// Signs a message digest with the system RNG.
///
/// See [`sign_with_rng`].
pub fn sign(digest: &[u8], key: &Key) -> Signature {
    sign_with_rng(&mut OsRng, digest, key)
}

/// Signs a message digest, drawing the ephemeral nonce from `rng`.
///
/// The digest may be any length; only its leftmost 256 bits enter the
/// signature. The nonce is redrawn until both signature components are
/// nonzero, and the result is canonicalised to low-S form.
///
/// # Panics
///
/// If `key` is watch-only, i.e. carries no secret scalar.
pub fn sign_with_rng(
    rng: &mut (impl CryptoRng + RngCore),
    digest: &[u8],
    key: &Key,
) -> Signature {
    let Some(secret) = key.secret_scalar() else {
        panic!("signing requires a key with a secret scalar");
    };
    let z = Scalar::reduce(truncated_digest(digest));
    loop {
        let k = Scalar::random(rng);
        let point = &AffinePoint::generator() * &k;
        let Some((x, _)) = point.coordinates() else {
            continue;
        };
        let r = Scalar::reduce(x.inner().clone());
        if r.is_zero() {
            continue;
        }
        let Some(k_inv) = k.invert() else {
            continue;
        };
        let s = k_inv.mul(&z.add(&r.mul(secret)));
        if s.is_zero() {
            continue;
        }
        return Signature::new(r.into_inner(), s.into_inner()).normalize_s();
    }
}

/// Verifies `signature` over `digest` against a public point.
///
/// Structurally invalid input never errors; it verifies as `false`. The
/// public point must be finite, of order n, and the signature components
/// in `[1, n-1]`.
pub fn verify(digest: &[u8], signature: &Signature, public: &AffinePoint) -> bool {
    if public.is_identity() {
        return false;
    }
    if !public.multiply(&ORDER).is_identity() {
        return false;
    }
    if !signature.is_valid() {
        return false;
    }
    let (Some(r), Some(s)) = (
        Scalar::new(signature.r.clone()),
        Scalar::new(signature.s.clone()),
    ) else {
        return false;
    };
    let Some(w) = s.invert() else {
        return false;
    };
    let z = Scalar::reduce(truncated_digest(digest));
    let u1 = z.mul(&w);
    let u2 = r.mul(&w);
    let point = lincomb(&AffinePoint::generator(), u1.inner(), public, u2.inner());
    let Some((x, _)) = point.coordinates() else {
        return false;
    };
    Scalar::reduce(x.inner().clone()) == r
}

/// Recovers the signing public key from a signature and its recovery id.
///
/// The recovery id encodes which of the up to four ephemeral points the
/// signer used: bit 0 selects the y parity, bit 1 selects whether r
/// overflowed the group order. Returns `None` when the id does not
/// correspond to a valid point for this signature.
///
/// # Panics
///
/// If `recovery_id` is not in `0..=3`.
pub fn recover(digest: &[u8], signature: &Signature, recovery_id: u8) -> Option<AffinePoint> {
    assert!(recovery_id < 4, "recovery id must be in 0..=3");
    if !signature.is_valid() {
        return None;
    }
    let x = &signature.r + &*ORDER * u64::from(recovery_id >> 1);
    if x >= *MODULUS {
        return None;
    }
    let ephemeral = AffinePoint::decompress(&FieldElement::new(x), (recovery_id & 1) == 1)?;
    if !ephemeral.multiply(&ORDER).is_identity() {
        return None;
    }
    candidate_from_ephemeral(digest, signature, &ephemeral)
}

/// Recovers the signing public key by matching against a target address.
///
/// Enumerates the same candidates as [`recover`], rebuilding a Bitcoin
/// address from each under both compression choices on the network of
/// the supplied address, and returns the first candidate whose address
/// matches. Returns `None` when no candidate does.
pub fn recover_from_address(
    digest: &[u8],
    signature: &Signature,
    address: &Address,
) -> Option<AffinePoint> {
    if !signature.is_valid() {
        return None;
    }
    let network = address.network().unwrap_or(Network::Mainnet);
    for overflowed in 0..=1u64 {
        let x = &signature.r + &*ORDER * overflowed;
        if x >= *MODULUS {
            continue;
        }
        let Some(mut ephemeral) = AffinePoint::decompress(&FieldElement::new(x), false) else {
            continue;
        };
        if !ephemeral.multiply(&ORDER).is_identity() {
            continue;
        }
        for _parity in 0..2 {
            if let Some(candidate) = candidate_from_ephemeral(digest, signature, &ephemeral) {
                for compressed in [true, false] {
                    let hash = hashes::hash160(&candidate.to_encoded_point(compressed));
                    if Address::from_hash160(network, hash) == *address {
                        return Some(candidate);
                    }
                }
            }
            ephemeral = ephemeral.negate();
        }
    }
    None
}

/// Computes the public key candidate `r⁻¹·s·R - r⁻¹·z·G` for a given
/// ephemeral point R.
fn candidate_from_ephemeral(
    digest: &[u8],
    signature: &Signature,
    ephemeral: &AffinePoint,
) -> Option<AffinePoint> {
    let z = Scalar::reduce(truncated_digest(digest));
    let r = Scalar::reduce(signature.r.clone());
    let s = Scalar::reduce(signature.s.clone());
    let r_inv = r.invert()?;
    let sr_inv = r_inv.mul(&s);
    let er_inv = r_inv.mul(&z.negate());
    Some(lincomb(
        ephemeral,
        sr_inv.inner(),
        &AffinePoint::generator(),
        er_inv.inner(),
    ))
}
