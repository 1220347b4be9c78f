//! Field arithmetic modulo p = 2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1

use core::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;
use num_traits::Zero;
use once_cell::sync::Lazy;

use super::util::to_be_bytes_32;

const MODULUS_HEX: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F";

/// The field prime p.
pub(crate) static MODULUS: Lazy<BigUint> = Lazy::new(|| {
    BigUint::parse_bytes(MODULUS_HEX.as_bytes(), 16).expect("modulus literal parses")
});

/// Exponent for Fermat inversion, p - 2.
static INVERSION_EXPONENT: Lazy<BigUint> = Lazy::new(|| &*MODULUS - 2u32);

/// Square root exponent (p + 1) / 4, computed as (p >> 2) + 1.
///
/// p ≡ 3 (mod 4), so raising a quadratic residue to this power yields one
/// of its square roots.
static SQRT_EXPONENT: Lazy<BigUint> = Lazy::new(|| (&*MODULUS >> 2u32) + 1u32);

/// Cube root exponent (p + 2) / 9.
///
/// p ≡ 7 (mod 9), so raising a cubic residue to this power yields one of
/// its cube roots.
static CUBE_ROOT_EXPONENT: Lazy<BigUint> = Lazy::new(|| (&*MODULUS + 2u32) / 9u32);

/// β, a nontrivial cube root of unity in the field.
///
/// This is the constant behind the secp256k1 endomorphism
/// `λ·(x, y) = (β·x, y)`.
pub(crate) static CUBE_ROOT_OF_UNITY: Lazy<FieldElement> = Lazy::new(|| {
    FieldElement::new(
        BigUint::parse_bytes(
            b"7AE96A2B657C07106E64479EAC3434E99CF0497512F58995C1396C28719501EE",
            16,
        )
        .expect("cube root of unity literal parses"),
    )
});

/// β², the other nontrivial cube root of unity. β · β² = β³ = 1.
pub(crate) static CUBE_ROOT_OF_UNITY_SQR: Lazy<FieldElement> =
    Lazy::new(|| CUBE_ROOT_OF_UNITY.square());

/// An element of the secp256k1 base field.
///
/// The wrapped integer is always fully reduced, `0 ≤ v < p`. Elements are
/// immutable; every operation returns a fresh element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// Wraps `value` as a field element.
    ///
    /// # Panics
    ///
    /// If `value` is not below the field prime. Use [`from_bytes`] for
    /// untrusted input.
    ///
    /// [`from_bytes`]: Self::from_bytes
    pub fn new(value: BigUint) -> Self {
        assert!(value < *MODULUS, "field element value out of range");
        Self(value)
    }

    /// Returns the additive identity.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Returns the multiplicative identity.
    pub fn one() -> Self {
        Self(BigUint::from(1u32))
    }

    pub(crate) fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    /// Parses a 32-byte big-endian serialization.
    ///
    /// Returns `None` if the value is not a canonical field element.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let value = BigUint::from_bytes_be(bytes);
        (value < *MODULUS).then(|| Self(value))
    }

    /// Returns the 32-byte big-endian serialization of this element.
    pub fn to_bytes(&self) -> [u8; 32] {
        to_be_bytes_32(&self.0)
    }

    pub(crate) fn inner(&self) -> &BigUint {
        &self.0
    }

    /// Is this element zero?
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Is the reduced value odd?
    pub fn is_odd(&self) -> bool {
        self.0.bit(0)
    }

    /// Returns `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self((&self.0 + &rhs.0) % &*MODULUS)
    }

    /// Returns `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self((&*MODULUS + &self.0 - &rhs.0) % &*MODULUS)
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self((&*MODULUS - &self.0) % &*MODULUS)
    }

    /// Returns `self * rhs`.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self((&self.0 * &rhs.0) % &*MODULUS)
    }

    /// Returns `self²`.
    pub fn square(&self) -> Self {
        Self((&self.0 * &self.0) % &*MODULUS)
    }

    /// Returns `self / rhs`, i.e. `self · rhs⁻¹`.
    ///
    /// # Panics
    ///
    /// If `rhs` is zero.
    pub fn div(&self, rhs: &Self) -> Self {
        match rhs.invert() {
            Some(inverse) => self.mul(&inverse),
            None => panic!("division by zero field element"),
        }
    }

    /// Returns `self` raised to `exponent`.
    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self(self.0.modpow(exponent, &MODULUS))
    }

    /// Returns the multiplicative inverse, or `None` for zero.
    pub fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(self.pow(&INVERSION_EXPONENT))
    }

    /// Returns a square root of this element, or `None` if it is a
    /// quadratic non-residue.
    ///
    /// Since p ≡ 3 (mod 4) the candidate root is `self^((p+1)/4)`; it is
    /// accepted only if squaring it gives back `self`. The other root is
    /// the candidate's negation.
    pub fn sqrt(&self) -> Option<Self> {
        let candidate = self.pow(&SQRT_EXPONENT);
        (candidate.square() == *self).then_some(candidate)
    }

    /// Returns the three cube roots of this element, or `None` if it is
    /// a cubic non-residue.
    ///
    /// Write p - 1 = 9u + 6. For any v, `v^(3u+2)` is a cube root of
    /// unity, and it is 1 exactly when v is a cubic residue; in that case
    /// `c = v^(u+1) = v^((p+2)/9)` satisfies `c³ = v` and the full root
    /// set is `{c, c·β², c·β}` with β a nontrivial cube root of unity.
    ///
    /// Experimental: exposed because the derivation is useful, but not
    /// hardened for production use.
    pub fn cube_roots(&self) -> Option<[Self; 3]> {
        let candidate = self.pow(&CUBE_ROOT_EXPONENT);
        if candidate.square().mul(&candidate) != *self {
            return None;
        }
        let second = candidate.mul(&CUBE_ROOT_OF_UNITY_SQR);
        let third = candidate.mul(&CUBE_ROOT_OF_UNITY);
        Some([candidate, second, third])
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::add(self, rhs)
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::sub(self, rhs)
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::mul(self, rhs)
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}
