//! Scalar arithmetic modulo the group order n.

use num_bigint::BigUint;
use num_traits::Zero;
use once_cell::sync::Lazy;
use rand_core::{CryptoRng, RngCore};

use super::util::to_be_bytes_32;

const ORDER_HEX: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141";

/// The order n of the secp256k1 base point.
pub(crate) static ORDER: Lazy<BigUint> =
    Lazy::new(|| BigUint::parse_bytes(ORDER_HEX.as_bytes(), 16).expect("order literal parses"));

/// n >> 1, the boundary between low and high scalars.
pub(crate) static FRAC_ORDER_2: Lazy<BigUint> = Lazy::new(|| &*ORDER >> 1u32);

/// Exponent for Fermat inversion, n - 2.
static INVERSION_EXPONENT: Lazy<BigUint> = Lazy::new(|| &*ORDER - 2u32);

/// An integer modulo the group order n.
///
/// The wrapped value is always fully reduced, `0 ≤ v < n`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scalar(BigUint);

impl Scalar {
    /// Wraps `value` if it is already below the group order.
    pub fn new(value: BigUint) -> Option<Self> {
        (value < *ORDER).then(|| Self(value))
    }

    /// Reduces an arbitrary nonnegative integer modulo n.
    pub fn reduce(value: BigUint) -> Self {
        Self(value % &*ORDER)
    }

    /// Returns the zero scalar.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Parses a 32-byte big-endian serialization.
    ///
    /// Returns `None` if the value is not below the group order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::new(BigUint::from_bytes_be(bytes))
    }

    /// Returns the 32-byte big-endian serialization of this scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        to_be_bytes_32(&self.0)
    }

    pub(crate) fn inner(&self) -> &BigUint {
        &self.0
    }

    pub(crate) fn into_inner(self) -> BigUint {
        self.0
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Is this scalar in the high half of the order, i.e. above n/2?
    pub fn is_high(&self) -> bool {
        self.0 > *FRAC_ORDER_2
    }

    /// Returns `self + rhs (mod n)`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self((&self.0 + &rhs.0) % &*ORDER)
    }

    /// Returns `self * rhs (mod n)`.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self((&self.0 * &rhs.0) % &*ORDER)
    }

    /// Returns `-self (mod n)`.
    pub fn negate(&self) -> Self {
        Self((&*ORDER - &self.0) % &*ORDER)
    }

    /// Returns the multiplicative inverse, or `None` for zero.
    pub fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(Self(self.0.modpow(&INVERSION_EXPONENT, &ORDER)))
    }

    /// Draws a uniform scalar in `[1, n-1]` from `rng` by rejection
    /// sampling.
    pub fn random(rng: &mut (impl CryptoRng + RngCore)) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let candidate = BigUint::from_bytes_be(&bytes);
            if !candidate.is_zero() && candidate < *ORDER {
                return Self(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scalar(value: u64) -> Scalar {
        Scalar::reduce(BigUint::from(value))
    }

    #[test]
    fn new_rejects_order() {
        assert!(Scalar::new(ORDER.clone()).is_none());
        assert!(Scalar::new(&*ORDER - 1u32).is_some());
        assert!(Scalar::new(BigUint::zero()).is_some());
    }

    #[test]
    fn reduce_wraps() {
        assert_eq!(Scalar::reduce(ORDER.clone()), Scalar::zero());
        assert_eq!(Scalar::reduce(&*ORDER + 5u32), scalar(5));
    }

    #[test]
    fn negate() {
        assert_eq!(Scalar::zero().negate(), Scalar::zero());
        let five = scalar(5);
        assert_eq!(five.add(&five.negate()), Scalar::zero());
    }

    #[test]
    fn invert() {
        assert!(Scalar::zero().invert().is_none());
        let seven = scalar(7);
        assert_eq!(seven.invert().unwrap().mul(&seven), scalar(1));
    }

    #[test]
    fn high_boundary() {
        let half = Scalar::new(&*ORDER >> 1u32).unwrap();
        assert!(!half.is_high());
        assert!(half.add(&scalar(1)).is_high());
        assert!(!Scalar::zero().is_high());
        assert!(Scalar::new(&*ORDER - 1u32).unwrap().is_high());
    }

    #[test]
    fn random_is_in_range() {
        let mut rng = rand_core::OsRng;
        for _ in 0..16 {
            let s = Scalar::random(&mut rng);
            assert!(!s.is_zero());
            assert!(*s.inner() < *ORDER);
        }
    }

    proptest! {
        #[test]
        fn fuzzy_bytes_round_trip(bytes in any::<[u8; 32]>()) {
            let s = Scalar::reduce(BigUint::from_bytes_be(&bytes));
            prop_assert_eq!(Scalar::from_bytes(&s.to_bytes()).unwrap(), s);
        }

        #[test]
        fn fuzzy_add_negate(bytes in any::<[u8; 32]>()) {
            let s = Scalar::reduce(BigUint::from_bytes_be(&bytes));
            prop_assert_eq!(s.add(&s.negate()), Scalar::zero());
        }
    }
}
