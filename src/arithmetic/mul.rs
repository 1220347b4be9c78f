//! Variable-time scalar multiplication.

use core::ops::Mul;

use num_bigint::BigUint;
use num_traits::Zero;

use super::affine::AffinePoint;
use super::scalar::Scalar;

impl AffinePoint {
    /// Returns `[k] self`.
    ///
    /// Left-to-right double-and-add over the joint bits of `3k` and `k`
    /// (SEC1 D.3.2): wherever the bits differ, the set bit of `3k` asks
    /// for an addition and the set bit of `k` for a subtraction. The scan
    /// visits each bit once and performs roughly one addition per three
    /// doublings on average.
    pub fn multiply(&self, k: &BigUint) -> AffinePoint {
        if self.is_identity() || k.is_zero() {
            return AffinePoint::identity();
        }
        let h = k * 3u32;
        let negated = self.negate();
        let mut acc = self.clone();
        for i in (1..h.bits() - 1).rev() {
            acc = acc.double();
            let h_bit = h.bit(i);
            if h_bit != k.bit(i) {
                acc = acc.add(if h_bit { self } else { &negated });
            }
        }
        acc
    }
}

/// Calculates `[k] x + [l] y` with Shamir's trick: one shared ladder over
/// the joint bits of both scalars, with `x + y` precomputed.
pub(crate) fn lincomb(x: &AffinePoint, k: &BigUint, y: &AffinePoint, l: &BigUint) -> AffinePoint {
    let sum = x.add(y);
    let mut acc = AffinePoint::identity();
    for i in (0..k.bits().max(l.bits())).rev() {
        acc = acc.double();
        match (k.bit(i), l.bit(i)) {
            (true, true) => acc = acc.add(&sum),
            (true, false) => acc = acc.add(x),
            (false, true) => acc = acc.add(y),
            (false, false) => {}
        }
    }
    acc
}

impl Mul<&Scalar> for &AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: &Scalar) -> AffinePoint {
        self.multiply(scalar.inner())
    }
}
