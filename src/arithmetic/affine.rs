//! Affine points on the secp256k1 curve.

use core::hash::{Hash, Hasher};
use core::ops::Neg;

use once_cell::sync::Lazy;

use super::field::FieldElement;
use super::CURVE_EQUATION_B;
use crate::error::Error;

static GENERATOR: Lazy<AffinePoint> = Lazy::new(|| {
    // Gₓ = 79be667e f9dcbbac 55a06295 ce870b07 029bfcdb 2dce28d9 59f2815b 16f81798
    // Gᵧ = 483ada77 26a3c465 5da4fbfc 0e1108a8 fd17b448 a6855419 9c47d08f fb10d4b8
    let x = FieldElement::from_bytes(&[
        0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b,
        0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8,
        0x17, 0x98,
    ])
    .expect("generator x literal is canonical");
    let y = FieldElement::from_bytes(&[
        0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08,
        0xa8, 0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10,
        0xd4, 0xb8,
    ])
    .expect("generator y literal is canonical");
    AffinePoint::new(x, y)
});

/// A point on the secp256k1 curve in affine coordinates, or the point at
/// infinity.
///
/// Points are immutable. Equality treats all representations of the
/// point at infinity as equal and compares finite points componentwise.
#[derive(Clone, Debug)]
pub struct AffinePoint {
    x: FieldElement,
    y: FieldElement,
    /// Is this the point at infinity?
    infinity: bool,
}

impl AffinePoint {
    /// Returns the additive identity of the group, the point at infinity.
    pub fn identity() -> Self {
        Self {
            x: FieldElement::zero(),
            y: FieldElement::zero(),
            infinity: true,
        }
    }

    /// Returns the base point of secp256k1.
    pub fn generator() -> Self {
        GENERATOR.clone()
    }

    /// Builds a finite point from raw coordinates.
    ///
    /// The coordinates are trusted: this constructor does not verify that
    /// `(x, y)` satisfies the curve equation. Feed it untrusted data only
    /// through [`decompress`] or [`from_encoded_point`].
    ///
    /// [`decompress`]: Self::decompress
    /// [`from_encoded_point`]: Self::from_encoded_point
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Returns the affine coordinates, or `None` for the identity.
    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        (!self.infinity).then_some((&self.x, &self.y))
    }

    /// Recovers the point with the given x-coordinate and y parity.
    ///
    /// Computes `y² = x³ + 7` and takes a square root; returns `None`
    /// when no point with this x-coordinate exists.
    pub fn decompress(x: &FieldElement, y_is_odd: bool) -> Option<Self> {
        let alpha = x.square().mul(x).add(&CURVE_EQUATION_B);
        let beta = alpha.sqrt()?;
        let y = if beta.is_odd() == y_is_odd {
            beta
        } else {
            beta.negate()
        };
        Some(Self::new(x.clone(), y))
    }

    /// Parses an SEC1-encoded point.
    ///
    /// Accepts the 1-byte identity form `[0x00]`, the 33-byte compressed
    /// form (`0x02`/`0x03` prefix) and the 65-byte uncompressed form
    /// (`0x04` prefix). Compressed x-coordinates are validated against
    /// the curve equation; uncompressed coordinates are taken at face
    /// value.
    pub fn from_encoded_point(bytes: &[u8]) -> Result<Self, Error> {
        match (bytes.first().copied(), bytes.len()) {
            (Some(0x00), 1) => Ok(Self::identity()),
            (Some(prefix @ (0x02 | 0x03)), 33) => {
                let mut x_bytes = [0u8; 32];
                x_bytes.copy_from_slice(&bytes[1..]);
                let x = FieldElement::from_bytes(&x_bytes).ok_or(Error::NonCanonicalCoordinate)?;
                Self::decompress(&x, prefix == 0x03).ok_or(Error::InvalidXCoordinate)
            }
            (Some(0x04), 65) => {
                let mut x_bytes = [0u8; 32];
                let mut y_bytes = [0u8; 32];
                x_bytes.copy_from_slice(&bytes[1..33]);
                y_bytes.copy_from_slice(&bytes[33..]);
                let x = FieldElement::from_bytes(&x_bytes).ok_or(Error::NonCanonicalCoordinate)?;
                let y = FieldElement::from_bytes(&y_bytes).ok_or(Error::NonCanonicalCoordinate)?;
                Ok(Self::new(x, y))
            }
            (Some(prefix), len) => {
                if matches!(prefix, 0x00 | 0x02 | 0x03 | 0x04) {
                    Err(Error::InvalidSec1Length(len))
                } else {
                    Err(Error::InvalidSec1Prefix(prefix))
                }
            }
            (None, _) => Err(Error::InvalidSec1Length(0)),
        }
    }

    /// Returns the SEC1 encoding of this point.
    ///
    /// The identity encodes as the single byte `0x00`; finite points
    /// encode as 33 bytes (prefix `0x03` when y is odd, `0x02` when
    /// even) or 65 bytes (prefix `0x04`).
    pub fn to_encoded_point(&self, compress: bool) -> Vec<u8> {
        if self.infinity {
            return vec![0x00];
        }
        if compress {
            let mut out = Vec::with_capacity(33);
            out.push(if self.y.is_odd() { 0x03 } else { 0x02 });
            out.extend_from_slice(&self.x.to_bytes());
            out
        } else {
            let mut out = Vec::with_capacity(65);
            out.push(0x04);
            out.extend_from_slice(&self.x.to_bytes());
            out.extend_from_slice(&self.y.to_bytes());
            out
        }
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        if self.infinity {
            return Self::identity();
        }
        Self::new(self.x.clone(), self.y.negate())
    }

    /// Returns `self + rhs` by the chord rule.
    pub fn add(&self, rhs: &Self) -> Self {
        if self.infinity {
            return rhs.clone();
        }
        if rhs.infinity {
            return self.clone();
        }
        if self.x == rhs.x {
            if self.y == rhs.y {
                return self.double();
            }
            // Equal x with different y means rhs = -self.
            return Self::identity();
        }
        let lambda = rhs.y.sub(&self.y).div(&rhs.x.sub(&self.x));
        let x3 = lambda.square().sub(&self.x).sub(&rhs.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        Self::new(x3, y3)
    }

    /// Returns `2·self` by the tangent rule.
    pub fn double(&self) -> Self {
        if self.infinity {
            return Self::identity();
        }
        // No finite point of y² = x³ + 7 over this field has y = 0, so
        // the tangent denominator 2y is always invertible.
        let lambda = FieldElement::from_u64(3)
            .mul(&self.x.square())
            .div(&FieldElement::from_u64(2).mul(&self.y));
        let x3 = lambda.square().sub(&self.x).sub(&self.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        Self::new(x3, y3)
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        match (self.infinity, other.infinity) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl Eq for AffinePoint {}

impl Hash for AffinePoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.infinity.hash(state);
        if !self.infinity {
            self.x.hash(state);
            self.y.hash(state);
        }
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use proptest::prelude::*;

    const UNCOMPRESSED_BASEPOINT: &[u8] = &hex!(
        "0479BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798
         483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
    );
    const COMPRESSED_BASEPOINT: &[u8] =
        &hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");

    fn is_on_curve(point: &AffinePoint) -> bool {
        match point.coordinates() {
            Some((x, y)) => y.square() == x.square().mul(x).add(&CURVE_EQUATION_B),
            None => false,
        }
    }

    #[test]
    fn generator_is_on_curve() {
        assert!(is_on_curve(&AffinePoint::generator()));
    }

    #[test]
    fn uncompressed_round_trip() {
        let point = AffinePoint::from_encoded_point(UNCOMPRESSED_BASEPOINT).unwrap();
        assert_eq!(point, AffinePoint::generator());
        assert_eq!(point.to_encoded_point(false), UNCOMPRESSED_BASEPOINT);
    }

    #[test]
    fn compressed_round_trip() {
        let point = AffinePoint::from_encoded_point(COMPRESSED_BASEPOINT).unwrap();
        assert_eq!(point, AffinePoint::generator());
        assert_eq!(point.to_encoded_point(true), COMPRESSED_BASEPOINT);
    }

    #[test]
    fn uncompressed_to_compressed() {
        let point = AffinePoint::from_encoded_point(UNCOMPRESSED_BASEPOINT).unwrap();
        assert_eq!(point.to_encoded_point(true), COMPRESSED_BASEPOINT);
    }

    #[test]
    fn compressed_to_uncompressed() {
        let point = AffinePoint::from_encoded_point(COMPRESSED_BASEPOINT).unwrap();
        assert_eq!(point.to_encoded_point(false), UNCOMPRESSED_BASEPOINT);
    }

    #[test]
    fn odd_parity_round_trip() {
        // 2G has an odd y-coordinate, so its compressed prefix is 0x03.
        let double = AffinePoint::generator().double();
        let encoded = double.to_encoded_point(true);
        assert_eq!(encoded[0], 0x03);
        assert_eq!(AffinePoint::from_encoded_point(&encoded).unwrap(), double);
    }

    #[test]
    fn identity_encoding() {
        let encoded = AffinePoint::identity().to_encoded_point(true);
        assert_eq!(encoded, [0x00]);
        assert!(AffinePoint::from_encoded_point(&encoded)
            .unwrap()
            .is_identity());
    }

    #[test]
    fn rejects_length_mutations() {
        for valid in [
            COMPRESSED_BASEPOINT.to_vec(),
            UNCOMPRESSED_BASEPOINT.to_vec(),
            vec![0x00],
        ] {
            let mut longer = valid.clone();
            longer.push(0x00);
            assert!(AffinePoint::from_encoded_point(&longer).is_err());

            let shorter = &valid[..valid.len() - 1];
            assert!(AffinePoint::from_encoded_point(shorter).is_err());
        }
    }

    #[test]
    fn rejects_unknown_prefix() {
        let mut encoded = COMPRESSED_BASEPOINT.to_vec();
        encoded[0] = 0x05;
        assert_eq!(
            AffinePoint::from_encoded_point(&encoded),
            Err(Error::InvalidSec1Prefix(0x05))
        );
        assert_eq!(
            AffinePoint::from_encoded_point(&[]),
            Err(Error::InvalidSec1Length(0))
        );
    }

    #[test]
    fn rejects_non_canonical_coordinate() {
        let mut encoded = vec![0x02];
        encoded.extend_from_slice(&[0xff; 32]);
        assert_eq!(
            AffinePoint::from_encoded_point(&encoded),
            Err(Error::NonCanonicalCoordinate)
        );
    }

    #[test]
    fn rejects_x_off_curve() {
        // x = 5: 5³ + 7 = 132 is a quadratic non-residue.
        let mut encoded = vec![0x02, 0u8];
        encoded.extend_from_slice(&[0u8; 30]);
        encoded.push(5);
        assert_eq!(encoded.len(), 33);
        assert_eq!(
            AffinePoint::from_encoded_point(&encoded),
            Err(Error::InvalidXCoordinate)
        );
    }

    #[test]
    fn uncompressed_is_taken_at_face_value() {
        // An off-curve (x, y) pair decodes fine in the 65-byte form.
        let mut encoded = vec![0x04];
        encoded.extend_from_slice(&[0u8; 31]);
        encoded.push(1);
        encoded.extend_from_slice(&[0u8; 31]);
        encoded.push(1);
        let point = AffinePoint::from_encoded_point(&encoded).unwrap();
        assert!(!is_on_curve(&point));
    }

    #[test]
    fn affine_negation() {
        let basepoint = AffinePoint::generator();
        assert_eq!(basepoint.negate().negate(), basepoint);
        assert!(basepoint.add(&basepoint.negate()).is_identity());
        assert!(AffinePoint::identity().negate().is_identity());
    }

    #[test]
    fn identity_is_additive_identity() {
        let g = AffinePoint::generator();
        let identity = AffinePoint::identity();
        assert_eq!(g.add(&identity), g);
        assert_eq!(identity.add(&g), g);
        assert_eq!(identity.add(&identity), identity);
    }

    #[test]
    fn double_matches_add() {
        let g = AffinePoint::generator();
        assert_eq!(g.double(), g.add(&g));
        assert!(is_on_curve(&g.double()));
        assert!(AffinePoint::identity().double().is_identity());
    }

    #[test]
    fn decompress_selects_requested_parity() {
        let g = AffinePoint::generator();
        let (x, y) = g.coordinates().map(|(x, y)| (x.clone(), y.clone())).unwrap();
        let even = AffinePoint::decompress(&x, false).unwrap();
        let odd = AffinePoint::decompress(&x, true).unwrap();
        assert_eq!(even, g);
        assert_eq!(odd, g.negate());
        assert!(!y.is_odd());
    }

    #[test]
    fn decompress_rejects_non_residue_x() {
        assert!(AffinePoint::decompress(&FieldElement::from_u64(5), false).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4))]

        #[test]
        fn fuzzy_sec1_round_trip(k in any::<[u8; 32]>()) {
            let k = num_bigint::BigUint::from_bytes_be(&k);
            let point = AffinePoint::generator().multiply(&k);
            if !point.is_identity() {
                for compress in [true, false] {
                    let encoded = point.to_encoded_point(compress);
                    let decoded = AffinePoint::from_encoded_point(&encoded).unwrap();
                    prop_assert_eq!(decoded, point.clone());
                }
            }
        }
    }
}
