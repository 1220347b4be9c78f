//! A pure-Rust implementation of group operations on secp256k1.

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod mul;
pub(crate) mod scalar;
pub(crate) mod util;

use once_cell::sync::Lazy;

use field::FieldElement;

/// b = 7, the constant term of the curve equation y² = x³ + 7.
pub(crate) static CURVE_EQUATION_B: Lazy<FieldElement> = Lazy::new(|| FieldElement::from_u64(7));
