#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

mod arithmetic;

pub mod address;
pub mod base58;
pub mod ecdsa;
pub mod error;
pub mod hashes;
pub mod key;
pub mod wif;

pub use crate::{
    address::{Address, Network},
    arithmetic::{affine::AffinePoint, field::FieldElement, scalar::Scalar},
    ecdsa::Signature,
    error::Error,
    key::Key,
    wif::Wif,
};

pub use num_bigint;
pub use rand_core;
