//! Arithmetic core for pairing-friendly elliptic curves.
//!
//! The crate provides the two source groups G1 and G2 of a pairing-friendly
//! curve in several coordinate systems (affine, Jacobian, extended XYZZ),
//! endomorphism-accelerated scalar multiplication, a parallel Pippenger
//! multi-scalar multiplication engine, and the ZCash/IETF-style point
//! serialization with mandatory subgroup validation.
//!
//! The design is variable-time and performance-first: scalars are treated as
//! public data, as is usual for SNARK provers and polynomial commitment
//! schemes where MSM over public bases dominates runtime.

#[macro_use]
extern crate derivative;

#[macro_use]
extern crate lazy_static;

pub mod biginteger;
pub use self::biginteger::{BigInteger, BigInteger256, BigInteger384};

pub mod fields;
pub use self::fields::{Field, FpParameters, LegendreSymbol, PrimeField, SquareRootField};

pub mod bytes;
pub use self::bytes::{FromBytes, ToBytes};

pub mod curves;
pub use self::curves::models::{
    short_weierstrass_jacobian::{GroupAffine, GroupExtended, GroupProjective},
    LatticeBasis, ModelParameters, SWModelParameters,
};

pub mod error;
pub use self::error::SerializationError;

pub mod msm;
pub use self::msm::{FixedBaseMSM, VariableBaseMSM};

pub mod serialize;
pub use self::serialize::{Decoder, EncodableField, Encoder};

use rand::Rng;

/// Types that can be sampled uniformly at random from an RNG.
pub trait UniformRand: Sized {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self;
}
