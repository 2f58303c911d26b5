use crate::biginteger::{BigInteger, BigInteger256};
use crate::bytes::{FromBytes, ToBytes};
use crate::fields::{Field, FpParameters, PrimeField, SquareRootField};

/// Marker for parameters of a prime field with a 4-limb (≤ 256 bit) modulus.
pub trait Fp256Parameters: FpParameters<BigInt = BigInteger256> {}

impl_prime_field!(Fp256, Fp256Parameters, BigInteger256, 4);
