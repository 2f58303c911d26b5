use crate::biginteger::{BigInteger, BigInteger384};
use crate::bytes::{FromBytes, ToBytes};
use crate::fields::{Field, FpParameters, PrimeField, SquareRootField};

/// Marker for parameters of a prime field with a 6-limb (≤ 384 bit) modulus.
pub trait Fp384Parameters: FpParameters<BigInt = BigInteger384> {}

impl_prime_field!(Fp384, Fp384Parameters, BigInteger384, 6);
