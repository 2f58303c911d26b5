//! Field abstractions and the Montgomery prime-field models.
//!
//! The curve layer consumes fields through the [`Field`], [`PrimeField`] and
//! [`SquareRootField`] traits; the concrete models live in [`models`] and the
//! BLS12-381 instantiations in [`bls12_381`].

use crate::biginteger::BigInteger;
use crate::bytes::{FromBytes, ToBytes};
use crate::UniformRand;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[macro_use]
pub mod macros;

pub mod models;
pub use self::models::*;

pub mod bls12_381;

/// A general finite field element.
pub trait Field:
    'static
    + Copy
    + Clone
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Hash
    + PartialEq
    + ToBytes
    + FromBytes
    + UniformRand
    + Sized
    + Neg<Output = Self>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + MulAssign<Self>
    + DivAssign<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> Div<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
{
    fn zero() -> Self;

    fn is_zero(&self) -> bool;

    fn one() -> Self;

    fn is_one(&self) -> bool;

    fn double(&self) -> Self;

    fn double_in_place(&mut self) -> &mut Self;

    fn square(&self) -> Self;

    fn square_in_place(&mut self) -> &mut Self;

    /// Multiplicative inverse; `None` iff `self` is zero.
    fn inverse(&self) -> Option<Self>;

    fn inverse_in_place(&mut self) -> Option<&mut Self>;

    /// The `power`-th power of the Frobenius automorphism `x -> x^p`.
    fn frobenius_map(&mut self, power: usize);

    /// Exponentiation by a little-endian limb-encoded exponent.
    fn pow<S: AsRef<[u64]>>(&self, exp: S) -> Self {
        let mut res = Self::one();
        for i in BitIterator::new(exp) {
            res.square_in_place();
            if i {
                res *= self;
            }
        }
        res
    }
}

/// The parameters of a prime field of given modulus, in Montgomery form.
pub trait FpParameters: 'static + Send + Sync + Sized {
    type BigInt: BigInteger;

    /// The modulus `p`.
    const MODULUS: Self::BigInt;

    const MODULUS_BITS: u32;

    /// Unused bits in the top limb of a representation.
    const REPR_SHAVE_BITS: u32;

    /// Montgomery constant `2^(64·limbs) mod p`.
    const R: Self::BigInt;

    /// `R² mod p`, used to enter Montgomery form.
    const R2: Self::BigInt;

    /// `-p^{-1} mod 2^64`.
    const INV: u64;

    /// A multiplicative generator of the field (quadratic non-residue),
    /// in Montgomery form.
    const GENERATOR: Self::BigInt;

    /// Largest `s` with `2^s | p - 1`.
    const TWO_ADICITY: u32;

    /// `GENERATOR^T`, a `2^TWO_ADICITY`-th primitive root of unity, in
    /// Montgomery form.
    const ROOT_OF_UNITY: Self::BigInt;

    const MODULUS_MINUS_ONE_DIV_TWO: Self::BigInt;

    /// The odd `t` with `p - 1 = 2^TWO_ADICITY · t`.
    const T: Self::BigInt;

    const T_MINUS_ONE_DIV_TWO: Self::BigInt;
}

/// A prime field element with access to its representation.
///
/// The `Ord` bound compares regular (non-Montgomery) representations; the
/// point codec's lexicographic sign convention relies on it.
pub trait PrimeField: Field + SquareRootField + Ord {
    type Params: FpParameters<BigInt = Self::BigInt>;
    type BigInt: BigInteger;

    /// Interprets a representation, converting it into Montgomery form.
    /// Values at or above the modulus are reduced.
    fn from_repr(repr: Self::BigInt) -> Self;

    /// The regular (non-Montgomery) representation of this element.
    fn into_repr(&self) -> Self::BigInt;

    fn multiplicative_generator() -> Self {
        Self::from_mont(Self::Params::GENERATOR)
    }

    fn root_of_unity() -> Self {
        Self::from_mont(Self::Params::ROOT_OF_UNITY)
    }

    /// Wraps limbs that are already in Montgomery form.
    fn from_mont(repr: Self::BigInt) -> Self;

    fn size_in_bits() -> usize {
        Self::Params::MODULUS_BITS as usize
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum LegendreSymbol {
    Zero = 0,
    QuadraticResidue = 1,
    QuadraticNonResidue = -1,
}

impl LegendreSymbol {
    pub fn is_zero(&self) -> bool {
        *self == LegendreSymbol::Zero
    }

    pub fn is_qr(&self) -> bool {
        *self == LegendreSymbol::QuadraticResidue
    }

    pub fn is_qnr(&self) -> bool {
        *self == LegendreSymbol::QuadraticNonResidue
    }
}

/// Fields supporting square roots and quadratic residuosity tests.
pub trait SquareRootField: Field {
    fn legendre(&self) -> LegendreSymbol;

    /// A square root of `self`, if one exists.
    fn sqrt(&self) -> Option<Self>;

    fn sqrt_in_place(&mut self) -> Option<&mut Self>;
}

/// Iterates the bits of a limb slice from the most significant down.
#[derive(Debug)]
pub struct BitIterator<E> {
    t: E,
    n: usize,
}

impl<E: AsRef<[u64]>> BitIterator<E> {
    pub fn new(t: E) -> Self {
        let n = t.as_ref().len() * 64;
        BitIterator { t, n }
    }
}

impl<E: AsRef<[u64]>> Iterator for BitIterator<E> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.n == 0 {
            None
        } else {
            self.n -= 1;
            let part = self.n / 64;
            let bit = self.n - (64 * part);
            Some(self.t.as_ref()[part] & (1 << bit) > 0)
        }
    }
}
