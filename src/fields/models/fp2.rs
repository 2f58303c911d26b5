use crate::bytes::{FromBytes, ToBytes};
use crate::fields::{Field, LegendreSymbol, PrimeField, SquareRootField};
use crate::UniformRand;
use rand::Rng;
use std::io::{Read, Result as IoResult, Write};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub trait Fp2Parameters: 'static + Send + Sync {
    type Fp: PrimeField + SquareRootField;

    /// The quadratic non-residue `α` with `Fp2 = Fp[u]/(u² - α)`.
    const NONRESIDUE: Self::Fp;

    /// A quadratic non-residue of the extension itself.
    const QUADRATIC_NONRESIDUE: (Self::Fp, Self::Fp);

    /// Coefficients of `u^(p^k)` for `k = 0, 1`.
    const FROBENIUS_COEFF_FP2_C1: [Self::Fp; 2];

    #[inline(always)]
    fn mul_fp_by_nonresidue(fe: &Self::Fp) -> Self::Fp {
        Self::NONRESIDUE * fe
    }
}

/// An element `c0 + c1·u` of the quadratic extension of `P::Fp`.
#[derive(Derivative)]
#[derivative(
    Default(bound = ""),
    Hash(bound = ""),
    Clone(bound = ""),
    Copy(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
pub struct Fp2<P: Fp2Parameters> {
    pub c0: P::Fp,
    pub c1: P::Fp,
    #[derivative(Debug = "ignore")]
    pub _parameters: PhantomData<P>,
}

impl<P: Fp2Parameters> Fp2<P> {
    pub fn new(c0: P::Fp, c1: P::Fp) -> Self {
        Fp2 {
            c0,
            c1,
            _parameters: PhantomData,
        }
    }

    /// The norm map into `Fp`: `c0² - α·c1²`.
    pub fn norm(&self) -> P::Fp {
        let t0 = self.c0.square();
        let t1 = P::mul_fp_by_nonresidue(&self.c1.square());
        t0 - &t1
    }

    /// Multiplies both coefficients by a base field element.
    pub fn mul_assign_by_fp(&mut self, other: &P::Fp) {
        self.c0 *= other;
        self.c1 *= other;
    }
}

impl<P: Fp2Parameters> Field for Fp2<P> {
    #[inline]
    fn zero() -> Self {
        Fp2::new(P::Fp::zero(), P::Fp::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    #[inline]
    fn one() -> Self {
        Fp2::new(P::Fp::one(), P::Fp::zero())
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.c0.is_one() && self.c1.is_zero()
    }

    #[inline]
    fn double(&self) -> Self {
        let mut tmp = *self;
        tmp.double_in_place();
        tmp
    }

    #[inline]
    fn double_in_place(&mut self) -> &mut Self {
        self.c0.double_in_place();
        self.c1.double_in_place();
        self
    }

    #[inline]
    fn square(&self) -> Self {
        let mut tmp = *self;
        tmp.square_in_place();
        tmp
    }

    fn square_in_place(&mut self) -> &mut Self {
        // (c0 - c1)(c0 - α·c1) + (1 + α)·c0·c1 split into 3 multiplications
        let mut v0 = self.c0 - &self.c1;
        let v3 = self.c0 - &P::mul_fp_by_nonresidue(&self.c1);
        let v2 = self.c0 * &self.c1;
        v0 *= &v3;
        let c0 = v0 + &v2 + &P::mul_fp_by_nonresidue(&v2);
        let c1 = v2.double();
        self.c0 = c0;
        self.c1 = c1;
        self
    }

    fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            // v = c0² - α·c1² is nonzero for nonzero elements
            let v = self.norm();
            let v_inv = v.inverse().expect("norm of a nonzero element is nonzero");
            Some(Fp2::new(self.c0 * &v_inv, -(self.c1 * &v_inv)))
        }
    }

    fn inverse_in_place(&mut self) -> Option<&mut Self> {
        if let Some(inv) = self.inverse() {
            *self = inv;
            Some(self)
        } else {
            None
        }
    }

    fn frobenius_map(&mut self, power: usize) {
        self.c1 *= &P::FROBENIUS_COEFF_FP2_C1[power % 2];
    }
}

impl<P: Fp2Parameters> SquareRootField for Fp2<P> {
    fn legendre(&self) -> LegendreSymbol {
        self.norm().legendre()
    }

    fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::zero());
        }
        if self.c1.is_zero() {
            // an Fp element: either its root stays in Fp, or c0/α is a
            // square t² and (t·u)² = c0
            return match self.c0.sqrt() {
                Some(c0) => Some(Fp2::new(c0, P::Fp::zero())),
                None => {
                    let nr_inv = P::NONRESIDUE
                        .inverse()
                        .expect("the non-residue is nonzero");
                    (self.c0 * &nr_inv).sqrt().map(|t| Fp2::new(P::Fp::zero(), t))
                }
            };
        }
        // standard quadratic-extension square root: exactly one of
        // (c0 ± √norm)/2 is a square in Fp
        let alpha = self.norm();
        alpha.sqrt().and_then(|sqrt_alpha| {
            let two_inv = P::Fp::one()
                .double()
                .inverse()
                .expect("2 is invertible in odd characteristic");
            let mut delta = (self.c0 + &sqrt_alpha) * &two_inv;
            if delta.legendre().is_qnr() {
                delta -= &sqrt_alpha;
            }
            delta.sqrt().map(|c0| {
                let c1 = self.c1
                    * &c0
                        .double()
                        .inverse()
                        .expect("2·c0 is nonzero for c1 != 0");
                Fp2::new(c0, c1)
            })
        })
    }

    fn sqrt_in_place(&mut self) -> Option<&mut Self> {
        if let Some(s) = self.sqrt() {
            *self = s;
            Some(self)
        } else {
            None
        }
    }
}

impl<P: Fp2Parameters> std::fmt::Display for Fp2<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fp2({} + {} * u)", self.c0, self.c1)
    }
}

impl<P: Fp2Parameters> UniformRand for Fp2<P> {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Fp2::new(P::Fp::rand(rng), P::Fp::rand(rng))
    }
}

impl<P: Fp2Parameters> ToBytes for Fp2<P> {
    fn write<W: Write>(&self, mut writer: W) -> IoResult<()> {
        self.c0.write(&mut writer)?;
        self.c1.write(&mut writer)
    }
}

impl<P: Fp2Parameters> FromBytes for Fp2<P> {
    fn read<R: Read>(mut reader: R) -> IoResult<Self> {
        let c0 = P::Fp::read(&mut reader)?;
        let c1 = P::Fp::read(&mut reader)?;
        Ok(Fp2::new(c0, c1))
    }
}

impl<P: Fp2Parameters> Neg for Fp2<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Fp2::new(-self.c0, -self.c1)
    }
}

impl<'a, P: Fp2Parameters> AddAssign<&'a Fp2<P>> for Fp2<P> {
    #[inline]
    fn add_assign(&mut self, other: &Self) {
        self.c0 += &other.c0;
        self.c1 += &other.c1;
    }
}

impl<'a, P: Fp2Parameters> SubAssign<&'a Fp2<P>> for Fp2<P> {
    #[inline]
    fn sub_assign(&mut self, other: &Self) {
        self.c0 -= &other.c0;
        self.c1 -= &other.c1;
    }
}

impl<'a, P: Fp2Parameters> MulAssign<&'a Fp2<P>> for Fp2<P> {
    fn mul_assign(&mut self, other: &Self) {
        // Karatsuba: 3 base field multiplications
        let v0 = self.c0 * &other.c0;
        let v1 = self.c1 * &other.c1;
        let c1 = (self.c0 + &self.c1) * &(other.c0 + &other.c1) - &v0 - &v1;
        self.c0 = v0 + &P::mul_fp_by_nonresidue(&v1);
        self.c1 = c1;
    }
}

impl<'a, P: Fp2Parameters> DivAssign<&'a Fp2<P>> for Fp2<P> {
    #[inline]
    fn div_assign(&mut self, other: &Self) {
        *self *= &other.inverse().expect("division by zero");
    }
}

impl<P: Fp2Parameters> Add<Fp2<P>> for Fp2<P> {
    type Output = Self;

    #[inline]
    fn add(mut self, other: Self) -> Self {
        self += &other;
        self
    }
}

impl<'a, P: Fp2Parameters> Add<&'a Fp2<P>> for Fp2<P> {
    type Output = Self;

    #[inline]
    fn add(mut self, other: &Self) -> Self {
        self += other;
        self
    }
}

impl<P: Fp2Parameters> Sub<Fp2<P>> for Fp2<P> {
    type Output = Self;

    #[inline]
    fn sub(mut self, other: Self) -> Self {
        self -= &other;
        self
    }
}

impl<'a, P: Fp2Parameters> Sub<&'a Fp2<P>> for Fp2<P> {
    type Output = Self;

    #[inline]
    fn sub(mut self, other: &Self) -> Self {
        self -= other;
        self
    }
}

impl<P: Fp2Parameters> Mul<Fp2<P>> for Fp2<P> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: Self) -> Self {
        self *= &other;
        self
    }
}

impl<'a, P: Fp2Parameters> Mul<&'a Fp2<P>> for Fp2<P> {
    type Output = Self;

    #[inline]
    fn mul(mut self, other: &Self) -> Self {
        self *= other;
        self
    }
}

impl<P: Fp2Parameters> Div<Fp2<P>> for Fp2<P> {
    type Output = Self;

    #[inline]
    fn div(mut self, other: Self) -> Self {
        self /= &other;
        self
    }
}

impl<'a, P: Fp2Parameters> Div<&'a Fp2<P>> for Fp2<P> {
    type Output = Self;

    #[inline]
    fn div(mut self, other: &Self) -> Self {
        self /= other;
        self
    }
}

impl<P: Fp2Parameters> AddAssign<Fp2<P>> for Fp2<P> {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self += &other;
    }
}

impl<P: Fp2Parameters> SubAssign<Fp2<P>> for Fp2<P> {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self -= &other;
    }
}

impl<P: Fp2Parameters> MulAssign<Fp2<P>> for Fp2<P> {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self *= &other;
    }
}

impl<P: Fp2Parameters> DivAssign<Fp2<P>> for Fp2<P> {
    #[inline]
    fn div_assign(&mut self, other: Self) {
        *self /= &other;
    }
}
