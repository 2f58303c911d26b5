//! Point representations and group arithmetic for `a = 0` short Weierstrass
//! curves.
//!
//! Three coordinate systems cooperate here:
//! - [`GroupAffine`] stores `(x, y)` with `(0, 0)` encoding the identity
//!   (sound because `b ≠ 0` keeps the origin off the curve);
//! - [`GroupProjective`] is Jacobian `(X, Y, Z)`, identity `Z = 0`,
//!   representing `(X/Z², Y/Z³)` — the workhorse for general addition;
//! - [`GroupExtended`] is XYZZ `(X, Y, ZZ, ZZZ)` with `ZZ³ = ZZZ²`,
//!   representing `(X/ZZ, Y/ZZZ)` — cheaper repeated mixed additions inside
//!   the MSM bucket loop.
//!
//! Addition formulas follow the Explicit-Formulas Database entries
//! add-2007-bl, madd-2007-bl, dbl-2007-bl, madd-2008-s and dbl-2008-s-1.
//! Equal operands fall through to the doubling formulas; the formulas yield
//! `Z = 0` on `P + (-P)` without a dedicated branch.

use crate::biginteger::BigInteger;
use crate::bytes::{FromBytes, ToBytes};
use crate::curves::models::SWModelParameters;
use crate::fields::{Field, FpParameters, PrimeField};
use crate::UniformRand;
use num_bigint::{BigInt as WideInt, Sign};
use num_integer::Integer;
use num_traits::Zero;
use rand::Rng;
use rayon::prelude::*;
use std::fmt;
use std::io::{Read, Result as IoResult, Write};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

type ScalarRepr<P> = <<P as crate::curves::models::ModelParameters>::ScalarField as PrimeField>::BigInt;

#[derive(Derivative)]
#[derivative(
    Copy(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Debug(bound = ""),
    Hash(bound = "")
)]
pub struct GroupAffine<P: SWModelParameters> {
    pub x: P::BaseField,
    pub y: P::BaseField,
    #[derivative(Debug = "ignore")]
    _params: PhantomData<P>,
}

impl<P: SWModelParameters> GroupAffine<P> {
    pub fn new(x: P::BaseField, y: P::BaseField) -> Self {
        GroupAffine {
            x,
            y,
            _params: PhantomData,
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(P::BaseField::zero(), P::BaseField::zero())
    }

    /// The identity is encoded as (0, 0).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub fn prime_subgroup_generator() -> Self {
        let (x, y) = P::AFFINE_GENERATOR_COEFFS;
        Self::new(x, y)
    }

    pub fn is_on_curve(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        let x3b = self.x.square() * &self.x + &P::COEFF_B;
        self.y.square() == x3b
    }

    pub fn is_in_subgroup(&self) -> bool {
        P::is_in_subgroup(self)
    }

    pub fn into_projective(&self) -> GroupProjective<P> {
        if self.is_zero() {
            GroupProjective::zero()
        } else {
            GroupProjective {
                x: self.x,
                y: self.y,
                z: P::BaseField::one(),
                _params: PhantomData,
            }
        }
    }

    /// Scalar multiplication by a regular-form representation.
    pub fn mul(&self, by: ScalarRepr<P>) -> GroupProjective<P> {
        self.into_projective().mul(&by)
    }
}

impl<P: SWModelParameters> Neg for GroupAffine<P> {
    type Output = Self;

    fn neg(self) -> Self {
        if self.is_zero() {
            self
        } else {
            Self::new(self.x, -self.y)
        }
    }
}

impl<P: SWModelParameters> fmt::Display for GroupAffine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "O")
        } else {
            write!(f, "E([{}, {}])", self.x, self.y)
        }
    }
}

impl<P: SWModelParameters> ToBytes for GroupAffine<P> {
    fn write<W: Write>(&self, mut writer: W) -> IoResult<()> {
        self.x.write(&mut writer)?;
        self.y.write(&mut writer)
    }
}

impl<P: SWModelParameters> FromBytes for GroupAffine<P> {
    fn read<R: Read>(mut reader: R) -> IoResult<Self> {
        let x = P::BaseField::read(&mut reader)?;
        let y = P::BaseField::read(&mut reader)?;
        Ok(Self::new(x, y))
    }
}

impl<P: SWModelParameters> UniformRand for GroupAffine<P> {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        GroupProjective::rand(rng).into_affine()
    }
}

/// A point in Jacobian coordinates; the identity has `Z = 0` (with `X = Y = 1`
/// by convention, but consumers must only test `Z`).
#[derive(Derivative)]
#[derivative(Copy(bound = ""), Clone(bound = ""), Debug(bound = ""), Hash(bound = ""))]
pub struct GroupProjective<P: SWModelParameters> {
    pub x: P::BaseField,
    pub y: P::BaseField,
    pub z: P::BaseField,
    #[derivative(Debug = "ignore")]
    _params: PhantomData<P>,
}

impl<P: SWModelParameters> GroupProjective<P> {
    pub fn new(x: P::BaseField, y: P::BaseField, z: P::BaseField) -> Self {
        GroupProjective {
            x,
            y,
            z,
            _params: PhantomData,
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(P::BaseField::one(), P::BaseField::one(), P::BaseField::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.z.is_zero()
    }

    pub fn prime_subgroup_generator() -> Self {
        GroupAffine::prime_subgroup_generator().into_projective()
    }

    /// Point addition, add-2007-bl (11M + 5S).
    pub fn add_assign(&mut self, other: &Self) {
        if self.is_zero() {
            *self = *other;
            return;
        }
        if other.is_zero() {
            return;
        }

        let z1z1 = other.z.square();
        let z2z2 = self.z.square();
        let u1 = other.x * &z2z2;
        let u2 = self.x * &z1z1;
        let s1 = other.y * &self.z * &z2z2;
        let s2 = self.y * &other.z * &z1z1;

        // equal operands must take the tangent formula
        if u1 == u2 && s1 == s2 {
            self.double_in_place();
            return;
        }

        let h = u2 - &u1;
        let i = h.double().square();
        let j = h * &i;
        let r = (s2 - &s1).double();
        let v = u1 * &i;
        self.x = r.square() - &j - &v - &v;
        self.y = (v - &self.x) * &r;
        self.y -= &(s1 * &j).double();
        self.z = (self.z + &other.z).square() - &z2z2 - &z1z1;
        self.z *= &h;
    }

    /// Mixed addition with an affine operand, madd-2007-bl (7M + 4S).
    pub fn add_assign_mixed(&mut self, other: &GroupAffine<P>) {
        if other.is_zero() {
            return;
        }
        if self.is_zero() {
            self.x = other.x;
            self.y = other.y;
            self.z = P::BaseField::one();
            return;
        }

        let z1z1 = self.z.square();
        let u2 = other.x * &z1z1;
        let s2 = other.y * &self.z * &z1z1;

        if u2 == self.x && s2 == self.y {
            self.double_in_place();
            return;
        }

        let h = u2 - &self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * &i;
        let r = (s2 - &self.y).double();
        let v = self.x * &i;
        self.x = r.square() - &j - &v - &v;
        let j_y = (j * &self.y).double();
        self.y = (v - &self.x) * &r;
        self.y -= &j_y;
        self.z = (self.z + &h).square() - &z1z1 - &hh;
    }

    /// Doubling, dbl-2007-bl (3M + 5S), valid only for `a = 0`.
    pub fn double_in_place(&mut self) {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();
        let s = ((self.x + &yy).square() - &xx - &yyyy).double();
        let m = xx.double() + &xx;
        self.z = (self.z + &self.y).square() - &yy - &zz;
        self.x = m.square() - &s.double();
        self.y = (s - &self.x) * &m;
        self.y -= &yyyy.double().double().double();
    }

    pub fn double(&self) -> Self {
        let mut tmp = *self;
        tmp.double_in_place();
        tmp
    }

    pub fn sub_assign(&mut self, other: &Self) {
        let mut tmp = *other;
        tmp.y = -tmp.y;
        self.add_assign(&tmp);
    }

    /// Rescales to the `z = 1` plane with a single field inversion.
    pub fn into_affine(&self) -> GroupAffine<P> {
        if self.is_zero() {
            return GroupAffine::zero();
        }
        let a = self.z.inverse().expect("nonzero z coordinate");
        let b = a.square();
        GroupAffine::new(self.x * &b, self.y * &b * &a)
    }

    pub fn is_on_curve(&self) -> bool {
        GroupHomogeneous::from_jacobian(self).is_on_curve()
    }

    /// The GLV endomorphism `φ(x, y) = (ω·x, y)`; in Jacobian coordinates
    /// only `X` is scaled.
    pub fn phi(&self) -> Self {
        let mut p = *self;
        p.x *= &P::ENDO_COEFF;
        p
    }

    /// Classical 2-bit windowed double-and-add, most significant bit first.
    pub fn mul_windowed(&self, scalar: &ScalarRepr<P>) -> Self {
        let mut ops = [*self; 3];
        ops[1].double_in_place();
        ops[2] = ops[1];
        ops[2].add_assign(self);

        let mut res = Self::zero();
        let num_bits = scalar.num_bits() as usize;
        let mut i = num_bits + (num_bits & 1);
        while i > 0 {
            i -= 2;
            res.double_in_place();
            res.double_in_place();
            let c = (scalar.get_bit(i + 1) as u8) << 1 | scalar.get_bit(i) as u8;
            if c != 0 {
                res.add_assign(&ops[(c - 1) as usize]);
            }
        }
        res
    }

    /// GLV scalar multiplication: splits `s ≡ k1 + k2·λ mod r` with the
    /// curve's lattice basis, then runs a joint double-and-add over
    /// `max(bits(k1), bits(k2))` bits — half a scalar length.
    ///
    /// The scalar must be a canonical (reduced) representation.
    pub fn mul_glv(&self, scalar: &ScalarRepr<P>) -> Self {
        let ((neg1, k1), (neg2, k2)) = Self::split_scalar(scalar);

        // table stores [±P, ±φ(P), ±P ± φ(P)]
        let mut t0 = *self;
        if neg1 {
            t0 = -t0;
        }
        let mut t1 = self.phi();
        if neg2 {
            t1 = -t1;
        }
        let mut t2 = t0;
        t2.add_assign(&t1);
        let table = [t0, t1, t2];

        let bits = std::cmp::max(k1.num_bits(), k2.num_bits()) as usize;
        let mut res = Self::zero();
        for i in (0..bits).rev() {
            res.double_in_place();
            let idx = (k2.get_bit(i) as usize) << 1 | k1.get_bit(i) as usize;
            if idx != 0 {
                res.add_assign(&table[idx - 1]);
            }
        }
        res
    }

    /// Scalar multiplication; the GLV route.
    pub fn mul(&self, scalar: &ScalarRepr<P>) -> Self {
        self.mul_glv(scalar)
    }

    /// Multiplies the subgroup generator by `scalar`, walking the
    /// process-wide precomputed window table instead of building one.
    pub fn mul_by_gen(scalar: &ScalarRepr<P>) -> Self {
        let table = P::generator_table();
        let mut res = Self::zero();
        for limb in scalar.as_ref().iter().rev() {
            for shift in (0..8).rev() {
                for _ in 0..8 {
                    res.double_in_place();
                }
                let d = ((limb >> (8 * shift)) & 0xff) as usize;
                if d != 0 {
                    res.add_assign_mixed(&table[d - 1]);
                }
            }
        }
        res
    }

    /// Builds the 255-entry window table `[G, 2G, …, 255G]` backing
    /// [`Self::mul_by_gen`].
    pub fn build_generator_table() -> Vec<GroupAffine<P>> {
        let gen = GroupAffine::prime_subgroup_generator();
        let mut jac = Vec::with_capacity(255);
        let mut acc = Self::zero();
        for _ in 0..255 {
            acc.add_assign_mixed(&gen);
            jac.push(acc);
        }
        let mut table = vec![GroupAffine::zero(); jac.len()];
        Self::batch_jacobian_to_affine(&jac, &mut table);
        table
    }

    /// Babai rounding of `(s, 0)` against the GLV lattice basis; returns the
    /// two components sign-magnitude.
    fn split_scalar(scalar: &ScalarRepr<P>) -> ((bool, ScalarRepr<P>), (bool, ScalarRepr<P>)) {
        let basis = P::GLV_BASIS;
        let a1 = wide_int(basis.a1.0, basis.a1.1);
        let b1 = wide_int(basis.b1.0, basis.b1.1);
        let a2 = wide_int(basis.a2.0, basis.a2.1);
        let b2 = wide_int(basis.b2.0, basis.b2.1);
        let r = wide_int(false, <P::ScalarField as PrimeField>::Params::MODULUS.as_ref());
        let s = wide_int(false, scalar.as_ref());

        // (s, 0) = α·(a1, b1) + β·(a2, b2) over the rationals, with
        // α = s·b2/r and β = -s·b1/r; round both to the closest integer
        let c1 = round_div(&(&s * &b2), &r);
        let c2 = round_div(&(-(&s * &b1)), &r);

        let k1 = &s - &(&c1 * &a1) - &(&c2 * &a2);
        let k2 = -(&(&c1 * &b1) + &(&c2 * &b2));
        (sign_repr::<P>(k1), sign_repr::<P>(k2))
    }

    /// Montgomery's simultaneous-inversion conversion of a Jacobian slice.
    /// `result` must have the same length as `points`; identity entries come
    /// out as (0, 0). Costs a single field inversion plus 3 multiplications
    /// per point; the final rescale pass runs in parallel.
    pub fn batch_jacobian_to_affine(points: &[Self], result: &mut [GroupAffine<P>]) {
        assert_eq!(points.len(), result.len());
        let mut zeroes = vec![false; points.len()];

        // forward pass: stash the prefix product of the z coordinates in
        // result[i].x to avoid a scratch allocation
        let mut accumulator = P::BaseField::one();
        for (i, p) in points.iter().enumerate() {
            if p.is_zero() {
                zeroes[i] = true;
                result[i] = GroupAffine::zero();
                continue;
            }
            result[i].x = accumulator;
            accumulator *= &p.z;
        }

        let mut acc_inverse = accumulator
            .inverse()
            .expect("product of nonzero z coordinates is nonzero");

        // backward pass: recover each z_i^{-1} and peel the factor off
        for i in (0..points.len()).rev() {
            if zeroes[i] {
                continue;
            }
            result[i].x *= &acc_inverse;
            acc_inverse *= &points[i].z;
        }

        result
            .par_iter_mut()
            .zip(points.par_iter())
            .zip(zeroes.par_iter())
            .for_each(|((r, p), &is_zero)| {
                if is_zero {
                    return;
                }
                let a = r.x;
                let b = a.square();
                r.x = p.x * &b;
                r.y = p.y * &b * &a;
            });
    }
}

fn wide_int(negative: bool, limbs: &[u64]) -> WideInt {
    let mut v = WideInt::zero();
    for &limb in limbs.iter().rev() {
        v = (v << 64) + limb;
    }
    if negative {
        -v
    } else {
        v
    }
}

/// Nearest-integer division for a positive divisor.
fn round_div(n: &WideInt, d: &WideInt) -> WideInt {
    (n * 2i64 + d).div_floor(&(d * 2i64))
}

fn sign_repr<P: SWModelParameters>(k: WideInt) -> (bool, ScalarRepr<P>) {
    let negative = k.sign() == Sign::Minus;
    let (_, bytes) = k.to_bytes_le();
    let mut repr = ScalarRepr::<P>::default();
    {
        let limbs = repr.as_mut();
        debug_assert!(bytes.len() <= limbs.len() * 8);
        for (i, byte) in bytes.iter().enumerate() {
            limbs[i / 8] |= (*byte as u64) << (8 * (i % 8));
        }
    }
    (negative, repr)
}

impl<P: SWModelParameters> PartialEq for GroupProjective<P> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() {
            return other.is_zero();
        }
        if other.is_zero() {
            return false;
        }
        // cross-multiplied comparison, no inversions
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        self.x * &z2z2 == other.x * &z1z1
            && self.y * &(z2z2 * &other.z) == other.y * &(z1z1 * &self.z)
    }
}

impl<P: SWModelParameters> Eq for GroupProjective<P> {}

impl<P: SWModelParameters> Neg for GroupProjective<P> {
    type Output = Self;

    fn neg(self) -> Self {
        if self.is_zero() {
            self
        } else {
            Self::new(self.x, -self.y, self.z)
        }
    }
}

impl<'a, P: SWModelParameters> AddAssign<&'a GroupProjective<P>> for GroupProjective<P> {
    fn add_assign(&mut self, other: &Self) {
        GroupProjective::add_assign(self, other);
    }
}

impl<P: SWModelParameters> AddAssign<GroupProjective<P>> for GroupProjective<P> {
    fn add_assign(&mut self, other: Self) {
        GroupProjective::add_assign(self, &other);
    }
}

impl<'a, P: SWModelParameters> Add<&'a GroupProjective<P>> for GroupProjective<P> {
    type Output = Self;

    fn add(mut self, other: &Self) -> Self {
        GroupProjective::add_assign(&mut self, other);
        self
    }
}

impl<P: SWModelParameters> Add<GroupProjective<P>> for GroupProjective<P> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        GroupProjective::add_assign(&mut self, &other);
        self
    }
}

impl<'a, P: SWModelParameters> SubAssign<&'a GroupProjective<P>> for GroupProjective<P> {
    fn sub_assign(&mut self, other: &Self) {
        GroupProjective::sub_assign(self, other);
    }
}

impl<P: SWModelParameters> SubAssign<GroupProjective<P>> for GroupProjective<P> {
    fn sub_assign(&mut self, other: Self) {
        GroupProjective::sub_assign(self, &other);
    }
}

impl<P: SWModelParameters> Sub<GroupProjective<P>> for GroupProjective<P> {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        GroupProjective::sub_assign(&mut self, &other);
        self
    }
}

impl<P: SWModelParameters> fmt::Display for GroupProjective<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_affine())
    }
}

impl<P: SWModelParameters> UniformRand for GroupProjective<P> {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let scalar = P::ScalarField::rand(rng).into_repr();
        Self::prime_subgroup_generator().mul(&scalar)
    }
}

/// Homogeneous projective coordinates `(X/Z, Y/Z)`; only a convenience
/// representation for curve-membership tests.
#[derive(Derivative)]
#[derivative(Copy(bound = ""), Clone(bound = ""), Debug(bound = ""))]
pub struct GroupHomogeneous<P: SWModelParameters> {
    pub x: P::BaseField,
    pub y: P::BaseField,
    pub z: P::BaseField,
    #[derivative(Debug = "ignore")]
    _params: PhantomData<P>,
}

impl<P: SWModelParameters> GroupHomogeneous<P> {
    pub fn from_jacobian(q: &GroupProjective<P>) -> Self {
        let zz = q.z.square();
        GroupHomogeneous {
            x: q.x * &q.z,
            y: q.y,
            z: q.z * &zz,
            _params: PhantomData,
        }
    }

    /// `Y²·Z = X³ + b·Z³`.
    pub fn is_on_curve(&self) -> bool {
        let left = self.y.square() * &self.z;
        let right = self.x.square() * &self.x + &(self.z.square() * &self.z * &P::COEFF_B);
        left == right
    }
}

/// Extended XYZZ coordinates `(X/ZZ, Y/ZZZ)` with `ZZ³ = ZZZ²`; the identity
/// has `ZZ = ZZZ = 0`. Mixed addition here is cheaper than in Jacobian form,
/// which is what the MSM bucket accumulation exploits.
#[derive(Derivative)]
#[derivative(Copy(bound = ""), Clone(bound = ""), Debug(bound = ""))]
pub struct GroupExtended<P: SWModelParameters> {
    pub x: P::BaseField,
    pub y: P::BaseField,
    pub zz: P::BaseField,
    pub zzz: P::BaseField,
    #[derivative(Debug = "ignore")]
    _params: PhantomData<P>,
}

impl<P: SWModelParameters> GroupExtended<P> {
    #[inline]
    pub fn zero() -> Self {
        GroupExtended {
            x: P::BaseField::one(),
            y: P::BaseField::one(),
            zz: P::BaseField::zero(),
            zzz: P::BaseField::zero(),
            _params: PhantomData,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.zz.is_zero()
    }

    /// Mixed addition, madd-2008-s.
    pub fn add_assign_mixed(&mut self, a: &GroupAffine<P>) {
        if a.is_zero() {
            return;
        }
        if self.is_zero() {
            self.x = a.x;
            self.y = a.y;
            self.zz = P::BaseField::one();
            self.zzz = P::BaseField::one();
            return;
        }

        let u2 = a.x * &self.zz;
        let s2 = a.y * &self.zzz;
        if u2 == self.x && s2 == self.y {
            self.double_from_affine(a);
            return;
        }

        let p = u2 - &self.x;
        let r = s2 - &self.y;
        let pp = p.square();
        let ppp = p * &pp;
        let q = self.x * &pp;
        let rr = r.square();
        self.x = rr - &ppp - &q.double();
        let y3 = (q - &self.x) * &r;
        self.y = y3 - &(self.y * &ppp);
        self.zz *= &pp;
        self.zzz *= &ppp;
    }

    /// Doubling from an affine point, dbl-2008-s-1 (`a = 0`).
    fn double_from_affine(&mut self, q: &GroupAffine<P>) {
        let u = q.y.double();
        self.zz = u.square();
        self.zzz = u * &self.zz;
        let s = q.x * &self.zz;
        let xx = q.x.square();
        let m = xx.double() + &xx;
        self.x = m.square() - &s.double();
        let y3 = (s - &self.x) * &m;
        self.y = y3 - &(self.zzz * &q.y);
    }

    /// Carries the accumulator into Jacobian form:
    /// `(X·ZZ², Y·ZZZ², ZZZ)`.
    pub fn to_jacobian(&self) -> GroupProjective<P> {
        GroupProjective::new(
            self.x * &self.zz.square(),
            self.y * &self.zzz.square(),
            self.zzz,
        )
    }
}
