//! Macros generating the Montgomery prime-field models.

/// Builds a field element constant from limbs already in Montgomery form.
#[macro_export]
macro_rules! field_new {
    ($name:ident, $c0:expr) => {
        $name { 0: $c0, 1: std::marker::PhantomData }
    };
    ($name:ident, $c0:expr, $c1:expr) => {
        $name {
            c0: $c0,
            c1: $c1,
            _parameters: std::marker::PhantomData,
        }
    };
}

/// Implements a Montgomery-form prime field over `$bigint` with `$limbs`
/// 64-bit limbs, parameterized by a `$params_trait` marker.
macro_rules! impl_prime_field {
    ($fp:ident, $params_trait:ident, $bigint:ident, $limbs:tt) => {
        /// An element of the prime field described by `P`, kept in Montgomery
        /// form.
        #[derive(Derivative)]
        #[derivative(
            Default(bound = ""),
            Hash(bound = ""),
            Clone(bound = ""),
            Copy(bound = ""),
            PartialEq(bound = ""),
            Eq(bound = "")
        )]
        pub struct $fp<P>(pub $bigint, pub std::marker::PhantomData<P>);

        impl<P: $params_trait> $fp<P> {
            #[inline]
            fn is_valid(&self) -> bool {
                self.0 < P::MODULUS
            }

            #[inline]
            fn reduce(&mut self) {
                if !self.is_valid() {
                    self.0.sub_noborrow(&P::MODULUS);
                }
            }

            #[inline]
            fn mont_reduce(&mut self, r: &mut [u64; $limbs * 2]) {
                let mut carry2 = 0;
                for i in 0..$limbs {
                    let k = r[i].wrapping_mul(P::INV);
                    let mut carry = 0;
                    $crate::biginteger::arithmetic::mac_with_carry(r[i], k, P::MODULUS.0[0], &mut carry);
                    for j in 1..$limbs {
                        r[j + i] = $crate::biginteger::arithmetic::mac_with_carry(
                            r[j + i],
                            k,
                            P::MODULUS.0[j],
                            &mut carry,
                        );
                    }
                    r[$limbs + i] =
                        $crate::biginteger::arithmetic::adc(r[$limbs + i], carry2, &mut carry);
                    carry2 = carry;
                }
                (self.0).0.copy_from_slice(&r[$limbs..]);
                self.reduce();
            }
        }

        impl<P: $params_trait> $crate::fields::PrimeField for $fp<P> {
            type Params = P;
            type BigInt = $bigint;

            fn from_repr(repr: Self::BigInt) -> Self {
                let mut r = $fp(repr, std::marker::PhantomData);
                if r.is_zero() {
                    r
                } else {
                    r *= &$fp(P::R2, std::marker::PhantomData);
                    r
                }
            }

            fn into_repr(&self) -> Self::BigInt {
                let mut tmp = *self;
                let mut r = [0u64; $limbs * 2];
                r[..$limbs].copy_from_slice(&(self.0).0);
                tmp.mont_reduce(&mut r);
                tmp.0
            }

            #[inline]
            fn from_mont(repr: Self::BigInt) -> Self {
                $fp(repr, std::marker::PhantomData)
            }
        }

        impl<P: $params_trait> $crate::fields::Field for $fp<P> {
            #[inline]
            fn zero() -> Self {
                $fp($bigint::default(), std::marker::PhantomData)
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            #[inline]
            fn one() -> Self {
                $fp(P::R, std::marker::PhantomData)
            }

            #[inline]
            fn is_one(&self) -> bool {
                self.0 == P::R
            }

            #[inline]
            fn double(&self) -> Self {
                let mut tmp = *self;
                tmp.double_in_place();
                tmp
            }

            #[inline]
            fn double_in_place(&mut self) -> &mut Self {
                self.0.mul2();
                self.reduce();
                self
            }

            #[inline]
            fn square(&self) -> Self {
                let mut tmp = *self;
                tmp.square_in_place();
                tmp
            }

            #[inline]
            fn square_in_place(&mut self) -> &mut Self {
                let tmp = *self;
                *self *= &tmp;
                self
            }

            fn inverse(&self) -> Option<Self> {
                if self.is_zero() {
                    return None;
                }
                // binary extended Euclid on the Montgomery representation
                // (Guajardo-Kumar-Paar-Pelzl, Alg. 16)
                let one = $bigint::from(1);
                let mut u = self.0;
                let mut v = P::MODULUS;
                let mut b = $fp(P::R2, std::marker::PhantomData);
                let mut c = Self::zero();

                while u != one && v != one {
                    while u.is_even() {
                        u.div2();
                        if b.0.is_even() {
                            b.0.div2();
                        } else {
                            b.0.add_nocarry(&P::MODULUS);
                            b.0.div2();
                        }
                    }
                    while v.is_even() {
                        v.div2();
                        if c.0.is_even() {
                            c.0.div2();
                        } else {
                            c.0.add_nocarry(&P::MODULUS);
                            c.0.div2();
                        }
                    }
                    if v < u {
                        u.sub_noborrow(&v);
                        b -= &c;
                    } else {
                        v.sub_noborrow(&u);
                        c -= &b;
                    }
                }

                if u == one {
                    Some(b)
                } else {
                    Some(c)
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

            #[inline]
            fn frobenius_map(&mut self, _: usize) {
                // the Frobenius endomorphism is the identity on a prime field
            }
        }

        impl<P: $params_trait> $crate::fields::SquareRootField for $fp<P> {
            fn legendre(&self) -> $crate::fields::LegendreSymbol {
                use $crate::fields::LegendreSymbol::*;
                let s = self.pow(P::MODULUS_MINUS_ONE_DIV_TWO);
                if s.is_zero() {
                    Zero
                } else if s.is_one() {
                    QuadraticResidue
                } else {
                    QuadraticNonResidue
                }
            }

            fn sqrt(&self) -> Option<Self> {
                use $crate::fields::LegendreSymbol::*;
                match self.legendre() {
                    Zero => Some(*self),
                    QuadraticNonResidue => None,
                    QuadraticResidue => {
                        // Tonelli-Shanks, with the loop bounded by TWO_ADICITY
                        let mut z = Self::from_mont(P::ROOT_OF_UNITY);
                        let mut w = self.pow(P::T_MINUS_ONE_DIV_TWO);
                        let mut x = w * self;
                        let mut b = x * &w;
                        let mut v = P::TWO_ADICITY as usize;

                        while !b.is_one() {
                            let mut k = 0usize;
                            let mut b2k = b;
                            while !b2k.is_one() {
                                b2k.square_in_place();
                                k += 1;
                            }
                            let j = v - k - 1;
                            w = z;
                            for _ in 0..j {
                                w.square_in_place();
                            }
                            z = w.square();
                            b *= &z;
                            x *= &w;
                            v = k;
                        }
                        Some(x)
                    }
                }
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

        impl<P: $params_trait> std::fmt::Debug for $fp<P> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($fp), self.into_repr())
            }
        }

        impl<P: $params_trait> std::fmt::Display for $fp<P> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.into_repr())
            }
        }

        impl<P: $params_trait> PartialOrd for $fp<P> {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        /// Ordering of the regular (non-Montgomery) representations; used by
        /// the lexicographic sign convention of the point codec.
        impl<P: $params_trait> Ord for $fp<P> {
            #[inline]
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.into_repr().cmp(&other.into_repr())
            }
        }

        impl<P: $params_trait> $crate::UniformRand for $fp<P> {
            fn rand<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
                loop {
                    let mut tmp = <$bigint as $crate::UniformRand>::rand(rng);
                    tmp.as_mut()[$limbs - 1] &= u64::MAX >> P::REPR_SHAVE_BITS;
                    if tmp < P::MODULUS {
                        return Self::from_repr(tmp);
                    }
                }
            }
        }

        impl<P: $params_trait> $crate::bytes::ToBytes for $fp<P> {
            #[inline]
            fn write<W: std::io::Write>(&self, writer: W) -> std::io::Result<()> {
                self.into_repr().write(writer)
            }
        }

        impl<P: $params_trait> $crate::bytes::FromBytes for $fp<P> {
            #[inline]
            fn read<R: std::io::Read>(reader: R) -> std::io::Result<Self> {
                $bigint::read(reader).map(Self::from_repr)
            }
        }

        impl<P: $params_trait> std::ops::Neg for $fp<P> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                if !self.is_zero() {
                    let mut tmp = P::MODULUS;
                    tmp.sub_noborrow(&self.0);
                    $fp(tmp, std::marker::PhantomData)
                } else {
                    self
                }
            }
        }

        impl<'a, P: $params_trait> std::ops::AddAssign<&'a $fp<P>> for $fp<P> {
            #[inline]
            fn add_assign(&mut self, other: &Self) {
                self.0.add_nocarry(&other.0);
                self.reduce();
            }
        }

        impl<'a, P: $params_trait> std::ops::SubAssign<&'a $fp<P>> for $fp<P> {
            #[inline]
            fn sub_assign(&mut self, other: &Self) {
                if other.0 > self.0 {
                    self.0.add_nocarry(&P::MODULUS);
                }
                self.0.sub_noborrow(&other.0);
            }
        }

        impl<'a, P: $params_trait> std::ops::MulAssign<&'a $fp<P>> for $fp<P> {
            fn mul_assign(&mut self, other: &Self) {
                let mut r = [0u64; $limbs * 2];
                let mut carry = 0;
                for i in 0..$limbs {
                    for j in 0..$limbs {
                        r[j + i] = $crate::biginteger::arithmetic::mac_with_carry(
                            r[j + i],
                            (self.0).0[i],
                            (other.0).0[j],
                            &mut carry,
                        );
                    }
                    r[$limbs + i] = carry;
                    carry = 0;
                }
                self.mont_reduce(&mut r);
            }
        }

        impl<'a, P: $params_trait> std::ops::DivAssign<&'a $fp<P>> for $fp<P> {
            #[inline]
            fn div_assign(&mut self, other: &Self) {
                use $crate::fields::Field;
                *self *= &other.inverse().expect("division by zero");
            }
        }

        impl_ops_from_ref!($fp, $params_trait);
    };
}

/// Derives the by-value and by-reference operator impls from the
/// `*Assign<&Self>` implementations.
macro_rules! impl_ops_from_ref {
    ($type:ident, $params:ident) => {
        impl<P: $params> std::ops::Add<$type<P>> for $type<P> {
            type Output = Self;

            #[inline]
            fn add(mut self, other: Self) -> Self {
                self += &other;
                self
            }
        }

        impl<'a, P: $params> std::ops::Add<&'a $type<P>> for $type<P> {
            type Output = Self;

            #[inline]
            fn add(mut self, other: &Self) -> Self {
                self += other;
                self
            }
        }

        impl<P: $params> std::ops::Sub<$type<P>> for $type<P> {
            type Output = Self;

            #[inline]
            fn sub(mut self, other: Self) -> Self {
                self -= &other;
                self
            }
        }

        impl<'a, P: $params> std::ops::Sub<&'a $type<P>> for $type<P> {
            type Output = Self;

            #[inline]
            fn sub(mut self, other: &Self) -> Self {
                self -= other;
                self
            }
        }

        impl<P: $params> std::ops::Mul<$type<P>> for $type<P> {
            type Output = Self;

            #[inline]
            fn mul(mut self, other: Self) -> Self {
                self *= &other;
                self
            }
        }

        impl<'a, P: $params> std::ops::Mul<&'a $type<P>> for $type<P> {
            type Output = Self;

            #[inline]
            fn mul(mut self, other: &Self) -> Self {
                self *= other;
                self
            }
        }

        impl<P: $params> std::ops::Div<$type<P>> for $type<P> {
            type Output = Self;

            #[inline]
            fn div(mut self, other: Self) -> Self {
                self /= &other;
                self
            }
        }

        impl<'a, P: $params> std::ops::Div<&'a $type<P>> for $type<P> {
            type Output = Self;

            #[inline]
            fn div(mut self, other: &Self) -> Self {
                self /= other;
                self
            }
        }

        impl<P: $params> std::ops::AddAssign<$type<P>> for $type<P> {
            #[inline]
            fn add_assign(&mut self, other: Self) {
                *self += &other;
            }
        }

        impl<P: $params> std::ops::SubAssign<$type<P>> for $type<P> {
            #[inline]
            fn sub_assign(&mut self, other: Self) {
                *self -= &other;
            }
        }

        impl<P: $params> std::ops::MulAssign<$type<P>> for $type<P> {
            #[inline]
            fn mul_assign(&mut self, other: Self) {
                *self *= &other;
            }
        }

        impl<P: $params> std::ops::DivAssign<$type<P>> for $type<P> {
            #[inline]
            fn div_assign(&mut self, other: Self) {
                *self /= &other;
            }
        }
    };
}
