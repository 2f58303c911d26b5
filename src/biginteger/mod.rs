//! Fixed-width big integers backing the Montgomery field representations.
//!
//! Limbs are 64 bit, little-endian. `BigInteger256` holds scalar-field
//! representations, `BigInteger384` base-field representations.

use crate::bytes::{FromBytes, ToBytes};
use crate::UniformRand;
use rand::Rng;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::io::{Read, Result as IoResult, Write};

pub(crate) mod arithmetic;

/// A fixed-width, little-endian array of 64-bit limbs.
pub trait BigInteger:
    ToBytes
    + FromBytes
    + Copy
    + Clone
    + Debug
    + Default
    + Display
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + Sized
    + UniformRand
    + AsRef<[u64]>
    + AsMut<[u64]>
    + From<u64>
    + 'static
{
    const NUM_LIMBS: usize;

    /// `self += other`, returns the outgoing carry.
    fn add_nocarry(&mut self, other: &Self) -> bool;

    /// `self -= other`, returns the outgoing borrow.
    fn sub_noborrow(&mut self, other: &Self) -> bool;

    /// `self <<= 1`.
    fn mul2(&mut self);

    /// `self <<= n`.
    fn muln(&mut self, n: u32);

    /// `self >>= 1`.
    fn div2(&mut self);

    /// `self >>= n`.
    fn divn(&mut self, n: u32);

    fn is_odd(&self) -> bool;

    fn is_even(&self) -> bool;

    fn is_zero(&self) -> bool;

    /// Number of significant bits.
    fn num_bits(&self) -> u32;

    /// Bit `i`, counting from the least significant; out-of-range bits are 0.
    fn get_bit(&self, i: usize) -> bool;
}

macro_rules! bigint_impl {
    ($name:ident, $num_limbs:expr) => {
        #[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
        pub struct $name(pub [u64; $num_limbs]);

        impl $name {
            pub const fn new(value: [u64; $num_limbs]) -> Self {
                $name(value)
            }
        }

        impl BigInteger for $name {
            const NUM_LIMBS: usize = $num_limbs;

            #[inline]
            fn add_nocarry(&mut self, other: &Self) -> bool {
                let mut carry = 0;
                for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
                    *a = arithmetic::adc(*a, *b, &mut carry);
                }
                carry != 0
            }

            #[inline]
            fn sub_noborrow(&mut self, other: &Self) -> bool {
                let mut borrow = 0;
                for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
                    *a = arithmetic::sbb(*a, *b, &mut borrow);
                }
                borrow != 0
            }

            #[inline]
            fn mul2(&mut self) {
                let mut last = 0;
                for i in &mut self.0 {
                    let tmp = *i >> 63;
                    *i <<= 1;
                    *i |= last;
                    last = tmp;
                }
            }

            fn muln(&mut self, mut n: u32) {
                if n >= 64 * $num_limbs {
                    *self = Self::from(0);
                    return;
                }
                while n >= 64 {
                    let mut t = 0;
                    for i in &mut self.0 {
                        std::mem::swap(&mut t, i);
                    }
                    n -= 64;
                }
                if n > 0 {
                    let mut t = 0;
                    for i in &mut self.0 {
                        let t2 = *i >> (64 - n);
                        *i <<= n;
                        *i |= t;
                        t = t2;
                    }
                }
            }

            #[inline]
            fn div2(&mut self) {
                let mut t = 0;
                for i in self.0.iter_mut().rev() {
                    let t2 = *i << 63;
                    *i >>= 1;
                    *i |= t;
                    t = t2;
                }
            }

            fn divn(&mut self, mut n: u32) {
                if n >= 64 * $num_limbs {
                    *self = Self::from(0);
                    return;
                }
                while n >= 64 {
                    let mut t = 0;
                    for i in self.0.iter_mut().rev() {
                        std::mem::swap(&mut t, i);
                    }
                    n -= 64;
                }
                if n > 0 {
                    let mut t = 0;
                    for i in self.0.iter_mut().rev() {
                        let t2 = *i << (64 - n);
                        *i >>= n;
                        *i |= t;
                        t = t2;
                    }
                }
            }

            #[inline]
            fn is_odd(&self) -> bool {
                self.0[0] & 1 == 1
            }

            #[inline]
            fn is_even(&self) -> bool {
                !self.is_odd()
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.0.iter().all(|&e| e == 0)
            }

            fn num_bits(&self) -> u32 {
                let mut ret = $num_limbs * 64;
                for i in self.0.iter().rev() {
                    let leading = i.leading_zeros();
                    ret -= leading;
                    if leading != 64 {
                        break;
                    }
                }
                ret
            }

            #[inline]
            fn get_bit(&self, i: usize) -> bool {
                if i >= 64 * $num_limbs {
                    false
                } else {
                    (self.0[i / 64] >> (i % 64)) & 1 == 1
                }
            }
        }

        impl ToBytes for $name {
            #[inline]
            fn write<W: Write>(&self, mut writer: W) -> IoResult<()> {
                for limb in &self.0 {
                    writer.write_all(&limb.to_le_bytes())?;
                }
                Ok(())
            }
        }

        impl FromBytes for $name {
            #[inline]
            fn read<R: Read>(mut reader: R) -> IoResult<Self> {
                let mut limbs = [0u64; $num_limbs];
                let mut bytes = [0u8; 8];
                for limb in &mut limbs {
                    reader.read_exact(&mut bytes)?;
                    *limb = u64::from_le_bytes(bytes);
                }
                Ok($name(limbs))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "0x")?;
                for limb in self.0.iter().rev() {
                    write!(f, "{:016x}", limb)?;
                }
                Ok(())
            }
        }

        impl Ord for $name {
            #[inline]
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                for (a, b) in self.0.iter().rev().zip(other.0.iter().rev()) {
                    match a.cmp(b) {
                        std::cmp::Ordering::Equal => (),
                        order => return order,
                    }
                }
                std::cmp::Ordering::Equal
            }
        }

        impl PartialOrd for $name {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                let mut limbs = [0u64; $num_limbs];
                limbs[0] = value;
                $name(limbs)
            }
        }

        impl AsRef<[u64]> for $name {
            #[inline]
            fn as_ref(&self) -> &[u64] {
                &self.0
            }
        }

        impl AsMut<[u64]> for $name {
            #[inline]
            fn as_mut(&mut self) -> &mut [u64] {
                &mut self.0
            }
        }

        impl UniformRand for $name {
            fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
                let mut limbs = [0u64; $num_limbs];
                for limb in &mut limbs {
                    *limb = rng.gen();
                }
                $name(limbs)
            }
        }
    };
}

bigint_impl!(BigInteger256, 4);
bigint_impl!(BigInteger384, 6);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_round_trip() {
        let a = BigInteger256([0x0123456789abcdef, 0xfedcba9876543210, 0xaaaaaaaa55555555, 0x0102030405060708]);
        let mut b = a;
        b.muln(17);
        b.divn(17);
        let mut masked = a;
        // the top 17 bits are lost by the left shift
        masked.0[3] &= (1 << (64 - 17)) - 1;
        assert_eq!(b, masked);

        let mut c = a;
        c.mul2();
        let mut d = a;
        d.muln(1);
        assert_eq!(c, d);
    }

    #[test]
    fn bit_queries() {
        let a = BigInteger256([1 << 5, 0, 1 << 63, 0]);
        assert!(a.get_bit(5));
        assert!(!a.get_bit(6));
        assert!(a.get_bit(128 + 63));
        assert!(!a.get_bit(1024));
        assert_eq!(a.num_bits(), 192);
        assert_eq!(BigInteger256::from(0).num_bits(), 0);
    }

    #[test]
    fn add_sub_round_trip() {
        let a = BigInteger384([u64::MAX, 0, 1, 2, 3, 4]);
        let b = BigInteger384([17, 23, 29, 31, 37, 41]);
        let mut c = a;
        assert!(!c.add_nocarry(&b));
        assert!(!c.sub_noborrow(&b));
        assert_eq!(a, c);
    }
}
