//! ZCash/IETF-style point serialization.
//!
//! The three high bits of the first byte carry metadata:
//!
//! | bits 765 | meaning                                  |
//! |----------|------------------------------------------|
//! | 000      | uncompressed, non-identity               |
//! | 010      | uncompressed identity                    |
//! | 100      | compressed, y is the lex. smallest root  |
//! | 101      | compressed, y is the lex. largest root   |
//! | 110      | compressed identity                      |
//!
//! Coordinates are written big-endian in regular (non-Montgomery) form; the
//! two limbs of a quadratic-extension coordinate are written imaginary part
//! first. Decoding always subgroup-checks.

use crate::biginteger::{BigInteger, BigInteger384};
use crate::curves::models::short_weierstrass_jacobian::GroupAffine;
use crate::curves::models::SWModelParameters;
use crate::error::SerializationError;
use crate::fields::{
    Field, Fp2, Fp2Parameters, Fp384, Fp384Parameters, FpParameters, PrimeField, SquareRootField,
};
use rayon::prelude::*;
use std::io::{Read, Write};
use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) const M_MASK: u8 = 0b111 << 5;
pub(crate) const M_UNCOMPRESSED: u8 = 0b000 << 5;
pub(crate) const M_UNCOMPRESSED_INFINITY: u8 = 0b010 << 5;
pub(crate) const M_COMPRESSED_SMALLEST: u8 = 0b100 << 5;
pub(crate) const M_COMPRESSED_LARGEST: u8 = 0b101 << 5;
pub(crate) const M_COMPRESSED_INFINITY: u8 = 0b110 << 5;

#[inline]
fn is_compressed(msb: u8) -> bool {
    let mdata = msb & M_MASK;
    !(mdata == M_UNCOMPRESSED || mdata == M_UNCOMPRESSED_INFINITY)
}

/// Big-endian regular-form coordinate codec, plus the lexicographic order
/// used to disambiguate the sign of a compressed y coordinate.
pub trait EncodableField: Sized {
    const ENCODED_SIZE: usize;

    /// Writes `ENCODED_SIZE` big-endian bytes into `dest`.
    fn write_be(&self, dest: &mut [u8]);

    /// Reads `ENCODED_SIZE` big-endian bytes; values at or above the modulus
    /// are reduced, garbage is caught by the curve checks downstream.
    fn read_be(src: &[u8]) -> Self;

    /// Whether the element is larger than its additive inverse.
    fn lexicographically_largest(&self) -> bool;
}

impl<P: Fp384Parameters> EncodableField for Fp384<P> {
    const ENCODED_SIZE: usize = 48;

    fn write_be(&self, dest: &mut [u8]) {
        let repr = self.into_repr();
        for (chunk, limb) in dest[..48].chunks_mut(8).zip(repr.as_ref().iter().rev()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
    }

    fn read_be(src: &[u8]) -> Self {
        let mut repr = BigInteger384::default();
        for (chunk, limb) in src[..48].chunks(8).zip(repr.as_mut().iter_mut().rev()) {
            *limb = u64::from_be_bytes(chunk.try_into().expect("8-byte chunk"));
        }
        Self::from_repr(repr)
    }

    fn lexicographically_largest(&self) -> bool {
        self.into_repr() > P::MODULUS_MINUS_ONE_DIV_TWO
    }
}

impl<P: Fp2Parameters> EncodableField for Fp2<P>
where
    P::Fp: EncodableField,
{
    const ENCODED_SIZE: usize = 2 * <P::Fp as EncodableField>::ENCODED_SIZE;

    /// The imaginary limb is written first: `c1 ‖ c0`.
    fn write_be(&self, dest: &mut [u8]) {
        let n = <P::Fp as EncodableField>::ENCODED_SIZE;
        self.c1.write_be(&mut dest[..n]);
        self.c0.write_be(&mut dest[n..2 * n]);
    }

    fn read_be(src: &[u8]) -> Self {
        let n = <P::Fp as EncodableField>::ENCODED_SIZE;
        let c1 = P::Fp::read_be(&src[..n]);
        let c0 = P::Fp::read_be(&src[n..2 * n]);
        Fp2::new(c0, c1)
    }

    fn lexicographically_largest(&self) -> bool {
        if !self.c1.is_zero() {
            self.c1.lexicographically_largest()
        } else {
            self.c0.lexicographically_largest()
        }
    }
}

impl<P: SWModelParameters> GroupAffine<P>
where
    P::BaseField: EncodableField,
{
    /// Size of the compressed encoding.
    pub const SERIALIZED_SIZE: usize = <P::BaseField as EncodableField>::ENCODED_SIZE;

    /// Size of the uncompressed encoding.
    pub const UNCOMPRESSED_SIZE: usize = 2 * <P::BaseField as EncodableField>::ENCODED_SIZE;

    /// The compressed encoding: x with the sign of y in the metadata bits.
    pub fn bytes(&self) -> Vec<u8> {
        let mut res = vec![0u8; Self::SERIALIZED_SIZE];
        if self.is_zero() {
            res[0] = M_COMPRESSED_INFINITY;
            return res;
        }
        self.x.write_be(&mut res);
        res[0] |= if self.y.lexicographically_largest() {
            M_COMPRESSED_LARGEST
        } else {
            M_COMPRESSED_SMALLEST
        };
        res
    }

    /// The uncompressed encoding: x ‖ y.
    pub fn raw_bytes(&self) -> Vec<u8> {
        let n = Self::SERIALIZED_SIZE;
        let mut res = vec![0u8; 2 * n];
        if self.is_zero() {
            res[0] = M_UNCOMPRESSED_INFINITY;
            return res;
        }
        self.x.write_be(&mut res[..n]);
        self.y.write_be(&mut res[n..]);
        res[0] |= M_UNCOMPRESSED;
        res
    }

    /// Parses either encoding, returning the point and the number of bytes
    /// consumed. Every non-identity decode is curve- and subgroup-checked;
    /// identity encodings are accepted without inspecting payload bytes.
    pub fn set_bytes(buf: &[u8]) -> Result<(Self, usize), SerializationError> {
        let n = Self::SERIALIZED_SIZE;
        if buf.len() < n {
            return Err(SerializationError::ShortBuffer);
        }

        let mdata = buf[0] & M_MASK;

        if (mdata == M_UNCOMPRESSED || mdata == M_UNCOMPRESSED_INFINITY) && buf.len() < 2 * n {
            return Err(SerializationError::ShortBuffer);
        }

        if mdata == M_COMPRESSED_INFINITY {
            return Ok((Self::zero(), n));
        }
        if mdata == M_UNCOMPRESSED_INFINITY {
            return Ok((Self::zero(), 2 * n));
        }

        if mdata == M_UNCOMPRESSED {
            let x = P::BaseField::read_be(&buf[..n]);
            let y = P::BaseField::read_be(&buf[n..2 * n]);
            let p = Self::new(x, y);
            if !p.is_on_curve() {
                return Err(SerializationError::NotOnCurve);
            }
            if !p.is_in_subgroup() {
                return Err(SerializationError::NotInSubgroup);
            }
            return Ok((p, 2 * n));
        }

        // compressed: clear the metadata bits from a local copy and solve
        // the curve equation for y
        let (mut p, mdata, _) = Self::set_compressed_x_unchecked(buf);
        p.compute_y(mdata)?;
        Ok((p, n))
    }

    /// Cheap first half of a compressed decode: parses x, leaves y at zero.
    /// Returns the metadata byte and whether the encoding was the identity.
    fn set_compressed_x_unchecked(buf: &[u8]) -> (Self, u8, bool) {
        let n = Self::SERIALIZED_SIZE;
        let mdata = buf[0] & M_MASK;
        if mdata == M_COMPRESSED_INFINITY {
            return (Self::zero(), mdata, true);
        }
        let mut buf_x = buf[..n].to_vec();
        buf_x[0] &= !M_MASK;
        (
            Self::new(P::BaseField::read_be(&buf_x), P::BaseField::zero()),
            mdata,
            false,
        )
    }

    /// Expensive second half: recovers y from `y² = x³ + b`, selects the
    /// root matching the metadata, and subgroup-checks.
    fn compute_y(&mut self, mdata: u8) -> Result<(), SerializationError> {
        let y_squared = self.x.square() * &self.x + &P::COEFF_B;
        let y = y_squared
            .sqrt()
            .ok_or(SerializationError::NoSquareRoot)?;

        self.y = if y.lexicographically_largest() {
            if mdata == M_COMPRESSED_SMALLEST {
                -y
            } else {
                y
            }
        } else if mdata == M_COMPRESSED_LARGEST {
            -y
        } else {
            y
        };

        if !self.is_in_subgroup() {
            return Err(SerializationError::NotInSubgroup);
        }
        Ok(())
    }
}

/// Streams points into a writer, compressed by default.
pub struct Encoder<W: Write> {
    writer: W,
    raw: bool,
    written: u64,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Encoder {
            writer,
            raw: false,
            written: 0,
        }
    }

    /// An encoder that writes uncompressed (raw) encodings.
    pub fn raw(writer: W) -> Self {
        Encoder {
            writer,
            raw: true,
            written: 0,
        }
    }

    pub fn encode<P: SWModelParameters>(
        &mut self,
        p: &GroupAffine<P>,
    ) -> Result<(), SerializationError>
    where
        P::BaseField: EncodableField,
    {
        let buf = if self.raw { p.raw_bytes() } else { p.bytes() };
        self.writer.write_all(&buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    /// Writes a u32 big-endian length prefix followed by the encodings.
    pub fn encode_slice<P: SWModelParameters>(
        &mut self,
        points: &[GroupAffine<P>],
    ) -> Result<(), SerializationError>
    where
        P::BaseField: EncodableField,
    {
        self.writer
            .write_all(&(points.len() as u32).to_be_bytes())?;
        self.written += 4;
        for p in points {
            self.encode(p)?;
        }
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }
}

/// Streams points out of a reader, accepting both encodings.
pub struct Decoder<R: Read> {
    reader: R,
    read: u64,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Decoder { reader, read: 0 }
    }

    pub fn decode<P: SWModelParameters>(&mut self) -> Result<GroupAffine<P>, SerializationError>
    where
        P::BaseField: EncodableField,
    {
        let n = GroupAffine::<P>::SERIALIZED_SIZE;
        let mut buf = vec![0u8; 2 * n];
        self.reader.read_exact(&mut buf[..n])?;
        self.read += n as u64;

        // the metadata byte decides whether more bytes follow
        let mut total = n;
        if !is_compressed(buf[0]) {
            self.reader.read_exact(&mut buf[n..])?;
            self.read += n as u64;
            total = 2 * n;
        }
        let (p, consumed) = GroupAffine::set_bytes(&buf[..total])?;
        debug_assert_eq!(consumed, total);
        Ok(p)
    }

    /// Decodes a length-prefixed sequence. The cheap x parse runs serially;
    /// the y recovery of all compressed entries runs in parallel, surfacing
    /// a single [`SerializationError::BatchDecode`] if any worker failed.
    pub fn decode_slice<P: SWModelParameters>(
        &mut self,
    ) -> Result<Vec<GroupAffine<P>>, SerializationError>
    where
        P::BaseField: EncodableField,
    {
        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf)?;
        self.read += 4;
        let len = u32::from_be_bytes(len_buf) as usize;

        let n = GroupAffine::<P>::SERIALIZED_SIZE;
        let mut points = vec![GroupAffine::<P>::zero(); len];
        // metadata byte per entry still awaiting y recovery; compressed
        // metadata always has the high bit set, so 0 doubles as "done"
        let mut pending = vec![0u8; len];
        let mut buf = vec![0u8; 2 * n];

        for i in 0..len {
            self.reader.read_exact(&mut buf[..n])?;
            self.read += n as u64;
            if !is_compressed(buf[0]) {
                self.reader.read_exact(&mut buf[n..])?;
                self.read += n as u64;
                let (p, _) = GroupAffine::set_bytes(&buf)?;
                points[i] = p;
            } else {
                let (p, mdata, is_infinity) = GroupAffine::set_compressed_x_unchecked(&buf[..n]);
                points[i] = p;
                if !is_infinity {
                    pending[i] = mdata;
                }
            }
        }

        let failures = AtomicU64::new(0);
        points
            .par_iter_mut()
            .zip(pending.par_iter())
            .for_each(|(p, &mdata)| {
                if mdata != 0 && p.compute_y(mdata).is_err() {
                    failures.fetch_add(1, Ordering::Relaxed);
                }
            });
        if failures.load(Ordering::Relaxed) != 0 {
            return Err(SerializationError::BatchDecode);
        }
        Ok(points)
    }

    pub fn bytes_read(&self) -> u64 {
        self.read
    }
}
