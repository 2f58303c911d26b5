//! BLS12-381, the ZCash/IETF pairing curve: a Barreto-Lynn-Scott curve of
//! embedding degree 12 with a 381 bit base field and a 255 bit prime-order
//! subgroup.
//!
//! The curve parameter is x = -0xd201000000010000, with r = x⁴ - x² + 1 and
//! p = (x - 1)²·r/3 + x. G1 lives on `y² = x³ + 4` over Fq, G2 on the twist
//! `y² = x³ + 4(u + 1)` over Fq2.

pub mod g1;
pub use self::g1::{G1Affine, G1Projective};

pub mod g2;
pub use self::g2::{G2Affine, G2Projective};

#[cfg(test)]
mod tests;
