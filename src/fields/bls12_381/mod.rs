//! Scalar field Fr, base field Fq and its quadratic extension Fq2 for
//! BLS12-381.
//!
//! Fq2 is built as Fq[u]/(u² + 1); q ≡ 3 mod 4 makes -1 a quadratic
//! non-residue.

pub mod fr;
pub use self::fr::*;

pub mod fq;
pub use self::fq::*;

pub mod fq2;
pub use self::fq2::*;

#[cfg(test)]
mod tests;
