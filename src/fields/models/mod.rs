//! Montgomery arithmetic models for the moduli widths in use, and the
//! quadratic extension tower level.
//!
//! - `Fp256` captures 4-word moduli (scalar fields),
//! - `Fp384` captures 6-word moduli (base fields),
//! - `Fp2` is the quadratic extension used by G2.

pub mod fp_256;
pub use self::fp_256::*;

pub mod fp_384;
pub use self::fp_384::*;

pub mod fp2;
pub use self::fp2::*;
