//! Curve models and their instantiations.

pub mod models;
pub use self::models::*;

pub mod bls12_381;
