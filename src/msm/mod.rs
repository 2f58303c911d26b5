//! Multi-scalar multiplication engines.
//!
//! [`VariableBaseMSM`] computes `Σ sᵢ·Pᵢ` over arbitrary bases with a
//! parallel, pipelined Pippenger algorithm; [`FixedBaseMSM`] multiplies a
//! single base by many scalars through a shared window table.

pub mod variable_base;
pub use self::variable_base::VariableBaseMSM;

pub mod fixed_base;
pub use self::fixed_base::FixedBaseMSM;
