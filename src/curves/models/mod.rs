use crate::fields::{Field, PrimeField, SquareRootField};

pub mod short_weierstrass_jacobian;

use self::short_weierstrass_jacobian::GroupAffine;

pub trait ModelParameters: Send + Sync + 'static {
    type BaseField: Field + SquareRootField;
    type ScalarField: PrimeField;
}

/// A short basis ((a1, b1), (a2, b2)) of the lattice of pairs `(u, v)` with
/// `u + v·λ ≡ 0 mod r`, stored sign-magnitude with little-endian u64 limbs.
/// Its determinant must equal `r`; the component magnitudes are then of the
/// order of `√r`, which is what makes the GLV decomposition halve scalar
/// lengths.
pub struct LatticeBasis {
    pub a1: (bool, &'static [u64]),
    pub b1: (bool, &'static [u64]),
    pub a2: (bool, &'static [u64]),
    pub b2: (bool, &'static [u64]),
}

/// Parameters of a short Weierstrass curve `y² = x³ + b` (the `a = 0` shape
/// of pairing-friendly families) with an efficient endomorphism.
pub trait SWModelParameters: ModelParameters + Sized {
    const COEFF_B: Self::BaseField;

    const AFFINE_GENERATOR_COEFFS: (Self::BaseField, Self::BaseField);

    /// A non-trivial cube root of unity ω: `φ(x, y) = (ω·x, y)` acts on the
    /// prime-order subgroup as multiplication by [`Self::LAMBDA`].
    const ENDO_COEFF: Self::BaseField;

    /// The eigenvalue λ of φ, as a little-endian scalar representation.
    const LAMBDA: &'static [u64];

    /// The lattice basis used to split scalars as `s ≡ k1 + k2·λ mod r`.
    const GLV_BASIS: LatticeBasis;

    /// Prime-order subgroup membership. The check polynomial encodes a short
    /// lattice vector specific to each curve and cannot be shared.
    fn is_in_subgroup(p: &GroupAffine<Self>) -> bool;

    /// Process-wide table of small multiples of the generator, built once.
    fn generator_table() -> &'static [GroupAffine<Self>];
}
