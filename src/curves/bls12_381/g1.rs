use crate::biginteger::{BigInteger256, BigInteger384};
use crate::curves::models::short_weierstrass_jacobian::{GroupAffine, GroupProjective};
use crate::curves::models::{LatticeBasis, ModelParameters, SWModelParameters};
use crate::field_new;
use crate::fields::bls12_381::{Fq, Fr};

pub type G1Affine = GroupAffine<Bls12_381G1Parameters>;
pub type G1Projective = GroupProjective<Bls12_381G1Parameters>;

#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct Bls12_381G1Parameters;

impl ModelParameters for Bls12_381G1Parameters {
    type BaseField = Fq;
    type ScalarField = Fr;
}

impl SWModelParameters for Bls12_381G1Parameters {
    /// COEFF_B = 4
    const COEFF_B: Fq = field_new!(
        Fq,
        BigInteger384([
            0xaa270000000cfff3,
            0x53cc0032fc34000a,
            0x478fe97a6b0a807f,
            0xb1d37ebee6ba24d7,
            0x8ec9733bbf78ab2f,
            0x09d645513d83de7e,
        ])
    );

    const AFFINE_GENERATOR_COEFFS: (Fq, Fq) = (G1_GENERATOR_X, G1_GENERATOR_Y);

    /// ω, the cube root of unity pairing with λ = x² - 1:
    /// 4002409555221667392624310435006688643935503118305586438271171395842\
    /// 971157480381377015405980053539358417135540939436
    const ENDO_COEFF: Fq = field_new!(
        Fq,
        BigInteger384([
            0xcd03c9e48671f071,
            0x5dab22461fcda5d2,
            0x587042afd3851b95,
            0x8eb60ebe01bacb9e,
            0x03f97d6e83d050d2,
            0x18f0206554638741,
        ])
    );

    /// λ = x² - 1 = 0xac45a4010001a40200000000ffffffff
    const LAMBDA: &'static [u64] = &[0x00000000ffffffff, 0xac45a4010001a402];

    /// ((x² - 1, -1), (1, x²)), determinant x⁴ - x² + 1 = r.
    const GLV_BASIS: LatticeBasis = LatticeBasis {
        a1: (false, &[0x00000000ffffffff, 0xac45a4010001a402]),
        b1: (true, &[1]),
        a2: (false, &[1]),
        b2: (false, &[0x0000000100000000, 0xac45a4010001a402]),
    };

    /// The short-vector membership test: with λ = x² - 1, a point of the
    /// curve lies in the r-order subgroup iff `φ(P) + P = [x²]P`.
    fn is_in_subgroup(p: &G1Affine) -> bool {
        if p.is_zero() {
            return true;
        }
        let jac = p.into_projective();
        let mut lhs = jac.phi();
        lhs.add_assign(&jac);
        lhs == jac.mul_windowed(&X_SQUARED)
    }

    fn generator_table() -> &'static [G1Affine] {
        &G1_GENERATOR_TABLE
    }
}

/// x², a 128 bit scalar.
const X_SQUARED: BigInteger256 =
    BigInteger256([0x0000000100000000, 0xac45a4010001a402, 0, 0]);

/// G1_GENERATOR_X =
/// 3685416753713387016781088315183077757961620795782546409894578378688607\
/// 592378376318836054947676345821548104185464507
pub const G1_GENERATOR_X: Fq = field_new!(
    Fq,
    BigInteger384([
        0x5cb38790fd530c16,
        0x7817fc679976fff5,
        0x154f95c7143ba1c1,
        0xf0ae6acdf3d0e747,
        0xedce6ecc21dbf440,
        0x120177419e0bfb75,
    ])
);

/// G1_GENERATOR_Y =
/// 1339506544944476473020471379941921221584933875938349620426543736416511\
/// 423956333506472724655353366534992391756441569
pub const G1_GENERATOR_Y: Fq = field_new!(
    Fq,
    BigInteger384([
        0xbaac93d50ce72271,
        0x8c22631a7918fd8e,
        0xdd595f13570725ce,
        0x51ac582950405194,
        0x0e1c8c3fad0059c0,
        0x0bbc3efc5008a26a,
    ])
);

lazy_static! {
    static ref G1_GENERATOR_TABLE: Vec<G1Affine> = G1Projective::build_generator_table();
}
