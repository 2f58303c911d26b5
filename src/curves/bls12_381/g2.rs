use crate::biginteger::{BigInteger256, BigInteger384};
use crate::curves::models::short_weierstrass_jacobian::{GroupAffine, GroupProjective};
use crate::curves::models::{LatticeBasis, ModelParameters, SWModelParameters};
use crate::field_new;
use crate::fields::bls12_381::{Fq, Fq2, Fr};
use crate::fields::Field;

pub type G2Affine = GroupAffine<Bls12_381G2Parameters>;
pub type G2Projective = GroupProjective<Bls12_381G2Parameters>;

#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct Bls12_381G2Parameters;

impl ModelParameters for Bls12_381G2Parameters {
    type BaseField = Fq2;
    type ScalarField = Fr;
}

impl SWModelParameters for Bls12_381G2Parameters {
    /// COEFF_B = 4(u + 1), the M-twist of the G1 coefficient
    const COEFF_B: Fq2 = field_new!(Fq2, FOUR, FOUR);

    const AFFINE_GENERATOR_COEFFS: (Fq2, Fq2) = (G2_GENERATOR_X, G2_GENERATOR_Y);

    /// The cube root of unity acting on the twist with eigenvalue
    /// λ = x² - 1; a base field scalar embedded into Fq2.
    const ENDO_COEFF: Fq2 = field_new!(
        Fq2,
        field_new!(
            Fq,
            BigInteger384([
                0x30f1361b798a64e8,
                0xf3b8ddab7ece5a2a,
                0x16a8ca3ac61577f7,
                0xc26a2ff874fd029b,
                0x3636b76660701c6e,
                0x051ba4ab241b6160,
            ])
        ),
        ZERO
    );

    /// λ = x² - 1, shared with G1 (same scalar field).
    const LAMBDA: &'static [u64] = &[0x00000000ffffffff, 0xac45a4010001a402];

    const GLV_BASIS: LatticeBasis = LatticeBasis {
        a1: (false, &[0x00000000ffffffff, 0xac45a4010001a402]),
        b1: (true, &[1]),
        a2: (false, &[1]),
        b2: (false, &[0x0000000100000000, 0xac45a4010001a402]),
    };

    /// G2 membership uses the untwist-Frobenius-twist endomorphism ψ, which
    /// acts on the r-order subgroup as multiplication by x: check
    /// `ψ(Q) = [x]Q` (x is negative, so the right side is `-[|x|]Q`).
    fn is_in_subgroup(p: &G2Affine) -> bool {
        if p.is_zero() {
            return true;
        }
        let psi_p = psi(p).into_projective();
        let rhs = -p.into_projective().mul_windowed(&X_ABS);
        psi_p == rhs
    }

    fn generator_table() -> &'static [G2Affine] {
        &G2_GENERATOR_TABLE
    }
}

/// |x| as a scalar.
const X_ABS: BigInteger256 = BigInteger256([0xd201000000010000, 0, 0, 0]);

/// ψ(x, y) = (c_x·x̄, c_y·ȳ) with c_x = ξ^((p-1)/3), c_y = ξ^((p-1)/2) for
/// the twist element ξ = u + 1. Conjugation is the Fq2 Frobenius.
pub(crate) fn psi(p: &G2Affine) -> G2Affine {
    if p.is_zero() {
        return G2Affine::zero();
    }
    let mut x = p.x;
    let mut y = p.y;
    x.frobenius_map(1);
    y.frobenius_map(1);
    x *= &PSI_COEFF_X;
    y *= &PSI_COEFF_Y;
    G2Affine::new(x, y)
}

const ZERO: Fq = field_new!(Fq, BigInteger384([0, 0, 0, 0, 0, 0]));

/// 4 in Montgomery form, one coefficient of the twist constant.
const FOUR: Fq = field_new!(
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

/// ξ^((p-1)/3) = u ·
/// 4002409555221667392624310435006688643935503118305586438271171395842971\
/// 157480381377015405980053539358417135540939437
const PSI_COEFF_X: Fq2 = field_new!(
    Fq2,
    ZERO,
    field_new!(
        Fq,
        BigInteger384([
            0x890dc9e4867545c3,
            0x2af322533285a5d5,
            0x50880866309b7e2c,
            0xa20d1b8c7e881024,
            0x14e4f04fe2db9068,
            0x14e56d3f1564853a,
        ])
    )
);

/// ξ^((p-1)/2)
const PSI_COEFF_Y: Fq2 = field_new!(
    Fq2,
    field_new!(
        Fq,
        BigInteger384([
            0x3e2f585da55c9ad1,
            0x4294213d86c18183,
            0x382844c88b623732,
            0x92ad2afd19103e18,
            0x1d794e4fac7cf0b9,
            0x0bd592fc7d825ec8,
        ])
    ),
    field_new!(
        Fq,
        BigInteger384([
            0x7bcfa7a25aa30fda,
            0xdc17dec12a927e7c,
            0x2f088dd86b4ebef1,
            0xd1ca2087da74d4a7,
            0x2da2596696cebc1d,
            0x0e2b7eedbbfd87d2,
        ])
    )
);

/// G2_GENERATOR_X = G2_GENERATOR_X_C0 + G2_GENERATOR_X_C1 · u
pub const G2_GENERATOR_X: Fq2 = field_new!(Fq2, G2_GENERATOR_X_C0, G2_GENERATOR_X_C1);

pub const G2_GENERATOR_X_C0: Fq = field_new!(
    Fq,
    BigInteger384([
        0xf5f28fa202940a10,
        0xb3f5fb2687b4961a,
        0xa1a893b53e2ae580,
        0x9894999d1a3caee9,
        0x6f67b7631863366b,
        0x058191924350bcd7,
    ])
);

pub const G2_GENERATOR_X_C1: Fq = field_new!(
    Fq,
    BigInteger384([
        0xa5a9c0759e23f606,
        0xaaa0c59dbccd60c3,
        0x3bb17e18e2867806,
        0x1b1ab6cc8541b367,
        0xc2b6ed0ef2158547,
        0x11922a097360edf3,
    ])
);

/// G2_GENERATOR_Y = G2_GENERATOR_Y_C0 + G2_GENERATOR_Y_C1 · u
pub const G2_GENERATOR_Y: Fq2 = field_new!(Fq2, G2_GENERATOR_Y_C0, G2_GENERATOR_Y_C1);

pub const G2_GENERATOR_Y_C0: Fq = field_new!(
    Fq,
    BigInteger384([
        0x4c730af860494c4a,
        0x597cfa1f5e369c5a,
        0xe7e6856caa0a635a,
        0xbbefb5e96e0d495f,
        0x07d3a975f0ef25a2,
        0x0083fd8e7e80dae5,
    ])
);

pub const G2_GENERATOR_Y_C1: Fq = field_new!(
    Fq,
    BigInteger384([
        0xadc0fc92df64b05d,
        0x18aa270a2b1461dc,
        0x86adac6a3be4eba0,
        0x79495c4ec93da33a,
        0xe7175850a43ccaed,
        0x0b2bc2a163de1bf2,
    ])
);

lazy_static! {
    static ref G2_GENERATOR_TABLE: Vec<G2Affine> = G2Projective::build_generator_table();
}
