//! The quadratic extension Fq2 = Fq[u]/(u² + 1) of the BLS12-381 base field.

use crate::biginteger::BigInteger384 as BigInteger;
use crate::fields::bls12_381::{Fq, FqParameters};
use crate::fields::{Fp2, Fp2Parameters, FpParameters};
use crate::field_new;

pub type Fq2 = Fp2<Fq2Parameters>;

pub struct Fq2Parameters;

impl Fp2Parameters for Fq2Parameters {
    type Fp = Fq;

    /// NONRESIDUE = -1
    const NONRESIDUE: Fq = field_new!(
        Fq,
        BigInteger([
            0x43f5fffffffcaaae,
            0x32b7fff2ed47fffd,
            0x07e83a49a2e99d69,
            0xeca8f3318332bb7a,
            0xef148d1ea0f4c069,
            0x040ab3263eff0206,
        ])
    );

    /// QUADRATIC_NONRESIDUE = 1 + u (its norm 2 is a non-residue of Fq)
    const QUADRATIC_NONRESIDUE: (Fq, Fq) = (
        field_new!(Fq, FqParameters::R),
        field_new!(Fq, FqParameters::R),
    );

    /// FROBENIUS_COEFF_FP2_C1[k] = (-1)^((q^k - 1) / 2), i.e. [1, -1]:
    /// the Frobenius on Fq2 is conjugation
    const FROBENIUS_COEFF_FP2_C1: [Fq; 2] = [
        field_new!(Fq, FqParameters::R),
        field_new!(
            Fq,
            BigInteger([
                0x43f5fffffffcaaae,
                0x32b7fff2ed47fffd,
                0x07e83a49a2e99d69,
                0xeca8f3318332bb7a,
                0xef148d1ea0f4c069,
                0x040ab3263eff0206,
            ])
        ),
    ];
}
