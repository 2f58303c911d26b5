//! The BLS12-381 scalar field, a 255 bit prime field with 2-adicity 32.

use crate::biginteger::BigInteger256 as BigInteger;
use crate::fields::{Fp256, Fp256Parameters, FpParameters};

pub type Fr = Fp256<FrParameters>;

pub struct FrParameters;

impl Fp256Parameters for FrParameters {}
impl FpParameters for FrParameters {
    type BigInt = BigInteger;

    /// MODULUS =
    /// 5243587517512619047944774050818596583769055250052763782260365869993\
    /// 8581184513
    const MODULUS: BigInteger = BigInteger([
        0xffffffff00000001,
        0x53bda402fffe5bfe,
        0x3339d80809a1d805,
        0x73eda753299d7d48,
    ]);

    const MODULUS_BITS: u32 = 255;

    const REPR_SHAVE_BITS: u32 = 1;

    const R: BigInteger = BigInteger([
        0x00000001fffffffe,
        0x5884b7fa00034802,
        0x998c4fefecbc4ff5,
        0x1824b159acc5056f,
    ]);

    const R2: BigInteger = BigInteger([
        0xc999e990f3f29c6d,
        0x2b6cedcb87925c23,
        0x05d314967254398f,
        0x0748d9d99f59ff11,
    ]);

    const INV: u64 = 0xfffffffeffffffff;

    /// GENERATOR = 7
    const GENERATOR: BigInteger = BigInteger([
        0x0000000efffffff1,
        0x17e363d300189c0f,
        0xff9c57876f8457b0,
        0x351332208fc5a8c4,
    ]);

    const TWO_ADICITY: u32 = 32;

    /// ROOT_OF_UNITY = GENERATOR^T =
    /// 1023822735773949582365103057584923206255886018028447754118950815999\
    /// 1286009131
    const ROOT_OF_UNITY: BigInteger = BigInteger([
        0xb9b58d8c5f0e466a,
        0x5b1b4c801819d7ec,
        0x0af53ae352a31e64,
        0x5bf3adda19e9b27b,
    ]);

    const MODULUS_MINUS_ONE_DIV_TWO: BigInteger = BigInteger([
        0x7fffffff80000000,
        0xa9ded2017fff2dff,
        0x199cec0404d0ec02,
        0x39f6d3a994cebea4,
    ]);

    const T: BigInteger = BigInteger([
        0xfffe5bfeffffffff,
        0x09a1d80553bda402,
        0x299d7d483339d808,
        0x0000000073eda753,
    ]);

    const T_MINUS_ONE_DIV_TWO: BigInteger = BigInteger([
        0x7fff2dff7fffffff,
        0x04d0ec02a9ded201,
        0x94cebea4199cec04,
        0x0000000039f6d3a9,
    ]);
}
