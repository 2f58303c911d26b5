use crate::biginteger::BigInteger;
use crate::curves::models::short_weierstrass_jacobian::{GroupAffine, GroupProjective};
use crate::curves::models::SWModelParameters;
use crate::fields::PrimeField;
use rayon::prelude::*;

type ScalarRepr<P> =
    <<P as crate::curves::models::ModelParameters>::ScalarField as PrimeField>::BigInt;

pub struct FixedBaseMSM;

impl FixedBaseMSM {
    /// Multiplies one base by every scalar, returning affine results.
    ///
    /// Uses a signed-digit windowed walk over a single precomputed table:
    /// recoding digits into `[-2^(c-1), 2^(c-1)]` halves the table to
    /// `2^(c-1)` entries, with the window's top bit flagging subtraction.
    /// Scalars are regular-form representations.
    pub fn batch_scalar_mul<P: SWModelParameters>(
        base: &GroupAffine<P>,
        scalars: &[ScalarRepr<P>],
    ) -> Vec<GroupAffine<P>> {
        if scalars.is_empty() {
            return Vec::new();
        }
        let scalar_bits = ScalarRepr::<P>::NUM_LIMBS * 64;
        let c = Self::best_window(scalars.len(), scalar_bits);
        let num_chunks = (scalar_bits + c - 1) / c;
        let msb_window = 1u64 << (c - 1);

        // table[k - 1] = k·base, for k in 1..=2^(c-1)
        let mut table_jac = Vec::with_capacity(1 << (c - 1));
        let mut acc = GroupProjective::<P>::zero();
        for _ in 0..(1 << (c - 1)) {
            acc.add_assign_mixed(base);
            table_jac.push(acc);
        }
        let mut table = vec![GroupAffine::<P>::zero(); table_jac.len()];
        GroupProjective::batch_jacobian_to_affine(&table_jac, &mut table);

        let results: Vec<GroupProjective<P>> = scalars
            .par_iter()
            .map(|scalar| {
                let digits = Self::signed_digits::<P>(scalar, c, num_chunks);
                let mut p = GroupProjective::<P>::zero();
                let top = digits.len() - 1;
                for chunk in (0..digits.len()).rev() {
                    if chunk != top {
                        for _ in 0..c {
                            p.double_in_place();
                        }
                    }
                    let bits = digits[chunk];
                    if bits == 0 {
                        continue;
                    }
                    if bits & msb_window == 0 {
                        p.add_assign_mixed(&table[(bits - 1) as usize]);
                    } else {
                        let t = -table[(bits & !msb_window) as usize];
                        p.add_assign_mixed(&t);
                    }
                }
                p
            })
            .collect();

        let mut out = vec![GroupAffine::<P>::zero(); results.len()];
        GroupProjective::batch_jacobian_to_affine(&results, &mut out);
        out
    }

    /// Picks the window width minimizing the analytic group-operation cost
    /// `2^(c-1) + n·(L + ⌈L/c⌉)`.
    fn best_window(num_scalars: usize, scalar_bits: usize) -> usize {
        let n = num_scalars as u64;
        let mut best_c = 2;
        let mut min_cost = u64::MAX;
        for c in 2..18usize {
            let mut num_chunks = (scalar_bits / c) as u64;
            if scalar_bits % c != 0 {
                num_chunks += 1;
            }
            let cost = (1u64 << (c - 1)) + n * (scalar_bits as u64 + num_chunks);
            if cost < min_cost {
                min_cost = cost;
                best_c = c;
            }
        }
        best_c
    }

    /// Recode into signed `c`-bit digits in `[-2^(c-1), 2^(c-1) - 1]`,
    /// least significant chunk first; one extra chunk absorbs a final carry.
    /// A negative digit `-m` is stored as `(m - 1) | msb_window`; zero means
    /// skip.
    fn signed_digits<P: SWModelParameters>(
        scalar: &ScalarRepr<P>,
        c: usize,
        num_chunks: usize,
    ) -> Vec<u64> {
        let limbs = scalar.as_ref();
        let mask = (1u64 << c) - 1;
        let msb_window = 1u64 << (c - 1);
        let mut digits = vec![0u64; num_chunks + 1];
        let mut carry = 0u64;

        for (chunk, digit) in digits.iter_mut().take(num_chunks).enumerate() {
            let bit_pos = chunk * c;
            let limb = bit_pos / 64;
            let shift = bit_pos % 64;
            let mut d = (limbs[limb] >> shift) & mask;
            if shift + c > 64 && limb + 1 < limbs.len() {
                d |= (limbs[limb + 1] << (64 - shift)) & mask;
            }
            d += carry;
            if d == 1 << c {
                // the raw window was all ones and absorbed a carry
                carry = 1;
            } else if d >= msb_window {
                // recode as a subtraction and carry into the next chunk
                carry = 1;
                *digit = ((1 << c) - d - 1) | msb_window;
            } else {
                carry = 0;
                *digit = d;
            }
        }
        digits[num_chunks] = carry;
        digits
    }
}
