use crate::biginteger::BigInteger;
use crate::curves::models::short_weierstrass_jacobian::{
    GroupAffine, GroupExtended, GroupProjective,
};
use crate::curves::models::SWModelParameters;
use crate::fields::PrimeField;
use crossbeam::channel::bounded;
use std::sync::Mutex;

type ScalarRepr<P> =
    <<P as crate::curves::models::ModelParameters>::ScalarField as PrimeField>::BigInt;

/// Under this many points a plain windowed multi-exponentiation beats the
/// bucket pipeline.
const MIN_PIPELINE_POINTS: usize = 50;

pub struct VariableBaseMSM;

impl VariableBaseMSM {
    /// Computes `Σ scalars[i] · bases[i]`.
    ///
    /// Scalars are regular-form (non-Montgomery) representations; a zero
    /// scalar or identity base contributes nothing. The call blocks until
    /// the internally parallel computation finishes.
    pub fn multi_scalar_mul<P: SWModelParameters>(
        bases: &[GroupAffine<P>],
        scalars: &[ScalarRepr<P>],
    ) -> GroupProjective<P> {
        assert_eq!(
            bases.len(),
            scalars.len(),
            "bases and scalars must have equal length"
        );
        if bases.is_empty() {
            return GroupProjective::zero();
        }
        if bases.len() <= MIN_PIPELINE_POINTS {
            let jac: Vec<_> = bases.iter().map(|b| b.into_projective()).collect();
            return Self::windowed_multi_exp(&jac, scalars);
        }
        Self::msm_pipelined(bases, scalars)
    }

    /// Empirical window widths by input size.
    fn window_size(num_points: usize) -> usize {
        if num_points <= 10_000 {
            8
        } else if num_points <= 80_000 {
            11
        } else if num_points <= 400_000 {
            13
        } else if num_points <= 800_000 {
            14
        } else {
            16
        }
    }

    /// The two-stage bucket pipeline.
    ///
    /// Stage A workers slice every scalar into `c`-bit digits and build, per
    /// chunk of bit positions, one index list per non-zero digit value.
    /// Stage B workers wait on their chunk's one-shot channel, then fold the
    /// buckets from the highest digit down with an extended-coordinates
    /// accumulator (adding the running `tmp` after every bucket weights
    /// bucket `d` by `d`). The reducer combines chunk accumulators from the
    /// most significant chunk down, doubling by each chunk's actual width.
    fn msm_pipelined<P: SWModelParameters>(
        bases: &[GroupAffine<P>],
        scalars: &[ScalarRepr<P>],
    ) -> GroupProjective<P> {
        let num_points = bases.len();
        debug_assert!(num_points < u32::MAX as usize);
        let c = Self::window_size(num_points);
        let scalar_bits = ScalarRepr::<P>::NUM_LIMBS * 64;
        let num_chunks = (scalar_bits + c - 1) / c;
        let buckets = (1usize << c) - 1;

        // descending bit positions, partitioned in order into chunks; the
        // last chunk may be shorter
        let mut bits_for_chunk: Vec<Vec<usize>> = Vec::with_capacity(num_chunks);
        let mut counter = scalar_bits;
        for _ in 0..num_chunks {
            let width = std::cmp::min(c, counter);
            bits_for_chunk.push((counter - width..counter).rev().collect());
            counter -= width;
        }

        // one-shot channels: stage A -> stage B carry the finished index
        // lists, stage B -> reducer carry the chunk accumulator
        let mut index_txs = Vec::with_capacity(num_chunks);
        let mut index_rxs = Vec::with_capacity(num_chunks);
        let mut acc_txs = Vec::with_capacity(num_chunks);
        let mut acc_rxs = Vec::with_capacity(num_chunks);
        for _ in 0..num_chunks {
            let (tx, rx) = bounded::<Vec<Vec<u32>>>(1);
            index_txs.push(Some(tx));
            index_rxs.push(Some(rx));
            let (tx, rx) = bounded::<GroupProjective<P>>(1);
            acc_txs.push(Some(tx));
            acc_rxs.push(rx);
        }

        let num_workers = std::cmp::min(rayon::current_num_threads(), num_chunks);
        let bits_ref = &bits_for_chunk;

        crossbeam::thread::scope(|scope| {
            for worker in 0..num_workers {
                // worker w owns chunks {w, w + W, w + 2W, ...}
                let produce: Vec<_> = (worker..num_chunks)
                    .step_by(num_workers)
                    .map(|chunk| (chunk, index_txs[chunk].take().expect("unclaimed chunk")))
                    .collect();
                let consume: Vec<_> = (worker..num_chunks)
                    .step_by(num_workers)
                    .map(|chunk| {
                        (
                            index_rxs[chunk].take().expect("unclaimed chunk"),
                            acc_txs[chunk].take().expect("unclaimed chunk"),
                        )
                    })
                    .collect();

                scope.spawn(move |_| {
                    for (chunk, tx) in produce {
                        let bits = &bits_ref[chunk];
                        let mut indices: Vec<Vec<u32>> = Vec::with_capacity(buckets);
                        indices.resize_with(buckets, || {
                            Vec::with_capacity(num_points / buckets + 1)
                        });
                        for (i, scalar) in scalars.iter().enumerate() {
                            let mut digit = 0usize;
                            for &bit in bits {
                                digit = (digit << 1) | scalar.get_bit(bit) as usize;
                            }
                            if digit != 0 {
                                indices[digit - 1].push(i as u32);
                            }
                        }
                        tx.send(indices).expect("stage B receiver dropped");
                    }
                });

                scope.spawn(move |_| {
                    for (rx, tx) in consume {
                        let indices = rx.recv().expect("stage A sender dropped");
                        let mut acc = GroupProjective::<P>::zero();
                        let mut tmp = GroupExtended::<P>::zero();
                        for bucket in indices.iter().rev() {
                            for &i in bucket {
                                tmp.add_assign_mixed(&bases[i as usize]);
                            }
                            acc.add_assign(&tmp.to_jacobian());
                        }
                        tx.send(acc).expect("reducer dropped");
                    }
                });
            }

            // final reduction on the calling thread, most significant chunk
            // first; uses each chunk's actual width so a short last chunk is
            // handled correctly
            let mut res = GroupProjective::<P>::zero();
            for chunk in 0..num_chunks {
                for _ in 0..bits_ref[chunk].len() {
                    res.double_in_place();
                }
                res.add_assign(&acc_rxs[chunk].recv().expect("stage B sender dropped"));
            }
            res
        })
        .expect("MSM worker panicked")
    }

    /// Small-input path: splits the index range across workers, each running
    /// the Bootle special case of Pippenger, partial sums merged under a
    /// mutex.
    pub fn windowed_multi_exp<P: SWModelParameters>(
        points: &[GroupProjective<P>],
        scalars: &[ScalarRepr<P>],
    ) -> GroupProjective<P> {
        assert_eq!(points.len(), scalars.len());
        if points.is_empty() {
            return GroupProjective::zero();
        }
        let num_workers = std::cmp::min(rayon::current_num_threads(), points.len());
        let chunk_len = (points.len() + num_workers - 1) / num_workers;
        let res = Mutex::new(GroupProjective::<P>::zero());
        let res_ref = &res;

        crossbeam::thread::scope(|scope| {
            for (point_chunk, scalar_chunk) in
                points.chunks(chunk_len).zip(scalars.chunks(chunk_len))
            {
                scope.spawn(move |_| {
                    let partial = Self::multi_exp_bootle(point_chunk, scalar_chunk);
                    res_ref.lock().unwrap().add_assign(&partial);
                });
            }
        })
        .expect("MSM worker panicked");

        res.into_inner().unwrap()
    }

    /// The Bootle variant with window size s = b = 4: one 15-entry table,
    /// rebuilt per point, shared across that point's 64 digit positions.
    fn multi_exp_bootle<P: SWModelParameters>(
        points: &[GroupProjective<P>],
        scalars: &[ScalarRepr<P>],
    ) -> GroupProjective<P> {
        const S: usize = 4;
        const T_SIZE: usize = (1 << S) - 1;
        let selector_mask = (1u64 << S) - 1;
        let t = ScalarRepr::<P>::NUM_LIMBS * 64 / S;

        let mut window_sums = vec![GroupProjective::<P>::zero(); t];
        let mut table = [GroupProjective::<P>::zero(); T_SIZE];

        for (point, scalar) in points.iter().zip(scalars.iter()) {
            // table[k - 1] = k * point
            table[0] = *point;
            let mut j = 1;
            while j < T_SIZE {
                table[j] = table[j / 2];
                table[j].double_in_place();
                table[j + 1] = table[(j + 1) / 2];
                let addend = table[j / 2];
                table[j + 1].add_assign(&addend);
                j += 2;
            }

            for (k, sum) in window_sums.iter_mut().enumerate() {
                let ks = k * S;
                let selector = (scalar.as_ref()[ks / 64] >> (ks % 64)) & selector_mask;
                if selector != 0 {
                    sum.add_assign(&table[(selector - 1) as usize]);
                }
            }
        }

        let mut res = window_sums[t - 1];
        for sum in window_sums[..t - 1].iter().rev() {
            for _ in 0..S {
                res.double_in_place();
            }
            res.add_assign(sum);
        }
        res
    }
}
