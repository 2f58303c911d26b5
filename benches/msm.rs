#[macro_use]
extern crate criterion;

use algebra_core::curves::bls12_381::{G1Affine, G1Projective};
use algebra_core::fields::bls12_381::Fr;
use algebra_core::{FixedBaseMSM, PrimeField, UniformRand, VariableBaseMSM};
use criterion::{BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_rng() -> XorShiftRng {
    XorShiftRng::from_seed([
        0xd4, 0x7b, 0x02, 0xe9, 0x9c, 0x33, 0x61, 0x50, 0x1f, 0xaa, 0x28, 0x45, 0x66, 0x0e, 0x7a,
        0x13,
    ])
}

fn setup(n: usize) -> (Vec<G1Affine>, Vec<<Fr as PrimeField>::BigInt>) {
    let mut rng = bench_rng();
    let gen = G1Affine::prime_subgroup_generator();
    let base_scalars: Vec<_> = (0..n).map(|_| Fr::rand(&mut rng).into_repr()).collect();
    let bases = FixedBaseMSM::batch_scalar_mul(&gen, &base_scalars);
    let scalars = (0..n).map(|_| Fr::rand(&mut rng).into_repr()).collect();
    (bases, scalars)
}

fn variable_base_msm(c: &mut Criterion) {
    let mut group = c.benchmark_group("g1_multi_scalar_mul");
    group.sample_size(10);
    for log_n in [10usize, 12, 14, 16] {
        let n = 1 << log_n;
        let (bases, scalars) = setup(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| VariableBaseMSM::multi_scalar_mul(&bases, &scalars))
        });
    }
    group.finish();
}

fn fixed_base_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("g1_batch_scalar_mul");
    group.sample_size(10);
    let gen = G1Affine::prime_subgroup_generator();
    for log_n in [10usize, 14] {
        let n = 1 << log_n;
        let mut rng = bench_rng();
        let scalars: Vec<_> = (0..n).map(|_| Fr::rand(&mut rng).into_repr()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| FixedBaseMSM::batch_scalar_mul(&gen, &scalars))
        });
    }
    group.finish();
}

fn glv_scalar_mul(c: &mut Criterion) {
    let mut rng = bench_rng();
    let p = G1Projective::rand(&mut rng);
    let s = Fr::rand(&mut rng).into_repr();
    c.bench_function("g1_mul_glv", |b| b.iter(|| p.mul_glv(&s)));
    c.bench_function("g1_mul_windowed", |b| b.iter(|| p.mul_windowed(&s)));
}

criterion_group!(benches, variable_base_msm, fixed_base_batch, glv_scalar_mul);
criterion_main!(benches);
