use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::SmallRng, SeedableRng};
use symperm::{CompiledPermutation, CoxeterDecomposition, Permutation};

const DEGREES: [usize; 3] = [16, 256, 4096];

fn bench_apply(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut group = c.benchmark_group("apply");

    for n in DEGREES {
        let p = Permutation::random_with(n, &mut rng);
        let compiled = CompiledPermutation::from_permutation(&p);
        let data: Vec<u64> = (0..n as u64).collect();

        group.bench_with_input(BenchmarkId::new("compiled_in_place", n), &n, |b, _| {
            let mut v = data.clone();
            b.iter(|| {
                compiled.apply(black_box(&mut v)).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("canonical_slice", n), &n, |b, _| {
            b.iter(|| black_box(p.apply_slice(black_box(&data)).unwrap()));
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut group = c.benchmark_group("encode");

    for n in DEGREES {
        let p = Permutation::random_with(n, &mut rng);

        group.bench_with_input(BenchmarkId::new("copy", n), &n, |b, _| {
            b.iter(|| black_box(CompiledPermutation::encode_copy(black_box(p.data())).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("consuming", n), &n, |b, _| {
            b.iter_batched(
                || p.data().to_vec(),
                |data| black_box(CompiledPermutation::encode_consuming(data).unwrap()),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_coxeter(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(3);
    let p = Permutation::random_with(64, &mut rng);

    c.bench_function("coxeter_decompose_64", |b| {
        b.iter(|| black_box(CoxeterDecomposition::from_permutation(black_box(&p))));
    });
}

criterion_group!(apply_benches, bench_apply, bench_encode, bench_coxeter);
criterion_main!(apply_benches);
