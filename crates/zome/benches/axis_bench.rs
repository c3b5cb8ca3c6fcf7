//! Criterion benchmarks for axis lookup: chiral-orbit lookup against brute
//! force, exact and nearest.
//!   CARGO_TARGET_DIR=data/bench cargo bench -p zome --bench axis_bench

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use zome::prelude::*;

/// Exact axis normals drawn from every orbit, scaled so lookups cannot
/// short-circuit on identity.
fn axis_samples(sym: &Symmetry, n: usize, seed: u64) -> Vec<AlgebraicVector> {
    let mut rng = StdRng::seed_from_u64(seed);
    let ids: Vec<OrbitId> = sym.orbit_set().iter().collect();
    let two = sym.field().create_integer(2);
    (0..n)
        .map(|_| {
            let orbit = ids[rng.gen_range(0..ids.len())];
            let sense = if rng.gen::<bool>() { Sense::Plus } else { Sense::Minus };
            let k = rng.gen_range(0..sym.chiral_order());
            sym.axis(orbit, sense, k).unwrap().normal().scale(&two)
        })
        .collect()
}

fn bench_axes(c: &mut Criterion) {
    let sym = Symmetry::icosahedral(&Field::new(GoldenField)).unwrap();
    let samples = axis_samples(&sym, 64, 5);
    let mut group = c.benchmark_group("axis");
    group.bench_with_input(BenchmarkId::new("get_axis", "chiral"), &samples, |b, vs| {
        b.iter(|| vs.iter().filter_map(|v| sym.get_axis(v, None).unwrap()).count())
    });
    group.bench_with_input(BenchmarkId::new("get_axis", "brute_force"), &samples, |b, vs| {
        b.iter(|| {
            vs.iter()
                .filter_map(|v| sym.get_axis_brute_force(v, None).unwrap())
                .count()
        })
    });

    let mut rng = StdRng::seed_from_u64(6);
    group.bench_function(BenchmarkId::new("nearest_axis", "chiral"), |b| {
        b.iter_batched(
            || Vector3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            |v| sym.nearest_axis(&v, None).unwrap(),
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("nearest_axis", "brute_force"), |b| {
        b.iter_batched(
            || Vector3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            |v| sym.nearest_axis_brute_force(&v, None).unwrap(),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_axes);
criterion_main!(benches);
