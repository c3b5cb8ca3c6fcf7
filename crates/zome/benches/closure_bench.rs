//! Criterion benchmarks for building symmetries: orientation numbering,
//! group closure and orbit registration.
//!   CARGO_TARGET_DIR=data/bench cargo bench -p zome --bench closure_bench

use criterion::{criterion_group, criterion_main, Criterion};
use zome::prelude::*;

fn bench_build(c: &mut Criterion) {
    let golden = Field::new(GoldenField);
    let mut group = c.benchmark_group("closure");
    group.sample_size(20);
    for kind in SymmetryKind::ALL {
        group.bench_function(kind.name(), |b| {
            b.iter(|| Symmetry::build(kind.definition(), &golden).unwrap())
        });
    }
    let sym = Symmetry::icosahedral(&golden).unwrap();
    group.bench_function("subgroup_closure", |b| {
        let seeds = [7usize, 23];
        b.iter(|| sym.closure(&seeds).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
