//! Pairing benchmarks
//!
//! Measures identifier extraction and catalog construction over a
//! synthetic clean directory.

use criterion::{criterion_group, criterion_main, Criterion};
use pairset::{pair_key, Catalog, CollisionPolicy};
use std::hint::black_box;

fn bench_pair_key(c: &mut Criterion) {
    c.bench_function("pair_key", |b| {
        b.iter(|| pair_key(black_box("scene_0042_noisy.png")))
    });
}

fn bench_catalog_build(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("temp dir");
    for i in 0..500 {
        std::fs::write(dir.path().join(format!("scene_{i:04}_gt.png")), b"x")
            .expect("seed file");
    }

    c.bench_function("catalog_build_500", |b| {
        b.iter(|| {
            Catalog::build(black_box(dir.path()), CollisionPolicy::Overwrite, true)
                .expect("catalog builds")
        })
    });
}

criterion_group!(benches, bench_pair_key, bench_catalog_build);
criterion_main!(benches);
