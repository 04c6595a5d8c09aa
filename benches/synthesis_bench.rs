//! Benchmarks for signature synthesis and RBI rendering.
//!
//! Compares sequential and rayon-backed synthesis of all four scopes, and
//! measures rendering the relation declaration file.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ormsig::emit::RbiEmitter;
use ormsig::{relation_declarations, synthesize_all, InterfaceEmitter, VersionPolicy};
use std::hint::black_box;

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize_all");
    for version in ["5.0.7", "6.1.0"] {
        let policy = VersionPolicy::resolve(version).unwrap();
        group.bench_with_input(BenchmarkId::new("sequential", version), &policy, |b, p| {
            b.iter(|| synthesize_all(black_box(p), false).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", version), &policy, |b, p| {
            b.iter(|| synthesize_all(black_box(p), true).unwrap())
        });
    }
    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let policy = VersionPolicy::resolve("6.1.0").unwrap();
    let file = relation_declarations(&policy, &[]).unwrap();
    let emitter = RbiEmitter::new();
    c.bench_function("render_relation_rbi", |b| {
        b.iter(|| emitter.emit(black_box(&file)).unwrap())
    });
}

criterion_group!(benches, bench_synthesis, bench_rendering);
criterion_main!(benches);
