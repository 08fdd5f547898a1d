//! Benchmarks for structured mesh generation.
//!
//! Run with: `cargo bench --bench generation_bench`
//!
//! Add `--features parallel` to map coordinates on the rayon pool.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use structmesh::generation::{GridIndexer, Structured2D, Structured3D};

/// Benchmark 2D generation across resolutions.
fn bench_generate_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_2d");

    for n in [16, 64, 256] {
        group.bench_with_input(BenchmarkId::new("quads", n), &n, |b, &n| {
            b.iter(|| Structured2D::new(black_box(n), black_box(n)).generate())
        });
        group.bench_with_input(BenchmarkId::new("triangles", n), &n, |b, &n| {
            b.iter(|| {
                Structured2D::new(black_box(n), black_box(n))
                    .triangles()
                    .periodic_x()
                    .generate()
            })
        });
    }

    group.finish();
}

/// Benchmark 3D generation across resolutions.
fn bench_generate_3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_3d");
    group.sample_size(20);

    for n in [4, 16, 32] {
        group.bench_with_input(BenchmarkId::new("hexes", n), &n, |b, &n| {
            b.iter(|| Structured3D::new(black_box(n)).generate())
        });
        group.bench_with_input(BenchmarkId::new("tets", n), &n, |b, &n| {
            b.iter(|| Structured3D::new(black_box(n)).tetrahedra().generate())
        });
        group.bench_with_input(BenchmarkId::new("tets_mapped", n), &n, |b, &n| {
            b.iter(|| {
                Structured3D::new(black_box(n))
                    .tetrahedra()
                    .with_mapping(|[x, y, z]| [x + 0.1 * (6.0 * y).sin(), y, z * (1.0 + x)])
                    .generate()
            })
        });
    }

    group.finish();
}

/// Benchmark the planning phase alone (no sink).
fn bench_plan_3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_3d");

    let n = 32;
    group.bench_function("tets", |b| {
        b.iter(|| Structured3D::new(black_box(n)).tetrahedra().plan())
    });
    group.bench_function("index_roundtrip", |b| {
        let grid = GridIndexer::volume(n, n, n);
        b.iter(|| {
            (0..grid.point_count())
                .map(|id| grid.index(grid.logical(black_box(id))))
                .sum::<usize>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generate_2d, bench_generate_3d, bench_plan_3d);
criterion_main!(benches);
