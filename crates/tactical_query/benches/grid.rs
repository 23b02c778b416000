mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use tactical_query::grid::{neighbor_indices, SampleGrid};

const GRID_SIZES: [usize; 4] = [8, 16, 32, 64];

fn grid_positions_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/positions");
    for &size in &GRID_SIZES {
        group.throughput(common::elements_throughput(size * size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let grid = SampleGrid::new(black_box(Vec3::new(12.3, 0.0, -4.6)), size, 1.0);
                black_box(grid.positions());
            });
        });
    }
    group.finish();
}

fn grid_neighbor_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/neighbors");
    for &size in &GRID_SIZES {
        group.throughput(common::elements_throughput(size * size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut total = 0usize;
                for index in 0..size * size {
                    total += neighbor_indices(black_box(index), size, size).count();
                }
                black_box(total);
            });
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = grid_positions_benches, grid_neighbor_benches
}
criterion_main!(benches);
