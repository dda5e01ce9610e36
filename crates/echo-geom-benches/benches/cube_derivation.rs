// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::cast_precision_loss)]
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use echo_geom::{Cube, Vec3};
use std::{hint::black_box, time::Duration};

fn cubes(n: usize) -> Vec<Cube> {
    (0..n)
        .map(|i| {
            let f = i as f64;
            let center = Vec3::new(f, -f, 0.5 * f).expect("finite fixture");
            Cube::from_center_and_side(center, 1.0 + f * 0.125).expect("valid fixture")
        })
        .collect()
}

fn bench_cube_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_from_vertices");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));
    for &n in &[1usize, 64, 1_024] {
        let vertex_sets: Vec<[Vec3; 8]> = cubes(n).iter().map(Cube::vertices).collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &vertex_sets, |b, sets| {
            b.iter(|| {
                for set in sets {
                    black_box(Cube::from_vertices(set).expect("cube vertices"));
                }
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("cube_topology");
    group.sample_size(50);
    for &n in &[64usize, 1_024] {
        let fixtures = cubes(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("edges", n), &fixtures, |b, fixtures| {
            b.iter(|| {
                for cube in fixtures {
                    black_box(cube.edges());
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("rotate_y", n), &n, |b, &n| {
            // Fixture setup is not timed.
            b.iter_batched(
                || cubes(n),
                |fixtures| {
                    for cube in &fixtures {
                        black_box(cube.rotate_y(0.7).expect("finite angle"));
                    }
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("bounds", n), &fixtures, |b, fixtures| {
            b.iter(|| {
                for cube in fixtures {
                    black_box(cube.axis_aligned_bounds());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cube_derivation);
criterion_main!(benches);
