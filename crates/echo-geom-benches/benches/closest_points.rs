// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::cast_precision_loss)]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use echo_geom::{Line, Vec3};
use std::{hint::black_box, time::Duration};

fn v(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z).expect("finite fixture")
}

// Deterministic spread of line pairs; every `parallel_every`-th pair shares a
// direction so the fallback branch is exercised too.
fn line_pairs(n: usize, parallel_every: usize) -> Vec<(Line, Line)> {
    (0..n)
        .map(|i| {
            let f = i as f64;
            let a = Line::new(v(f, 0.5 * f, -f), v(f + 1.0, 0.5 * f + 2.0, 1.0 - f));
            let b = if parallel_every > 0 && i % parallel_every == 0 {
                a.translate(0.0, 3.0, 0.0).expect("translate fixture")
            } else {
                Line::new(v(-f, 1.0, f), v(2.0 - f, -1.0, f + 0.25))
            };
            (a, b)
        })
        .collect()
}

fn bench_closest_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_closest_points");
    group.sample_size(50);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));
    group.noise_threshold(0.02);
    for &(label, parallel_every) in &[("skew", 0usize), ("mixed", 4), ("parallel", 1)] {
        for &n in &[16usize, 256, 4_096] {
            let pairs = line_pairs(n, parallel_every);
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(BenchmarkId::new(label, n), &pairs, |b, pairs| {
                b.iter(|| {
                    let mut total = 0.0;
                    for (a, other) in pairs {
                        total += a.shortest_distance_to(other).expect("non-degenerate");
                    }
                    black_box(total)
                })
            });
        }
    }
    group.finish();
}

fn bench_distance_to_point(c: &mut Criterion) {
    let line = Line::new(v(0.0, 0.0, 0.0), v(1.0, 2.0, 3.0));
    let points: Vec<Vec3> = (0..1_024)
        .map(|i| {
            let f = i as f64;
            v(f.sin() * 10.0, f.cos() * 10.0, f * 0.01)
        })
        .collect();
    c.bench_function("line_distance_to_point_1024", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for p in &points {
                total += line.distance_to_point(black_box(p)).expect("non-degenerate");
            }
            black_box(total)
        })
    });
}

criterion_group!(benches, bench_closest_points, bench_distance_to_point);
criterion_main!(benches);
