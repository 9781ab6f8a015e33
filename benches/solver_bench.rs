//! Criterion benchmarks for u-tsp.
//!
//! Uses uniform random instances to measure each pipeline end to end and
//! the refinement stage on its own.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tsp::constructive::nearest_neighbor_tour;
use u_tsp::distance::DistanceMatrix;
use u_tsp::local_search::{refine, RefineConfig};
use u_tsp::models::Point;
use u_tsp::{solve_with_config, SolverConfig, Strategy};

fn uniform(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for &n in &[100usize, 300] {
        let points = uniform(n, 42);
        for strategy in Strategy::CONCRETE {
            let config = SolverConfig::default().with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), n),
                &(points.clone(), config),
                |b, (p, cfg)| {
                    b.iter(|| {
                        let result = solve_with_config(black_box(p), black_box(cfg));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_from_nn");
    group.sample_size(10);

    for &n in &[200usize, 500] {
        let points: Vec<Point> = uniform(n, 7).into_iter().map(Point::from).collect();
        let dm = DistanceMatrix::from_points(&points);
        let start = nearest_neighbor_tour(&dm, 0);
        for (label, config) in [
            ("two_opt", RefineConfig::default().with_three_opt(false)),
            ("two_three_opt", RefineConfig::default()),
        ] {
            group.bench_with_input(BenchmarkId::new(label, n), &config, |b, cfg| {
                b.iter(|| {
                    let mut tour = start.clone();
                    let report = refine(&mut tour, black_box(&dm), black_box(cfg));
                    black_box((tour, report))
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_strategies, bench_refine);
criterion_main!(benches);
