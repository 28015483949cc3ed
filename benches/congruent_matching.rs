//! Congruent-set matching benchmarks
//!
//! Benchmarks for the two hot stages of the matching pipeline:
//! - Pair extraction (shell search + filtering)
//! - Congruent quadrilateral search (index build + query + verification)
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chatur_match::{
    Base, MatchConfig, MatchingEngine, OrientedPoint, PairParams, Point3D, PointCloud3D,
    QuadParams,
};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Uniform random cloud with random unit normals, seeded for stability.
fn benchmark_cloud(n: usize, extent: f32) -> PointCloud3D {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut cloud = PointCloud3D::with_capacity(n);
    for _ in 0..n {
        let position = Point3D::new(
            rng.random_range(0.0..extent),
            rng.random_range(0.0..extent),
            rng.random_range(0.0..extent),
        );
        let normal = loop {
            let v = Point3D::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            if let Some(unit) = v.normalized() {
                break unit;
            }
        };
        cloud.push(OrientedPoint::new(position, normal));
    }
    cloud
}

/// Unit square addressed by its diagonals: perpendicular edges of length
/// sqrt(2) crossing at their midpoints.
fn benchmark_base() -> (PointCloud3D, Base) {
    let n = Point3D::new(0.0, 0.0, 1.0);
    let mut cloud = PointCloud3D::with_capacity(4);
    cloud.push(OrientedPoint::new(Point3D::new(0.0, 0.0, 0.0), n));
    cloud.push(OrientedPoint::new(Point3D::new(1.0, 1.0, 0.0), n));
    cloud.push(OrientedPoint::new(Point3D::new(1.0, 0.0, 0.0), n));
    cloud.push(OrientedPoint::new(Point3D::new(0.0, 1.0, 0.0), n));
    (cloud, Base::new([0, 1, 2, 3]))
}

fn edge_params(base_cloud: &PointCloud3D, base: &Base, edge: (usize, usize)) -> PairParams {
    PairParams {
        pair_distance: base_cloud.position(edge.0).distance(&base_cloud.position(edge.1)),
        pair_normals_angle: base_cloud.normal_chord(edge.0, edge.1),
        pair_distance_epsilon: 0.05,
        base_index1: edge.0,
        base_index2: edge.1,
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_extract_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_pairs");
    let (base_cloud, base) = benchmark_base();

    for &n in &[500usize, 2000, 5000] {
        let target = benchmark_cloud(n, 5.0);
        let mut engine =
            MatchingEngine::new(&target, &base_cloud, MatchConfig::distance_only());
        engine.initialize();
        let params = edge_params(&base_cloud, &base, base.edge1());

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut pairs = Vec::new();
            b.iter(|| {
                engine
                    .extract_pairs(black_box(&params), &mut pairs)
                    .unwrap();
                black_box(pairs.len());
            });
        });
    }
    group.finish();
}

fn bench_find_congruent_quads(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_congruent_quads");
    let (base_cloud, base) = benchmark_base();

    for &n in &[500usize, 2000] {
        let target = benchmark_cloud(n, 5.0);
        let mut engine =
            MatchingEngine::new(&target, &base_cloud, MatchConfig::distance_only());
        engine.initialize();

        let mut first = Vec::new();
        let mut second = Vec::new();
        engine
            .extract_pairs(&edge_params(&base_cloud, &base, base.edge1()), &mut first)
            .unwrap();
        engine
            .extract_pairs(&edge_params(&base_cloud, &base, base.edge2()), &mut second)
            .unwrap();

        let params = QuadParams {
            base,
            invariant1: 0.5,
            invariant2: 0.5,
            distance_threshold_sq: 0.01,
        };

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut quads = Vec::new();
            b.iter(|| {
                let found = engine
                    .find_congruent_quads(black_box(&params), &first, &second, &mut quads)
                    .unwrap();
                black_box(found);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract_pairs, bench_find_congruent_quads);
criterion_main!(benches);
