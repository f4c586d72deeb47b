//! Benchmarks for BDS edge-state reconstruction.
//!
//! Run with: `cargo bench --bench edge_state_bench`
//! (add `--features parallel` for the rayon path)
//!
//! Benchmarks corner interpolation, the slope fit with and without limiting,
//! and the full driver.

use bds_rs::bds::{compute_slopes, interpolate_corners};
use bds_rs::{
    BdsConfig, Centering, Field2D, Geometry2D, REQUIRED_STATE_GHOST_CELLS,
    compute_edge_state_with_config,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

struct Problem {
    geom: Geometry2D,
    s: Field2D,
    u: Field2D,
    v: Field2D,
    force: Field2D,
}

/// Gaussian blob plus a step in a rotating flow (limiter active near both).
fn setup_problem(n: usize) -> Problem {
    let geom = Geometry2D::uniform(n, n, 1.0 / n as f64, 1.0 / n as f64);
    let d = geom.domain();
    let c = n as f64 / 2.0;
    let s = Field2D::from_fn(
        d.grow(REQUIRED_STATE_GHOST_CELLS as isize),
        Centering::Cell,
        |i, j| {
            let (x, y) = (i as f64 - c, j as f64 - c);
            let blob = (-(x * x + y * y) / (0.05 * c * c)).exp();
            let step = if i < n as isize / 4 { 0.5 } else { 0.0 };
            blob + step
        },
    );
    let u = Field2D::from_fn(d.convert(Centering::XFace).grow(1), Centering::XFace, |_, j| {
        -(j as f64 - c) / c
    });
    let v = Field2D::from_fn(d.convert(Centering::YFace).grow(1), Centering::YFace, |i, _| {
        (i as f64 - c) / c
    });
    let force = Field2D::on_domain(&d, Centering::Cell, 1, 1);
    Problem {
        geom,
        s,
        u,
        v,
        force,
    }
}

/// Benchmark corner interpolation.
fn bench_corners(c: &mut Criterion) {
    let mut group = c.benchmark_group("corner_interpolation");
    let config = BdsConfig::default();

    for n in [32, 64, 128] {
        let p = setup_problem(n);
        let nodes = p.geom.domain().convert(Centering::Node).grow(1);

        group.bench_with_input(BenchmarkId::new("nodes", n * n), &n, |b, _| {
            b.iter(|| interpolate_corners(black_box(&p.s), 0, black_box(&nodes), &config));
        });
    }

    group.finish();
}

/// Benchmark the slope fit, limited and unlimited.
fn bench_slopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("slope_fit");

    for n in [32, 64, 128] {
        let p = setup_problem(n);
        let d = p.geom.domain();
        let sint = interpolate_corners(
            &p.s,
            0,
            &d.convert(Centering::Node).grow(1),
            &BdsConfig::default(),
        );

        for config in [BdsConfig::default(), BdsConfig::default().without_limiting()] {
            group.bench_with_input(
                BenchmarkId::new(config.limiter_name(), n * n),
                &n,
                |b, _| {
                    b.iter(|| {
                        compute_slopes(
                            black_box(&p.s),
                            0,
                            black_box(&sint),
                            &p.geom,
                            &d.grow(1),
                            &config,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the full driver.
fn bench_edge_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_edge_state");
    let config = BdsConfig::default();

    for n in [32, 64, 128] {
        let p = setup_problem(n);
        let d = p.geom.domain();
        let dt = 0.5 / n as f64;

        group.bench_with_input(BenchmarkId::new("cells", n * n), &n, |b, _| {
            let mut xedge = Field2D::on_domain(&d, Centering::XFace, 0, 1);
            let mut yedge = Field2D::on_domain(&d, Centering::YFace, 0, 1);
            b.iter(|| {
                compute_edge_state_with_config(
                    black_box(&p.s),
                    0,
                    &p.geom,
                    &mut xedge,
                    &mut yedge,
                    0,
                    black_box(&p.u),
                    black_box(&p.v),
                    &p.force,
                    0,
                    true,
                    dt,
                    &config,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_corners, bench_slopes, bench_edge_state);
criterion_main!(benches);
