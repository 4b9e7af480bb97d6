//! Criterion benchmarks for the layout pipeline.
//! Focus: boundary vertex counts n in {8, 32, 128}, and IDW scoring with
//! k in {10, 100} boreholes.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use minelayout::geology::{BoreholeSample, CoalSeamInfo, GeologyAnalyzer};
use minelayout::geom2::rand::{draw_boundary_radial, draw_collars, RadialCfg, ReplayToken, VertexCount};
use minelayout::geom2::Point2D;
use minelayout::layout::{generate_layout, DesignParams};
use minelayout::rules::MiningRuleSet;

fn boundary(n: usize, index: u64) -> Vec<Point2D> {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        base_radius: 1500.0,
        ..RadialCfg::default()
    };
    draw_boundary_radial(cfg, ReplayToken { seed: 7, index })
}

fn analyzer(k: usize) -> GeologyAnalyzer {
    let collars = draw_collars(
        k,
        Point2D::new(0.0, 0.0),
        Point2D::new(3000.0, 3000.0),
        ReplayToken { seed: 9, index: k as u64 },
    );
    let mut g = GeologyAnalyzer::new();
    for (i, c) in collars.into_iter().enumerate() {
        g.add_borehole(BoreholeSample::new(format!("ZK{i}"), c.x, c.y).with_seam(CoalSeamInfo {
            name: "3煤".to_string(),
            thickness: 2.0 + (i % 5) as f64 * 0.5,
            depth: 300.0 - 0.05 * c.y,
            roof_rock: "细砂岩".to_string(),
            floor_rock: "泥岩".to_string(),
            roof_thickness: 6.0,
            floor_thickness: 2.0,
        }));
    }
    g
}

fn bench_layout(c: &mut Criterion) {
    let params = DesignParams::default();
    let rules = MiningRuleSet::default();
    let mut group = c.benchmark_group("layout");
    for &n in &[8usize, 32, 128] {
        group.bench_with_input(BenchmarkId::new("generate_layout", n), &n, |b, &n| {
            b.iter_batched(
                || boundary(n, n as u64),
                |pts| {
                    let _res = generate_layout(&pts, &params, &rules, None);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_geology(c: &mut Criterion) {
    let mut group = c.benchmark_group("geology");
    for &k in &[10usize, 100] {
        let g = analyzer(k);
        group.bench_with_input(BenchmarkId::new("score_at_point", k), &g, |b, g| {
            b.iter(|| g.calculate_score_at_point(1500.0, 1500.0, None))
        });
        group.bench_with_input(BenchmarkId::new("dip", k), &g, |b, g| {
            b.iter(|| g.calculate_dip_angle(None))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_geology);
criterion_main!(benches);
