//! Square district walkthrough.
//!
//! Purpose
//! - Show the full request path on a 1000 m square with three boreholes on
//!   a seam dipping east, and print the panels, roadways and summary stats.
//! - Handy smoke check when tuning rule defaults: the printed face lengths
//!   and validity flags change immediately.
//!
//! Run: `cargo run -p minelayout --example square_layout`
//!
//! Code cross-refs: `api::run_design`, `layout::generate_layout`.

use std::time::Instant;

use minelayout::prelude::*;

fn hole(id: &str, x: f64, y: f64, depth: f64) -> BoreholeSample {
    BoreholeSample::new(id, x, y).with_seam(CoalSeamInfo {
        name: "3煤".to_string(),
        thickness: 3.2,
        depth,
        roof_rock: "细砂岩".to_string(),
        floor_rock: "泥岩".to_string(),
        roof_thickness: 8.0,
        floor_thickness: 2.5,
    })
}

fn main() {
    let request = DesignRequest {
        boundary: vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1000.0, 0.0),
            Point2D::new(1000.0, 1000.0),
            Point2D::new(0.0, 1000.0),
        ],
        boreholes: vec![
            hole("ZK1", 100.0, 100.0, 300.0),
            hole("ZK2", 900.0, 150.0, 380.0),
            hole("ZK3", 500.0, 900.0, 340.0),
        ],
        params: DesignParams::default(),
    };

    let start = Instant::now();
    let ctx = DesignContext::new(request).expect("valid request");
    let dip = ctx.dip();
    let outcome = ctx.run().expect("layout");
    let elapsed = start.elapsed().as_secs_f64() * 1e3;

    println!(
        "dip {:.2}° toward {:.1}° ({:?}), elapsed {elapsed:.2} ms",
        dip.dip_angle, dip.dip_direction, dip.confidence
    );
    for w in &outcome.result.workfaces {
        println!(
            "{:>6}  face {:>6.1} m  advance {:>7.1} m  score {:>5.1}  {}",
            w.id,
            w.length,
            w.advance_length,
            w.score,
            if w.is_valid { "ok" } else { w.validation_message.as_str() }
        );
    }
    println!("{} roadways", outcome.result.roadways.len());
    println!(
        "{}",
        serde_json::to_string_pretty(&outcome.result.stats).expect("stats serialize")
    );
}
