//! Mineability scoring: IDW interpolation of borehole attributes at a point.

use serde::{Deserialize, Serialize};

use super::dip::round_to;
use super::lithology::{rock_score, RockRole};

/// Score of a location with no usable borehole data.
pub const NO_DATA_SCORE: f64 = 50.0;

/// Distances below this count as this (meters), so a collar on the point
/// does not take infinite weight.
const MIN_IDW_DISTANCE: f64 = 1.0;

const THICKNESS_WEIGHT: f64 = 0.40;
const ROOF_WEIGHT: f64 = 0.35;
const FLOOR_WEIGHT: f64 = 0.25;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointScore {
    pub total_score: f64,
    pub thickness_score: f64,
    pub roof_score: f64,
    pub floor_score: f64,
    pub interpolated_thickness: f64,
    pub data_points: usize,
    pub has_data: bool,
}

impl PointScore {
    pub(crate) fn no_data() -> Self {
        Self {
            total_score: NO_DATA_SCORE,
            thickness_score: 0.0,
            roof_score: 0.0,
            floor_score: 0.0,
            interpolated_thickness: 0.0,
            data_points: 0,
            has_data: false,
        }
    }
}

/// One interpolation input: collar position plus seam attributes.
pub(crate) struct ScoreSample<'a> {
    pub x: f64,
    pub y: f64,
    pub thickness: f64,
    pub roof_rock: &'a str,
    pub floor_rock: &'a str,
}

/// Step score for seam thickness; medium seams score best.
pub fn thickness_score(t: f64) -> f64 {
    if t < 0.8 {
        20.0
    } else if t < 1.3 {
        60.0
    } else if t < 3.5 {
        90.0
    } else if t < 6.0 {
        80.0
    } else {
        70.0
    }
}

pub(crate) fn idw_score(x: f64, y: f64, samples: &[ScoreSample<'_>]) -> PointScore {
    if samples.is_empty() {
        return PointScore::no_data();
    }
    let raw: Vec<f64> = samples
        .iter()
        .map(|s| {
            let d = (s.x - x).hypot(s.y - y).max(MIN_IDW_DISTANCE);
            1.0 / (d * d)
        })
        .collect();
    let total: f64 = raw.iter().sum();

    let (mut thick, mut roof, mut floor) = (0.0, 0.0, 0.0);
    for (s, w) in samples.iter().zip(&raw) {
        let w = w / total;
        thick += w * s.thickness;
        roof += w * rock_score(s.roof_rock, RockRole::Roof);
        floor += w * rock_score(s.floor_rock, RockRole::Floor);
    }
    let t_score = thickness_score(thick);
    let score = THICKNESS_WEIGHT * t_score + ROOF_WEIGHT * roof + FLOOR_WEIGHT * floor;
    PointScore {
        total_score: round_to(score, 1),
        thickness_score: t_score,
        roof_score: round_to(roof, 1),
        floor_score: round_to(floor, 1),
        interpolated_thickness: round_to(thick, 2),
        data_points: samples.len(),
        has_data: true,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub x: f64,
    pub y: f64,
    pub score: f64,
    pub thickness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStats {
    pub min_score: f64,
    pub max_score: f64,
    pub avg_score: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Score lattice over a boundary's bounding box, for heat maps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreGrid {
    pub cells: Vec<GridCell>,
    pub stats: Option<GridStats>,
    pub resolution: usize,
    pub bounds: Option<GridBounds>,
}

/// `n` evenly spaced values from `lo` to `hi` inclusive.
pub(crate) fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + step * i as f64).collect()
        }
    }
}

pub(crate) fn grid_stats(cells: &[GridCell]) -> Option<GridStats> {
    if cells.is_empty() {
        return None;
    }
    let min = cells.iter().map(|c| c.score).fold(f64::INFINITY, f64::min);
    let max = cells.iter().map(|c| c.score).fold(f64::NEG_INFINITY, f64::max);
    let avg = cells.iter().map(|c| c.score).sum::<f64>() / cells.len() as f64;
    Some(GridStats {
        min_score: round_to(min, 1),
        max_score: round_to(max, 1),
        avg_score: round_to(avg, 1),
    })
}
