//! Geological analyzer: seam trend (dip) and point mineability from boreholes.
//!
//! Purpose
//! - Collect borehole samples for one design request and answer two
//!   questions: which way does the target seam dip, and how mineable is the
//!   seam at a given location.
//!
//! Why
//! - The layout engine orients panels along strike when the trend is known,
//!   and scores each panel at its centroid.
//!
//! Failure policy
//! - Sparse or degenerate data never errors: dip estimates fall back to a
//!   flat, low-confidence result and point scores to a neutral no-data score.
//!
//! Code cross-refs: `dip::fit_plane`, `score::idw_score`, `seam::normalize_seam_name`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::geom2::Point2D;

mod borehole;
mod dip;
mod lithology;
mod score;
mod seam;

pub use borehole::{
    seams_from_layers, BoreholeSample, CoalSeamInfo, StratumLayer, MAIN_SEAM_NAME,
    SYNTHETIC_SEAM_DEPTH,
};
pub use dip::{Confidence, DipEstimate, Gradient};
pub use lithology::{rock_score, RockRole, UNKNOWN_ROCK_SCORE};
pub use score::{
    thickness_score, GridBounds, GridCell, GridStats, PointScore, ScoreGrid, NO_DATA_SCORE,
};
pub use seam::{is_coal_layer, normalize_seam_name};

use dip::round_to;
use score::ScoreSample;

/// Default lattice size of `generate_score_grid`.
pub const DEFAULT_GRID_RESOLUTION: usize = 20;

/// Per-seam statistics over all boreholes that intersect it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeamStats {
    pub borehole_count: usize,
    pub avg_thickness: f64,
    pub min_thickness: f64,
    pub max_thickness: f64,
    /// Population standard deviation.
    pub thickness_std: f64,
    pub avg_depth: f64,
    pub min_depth: f64,
    pub max_depth: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeologySummary {
    pub borehole_count: usize,
    /// Keyed by normalized seam name.
    pub coal_seams: BTreeMap<String, SeamStats>,
}

impl GeologySummary {
    pub fn seam_names(&self) -> Vec<&str> {
        self.coal_seams.keys().map(String::as_str).collect()
    }
}

/// Request-scoped borehole collection.
#[derive(Clone, Debug, Default)]
pub struct GeologyAnalyzer {
    boreholes: Vec<BoreholeSample>,
}

impl GeologyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer over uploaded samples. Samples without seams get them from
    /// their layer log, or a single synthesized main seam from the bare
    /// coal thickness.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = BoreholeSample>,
    {
        let mut analyzer = Self::new();
        for mut s in samples {
            s.resolve_seams();
            analyzer.add_borehole(s);
        }
        tracing::debug!(boreholes = analyzer.len(), "geology analyzer loaded");
        analyzer
    }

    pub fn add_borehole(&mut self, sample: BoreholeSample) {
        self.boreholes.push(sample);
    }

    pub fn boreholes(&self) -> &[BoreholeSample] {
        &self.boreholes
    }

    pub fn len(&self) -> usize {
        self.boreholes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boreholes.is_empty()
    }

    /// Sorted, de-duplicated normalized seam names.
    pub fn seam_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .boreholes
            .iter()
            .flat_map(|b| b.seams.iter().map(|s| normalize_seam_name(&s.name)))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Seam present in the most boreholes; ties go to the smallest name.
    fn most_frequent_seam(&self) -> Option<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for b in &self.boreholes {
            for s in &b.seams {
                *counts.entry(normalize_seam_name(&s.name)).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .max_by(|(na, ca), (nb, cb)| ca.cmp(cb).then_with(|| nb.cmp(na)))
            .map(|(name, _)| name)
    }

    /// First seam of `b` matching `target` (normalized), or its first seam
    /// when no target is given.
    fn seam_of<'a>(b: &'a BoreholeSample, target: Option<&str>) -> Option<&'a CoalSeamInfo> {
        match target {
            Some(t) => b.seams.iter().find(|s| normalize_seam_name(&s.name) == t),
            None => b.seams.first(),
        }
    }

    /// Estimate the seam's dip by fitting a plane to its elevations.
    ///
    /// Uses `target` (normalized before comparison) or else the most
    /// frequent seam; one intersection per borehole.
    pub fn calculate_dip_angle(&self, target: Option<&str>) -> DipEstimate {
        let seam = match target {
            Some(t) => Some(normalize_seam_name(t)),
            None => self.most_frequent_seam(),
        };
        let Some(seam) = seam else {
            return DipEstimate::degenerate(0, None, "no coal seams recorded in any borehole");
        };
        let points: Vec<[f64; 3]> = self
            .boreholes
            .iter()
            .filter_map(|b| Self::seam_of(b, Some(&seam)).map(|s| [b.x, b.y, -s.depth]))
            .collect();
        let est = dip::fit_plane(&points, Some(seam));
        tracing::info!(
            seam = est.seam_name.as_deref().unwrap_or(""),
            dip = est.dip_angle,
            direction = est.dip_direction,
            confidence = ?est.confidence,
            points = est.points_used,
            "seam dip estimated"
        );
        est
    }

    /// IDW-interpolated mineability at `(x, y)`.
    pub fn calculate_score_at_point(&self, x: f64, y: f64, target: Option<&str>) -> PointScore {
        let target = target.map(normalize_seam_name);
        let samples: Vec<ScoreSample<'_>> = self
            .boreholes
            .iter()
            .filter_map(|b| {
                Self::seam_of(b, target.as_deref()).map(|s| ScoreSample {
                    x: b.x,
                    y: b.y,
                    thickness: s.thickness,
                    roof_rock: &s.roof_rock,
                    floor_rock: &s.floor_rock,
                })
            })
            .collect();
        score::idw_score(x, y, &samples)
    }

    /// Score lattice of `resolution × resolution` points over the bounding
    /// box of `boundary`, x-major.
    pub fn generate_score_grid(
        &self,
        boundary: &[Point2D],
        target: Option<&str>,
        resolution: usize,
    ) -> ScoreGrid {
        if boundary.is_empty() || self.is_empty() {
            return ScoreGrid {
                resolution,
                ..ScoreGrid::default()
            };
        }
        let bounds = GridBounds {
            min_x: boundary.iter().map(|p| p.x).fold(f64::INFINITY, f64::min),
            max_x: boundary.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max),
            min_y: boundary.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
            max_y: boundary.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max),
        };
        let ys = score::linspace(bounds.min_y, bounds.max_y, resolution);
        let mut cells = Vec::with_capacity(resolution * resolution);
        for x in score::linspace(bounds.min_x, bounds.max_x, resolution) {
            for &y in &ys {
                let s = self.calculate_score_at_point(x, y, target);
                cells.push(GridCell {
                    x: round_to(x, 2),
                    y: round_to(y, 2),
                    score: s.total_score,
                    thickness: s.interpolated_thickness,
                });
            }
        }
        let stats = score::grid_stats(&cells);
        ScoreGrid {
            cells,
            stats,
            resolution,
            bounds: Some(bounds),
        }
    }

    pub fn summary(&self) -> GeologySummary {
        let mut groups: BTreeMap<String, Vec<&CoalSeamInfo>> = BTreeMap::new();
        for b in &self.boreholes {
            for s in &b.seams {
                groups.entry(normalize_seam_name(&s.name)).or_default().push(s);
            }
        }
        let coal_seams = groups
            .into_iter()
            .map(|(name, seams)| (name, seam_stats(&seams)))
            .collect();
        GeologySummary {
            borehole_count: self.len(),
            coal_seams,
        }
    }
}

fn seam_stats(seams: &[&CoalSeamInfo]) -> SeamStats {
    let n = seams.len() as f64;
    let thick: Vec<f64> = seams.iter().map(|s| s.thickness).collect();
    let depth: Vec<f64> = seams.iter().map(|s| s.depth).collect();
    let mean = |v: &[f64]| v.iter().sum::<f64>() / n;
    let min = |v: &[f64]| v.iter().copied().fold(f64::INFINITY, f64::min);
    let max = |v: &[f64]| v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg_t = mean(&thick);
    let var_t = thick.iter().map(|t| (t - avg_t).powi(2)).sum::<f64>() / n;
    SeamStats {
        borehole_count: seams.len(),
        avg_thickness: round_to(avg_t, 2),
        min_thickness: round_to(min(&thick), 2),
        max_thickness: round_to(max(&thick), 2),
        thickness_std: round_to(var_t.sqrt(), 2),
        avg_depth: round_to(mean(&depth), 1),
        min_depth: round_to(min(&depth), 1),
        max_depth: round_to(max(&depth), 1),
    }
}

#[cfg(test)]
mod tests;
