//! Request-scoped design API.
//!
//! Purpose
//! - One `DesignContext` per request: the normalized boundary and boreholes,
//!   the effective rule set and the geology analyzer. Nothing is shared
//!   between requests.
//! - `run_design` is the one-call path used by the CLI.
//!
//! Coordinates
//! - Survey coordinates are large; boundaries whose minimum corner lies
//!   beyond 100 m are shifted to the origin (`CoordOffset`) and boreholes
//!   move with them. Results stay in the shifted frame; `CoordOffset::restore`
//!   maps points back.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::geology::{BoreholeSample, DipEstimate, GeologyAnalyzer, ScoreGrid};
use crate::geom2::Point2D;
use crate::layout::{generate_layout, DesignParams, DesignResult};
use crate::rules::MiningRuleSet;

// Curated re-exports for callers that only drive whole requests.
pub use crate::geology::{GeologySummary, PointScore};
pub use crate::layout::{validate_design, ValidationReport, WorkfaceCandidate};
pub use crate::roadway::{Roadway, RoadwayKind};

/// Full design request as posted by a client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    /// District boundary; when empty it is derived from the boreholes.
    #[serde(default)]
    pub boundary: Vec<Point2D>,
    #[serde(default)]
    pub boreholes: Vec<BoreholeSample>,
    #[serde(default)]
    pub params: DesignParams,
}

/// Translation applied to survey coordinates before layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordOffset {
    pub x: f64,
    pub y: f64,
}

impl CoordOffset {
    /// Boundaries whose minimum x or y exceeds this are shifted.
    pub const THRESHOLD: f64 = 100.0;

    /// Minimum corner of `boundary` if it lies beyond the threshold,
    /// otherwise no shift.
    pub fn for_boundary(boundary: &[Point2D]) -> Self {
        if boundary.is_empty() {
            return Self::default();
        }
        let min_x = boundary.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = boundary.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        if min_x > Self::THRESHOLD || min_y > Self::THRESHOLD {
            Self { x: min_x, y: min_y }
        } else {
            Self::default()
        }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline]
    pub fn apply(&self, p: Point2D) -> Point2D {
        Point2D::new(p.x - self.x, p.y - self.y)
    }

    #[inline]
    pub fn restore(&self, p: Point2D) -> Point2D {
        Point2D::new(p.x + self.x, p.y + self.y)
    }

    pub fn apply_borehole(&self, b: &BoreholeSample) -> BoreholeSample {
        BoreholeSample {
            x: b.x - self.x,
            y: b.y - self.y,
            ..b.clone()
        }
    }
}

/// Borehole extent enlarged on every side by 10 % of its x span, as an open
/// ring. `None` without boreholes.
pub fn boundary_from_boreholes(boreholes: &[BoreholeSample]) -> Option<Vec<Point2D>> {
    if boreholes.is_empty() {
        return None;
    }
    let min_x = boreholes.iter().map(|b| b.x).fold(f64::INFINITY, f64::min);
    let max_x = boreholes.iter().map(|b| b.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = boreholes.iter().map(|b| b.y).fold(f64::INFINITY, f64::min);
    let max_y = boreholes.iter().map(|b| b.y).fold(f64::NEG_INFINITY, f64::max);
    let m = (max_x - min_x) * 0.1;
    Some(vec![
        Point2D::new(min_x - m, min_y - m),
        Point2D::new(max_x + m, min_y - m),
        Point2D::new(max_x + m, max_y + m),
        Point2D::new(min_x - m, max_y + m),
    ])
}

/// Design result plus the normalized inputs it was computed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignOutcome {
    #[serde(flatten)]
    pub result: DesignResult,
    pub boundary: Vec<Point2D>,
    pub boreholes: Vec<BoreholeSample>,
    pub offset: CoordOffset,
}

/// Everything one design request needs, built once and read-only after.
#[derive(Clone, Debug)]
pub struct DesignContext {
    offset: CoordOffset,
    boundary: Vec<Point2D>,
    boreholes: Vec<BoreholeSample>,
    params: DesignParams,
    rules: MiningRuleSet,
    geology: Option<GeologyAnalyzer>,
}

impl DesignContext {
    /// Resolve the boundary, normalize coordinates, apply rule overrides and
    /// load the boreholes into an analyzer.
    pub fn new(request: DesignRequest) -> Result<Self, LayoutError> {
        let DesignRequest {
            boundary,
            boreholes,
            params,
        } = request;
        let boundary = if boundary.is_empty() {
            tracing::info!(boreholes = boreholes.len(), "no boundary given, using borehole extent");
            boundary_from_boreholes(&boreholes)
                .ok_or_else(|| LayoutError::Boundary("boundary data missing".to_string()))?
        } else {
            boundary
        };
        let rules = params.rule_set()?;

        let offset = CoordOffset::for_boundary(&boundary);
        if !offset.is_identity() {
            tracing::info!(dx = offset.x, dy = offset.y, "coordinates shifted to origin");
        }
        let boundary: Vec<Point2D> = boundary.into_iter().map(|p| offset.apply(p)).collect();
        let boreholes: Vec<BoreholeSample> =
            boreholes.iter().map(|b| offset.apply_borehole(b)).collect();
        let geology =
            (!boreholes.is_empty()).then(|| GeologyAnalyzer::from_samples(boreholes.iter().cloned()));

        Ok(Self {
            offset,
            boundary,
            boreholes,
            params,
            rules,
            geology,
        })
    }

    pub fn offset(&self) -> CoordOffset {
        self.offset
    }

    pub fn boundary(&self) -> &[Point2D] {
        &self.boundary
    }

    pub fn rules(&self) -> &MiningRuleSet {
        &self.rules
    }

    pub fn params(&self) -> &DesignParams {
        &self.params
    }

    pub fn geology(&self) -> Option<&GeologyAnalyzer> {
        self.geology.as_ref()
    }

    pub fn run(&self) -> Result<DesignOutcome, LayoutError> {
        let result = generate_layout(
            &self.boundary,
            &self.params,
            &self.rules,
            self.geology.as_ref(),
        )?;
        Ok(DesignOutcome {
            result,
            boundary: self.boundary.clone(),
            boreholes: self.boreholes.clone(),
            offset: self.offset,
        })
    }

    /// Dip of the request's target seam; flat and low-confidence without
    /// boreholes.
    pub fn dip(&self) -> DipEstimate {
        match &self.geology {
            Some(g) => g.calculate_dip_angle(self.params.target_seam.as_deref()),
            None => GeologyAnalyzer::new().calculate_dip_angle(None),
        }
    }

    pub fn score_grid(&self, resolution: usize) -> ScoreGrid {
        match &self.geology {
            Some(g) => {
                g.generate_score_grid(&self.boundary, self.params.target_seam.as_deref(), resolution)
            }
            None => ScoreGrid {
                resolution,
                ..ScoreGrid::default()
            },
        }
    }
}

/// Build a context for `request` and run the layout.
pub fn run_design(request: DesignRequest) -> Result<DesignOutcome, LayoutError> {
    DesignContext::new(request)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hole(id: &str, x: f64, y: f64) -> BoreholeSample {
        BoreholeSample::new(id, x, y)
    }

    #[test]
    fn offset_only_for_far_boundaries() {
        let near = vec![Point2D::new(0.0, 50.0), Point2D::new(10.0, 60.0)];
        assert!(CoordOffset::for_boundary(&near).is_identity());
        let far = vec![Point2D::new(4000.0, 50.0), Point2D::new(5000.0, 60.0)];
        let off = CoordOffset::for_boundary(&far);
        assert_eq!(off, CoordOffset { x: 4000.0, y: 50.0 });
        let p = Point2D::new(4500.0, 55.0);
        assert_eq!(off.restore(off.apply(p)), p);
    }

    #[test]
    fn borehole_extent_boundary() {
        let holes = vec![hole("A", 0.0, 0.0), hole("B", 1000.0, 500.0)];
        let b = boundary_from_boreholes(&holes).unwrap();
        assert_eq!(b[0], Point2D::new(-100.0, -100.0));
        assert_eq!(b[2], Point2D::new(1100.0, 600.0));
        assert!(boundary_from_boreholes(&[]).is_none());
    }

    #[test]
    fn missing_boundary_and_boreholes_is_an_error() {
        let err = run_design(DesignRequest::default()).unwrap_err();
        assert!(matches!(err, LayoutError::Boundary(_)));
    }

    #[test]
    fn survey_coordinates_are_normalized_before_layout() {
        let (x0, y0) = (39_500_000.0, 4_200_000.0);
        let boundary = vec![
            Point2D::new(x0, y0),
            Point2D::new(x0 + 1000.0, y0),
            Point2D::new(x0 + 1000.0, y0 + 1000.0),
            Point2D::new(x0, y0 + 1000.0),
        ];
        let request = DesignRequest {
            boundary,
            boreholes: vec![hole("ZK1", x0 + 500.0, y0 + 500.0)],
            params: DesignParams::default(),
        };
        let ctx = DesignContext::new(request).unwrap();
        assert_eq!(ctx.offset(), CoordOffset { x: x0, y: y0 });
        assert_eq!(ctx.boundary()[2], Point2D::new(1000.0, 1000.0));
        let out = ctx.run().unwrap();
        assert_eq!(out.boreholes[0].x, 500.0);
        assert!(!out.result.workfaces.is_empty());
        // one synthesized seam of 3 m under sandstone and mudstone
        let s = &out.result.workfaces[0];
        assert!(s.score > 0.0);
        let v = serde_json::to_value(&out).unwrap();
        assert!(v["workfaces"].is_array());
        assert_eq!(v["offset"]["x"], x0);
    }

    #[test]
    fn rejected_overrides_surface_as_rule_errors() {
        let request: DesignRequest = serde_json::from_str(
            r#"{
                "boundary": [{"x":0,"y":0},{"x":1000,"y":0},{"x":1000,"y":1000},{"x":0,"y":1000}],
                "params": {"miningRules": {"faceLength": {"min": 400}}}
            }"#,
        )
        .unwrap();
        assert!(matches!(run_design(request), Err(LayoutError::Rules(_))));
    }

    #[test]
    fn dip_without_boreholes_is_low_confidence() {
        let request = DesignRequest {
            boundary: vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(10.0, 0.0),
                Point2D::new(10.0, 10.0),
            ],
            ..Default::default()
        };
        let ctx = DesignContext::new(request).unwrap();
        assert!(!ctx.dip().is_reliable());
        assert!(ctx.score_grid(5).cells.is_empty());
    }
}
