//! Request parameters and result records of the layout engine.

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::geom2::{LayoutFrame, Point2D};
use crate::roadway::Roadway;
use crate::rules::{
    DipClass, LayoutDirection, MiningMethod, MiningRuleSet, RuleOverrides, ScoreGrade,
};

fn default_face_width() -> f64 {
    200.0
}
fn default_pillar_width() -> f64 {
    20.0
}
fn default_boundary_margin() -> f64 {
    30.0
}

/// A user-drawn roadway; only the first hint's end-to-end bearing is used.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadwayHint {
    #[serde(default)]
    pub path: Vec<Point2D>,
}

impl RoadwayHint {
    /// Bearing (atan2, degrees) from the first to the last point.
    pub fn bearing_deg(&self) -> Option<f64> {
        let (first, last) = (self.path.first()?, self.path.last()?);
        if self.path.len() < 2 || !(first.is_finite() && last.is_finite()) {
            return None;
        }
        Some((last.y - first.y).atan2(last.x - first.x).to_degrees())
    }
}

/// Design parameters as submitted by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignParams {
    /// Advance-length hint (meters). Reported, not enforced.
    #[serde(default = "default_face_width")]
    pub face_width: f64,
    /// Section pillar between panels (meters).
    #[serde(default = "default_pillar_width")]
    pub pillar_width: f64,
    /// Boundary pillar eroded from the boundary (meters).
    #[serde(default = "default_boundary_margin")]
    pub boundary_margin: f64,
    #[serde(default)]
    pub manual_roadways: Vec<RoadwayHint>,
    #[serde(default)]
    pub mining_rules: Option<RuleOverrides>,
    #[serde(default)]
    pub dip_angle: Option<f64>,
    #[serde(default)]
    pub dip_direction: Option<f64>,
    #[serde(default)]
    pub target_seam: Option<String>,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            face_width: default_face_width(),
            pillar_width: default_pillar_width(),
            boundary_margin: default_boundary_margin(),
            manual_roadways: Vec::new(),
            mining_rules: None,
            dip_angle: None,
            dip_direction: None,
            target_seam: None,
        }
    }
}

impl DesignParams {
    /// Default rules with this request's overrides, validated.
    pub fn rule_set(&self) -> Result<MiningRuleSet, RuleError> {
        match &self.mining_rules {
            Some(o) => MiningRuleSet::with_overrides(o),
            None => {
                let rules = MiningRuleSet::default();
                rules.validate()?;
                Ok(rules)
            }
        }
    }

    /// Section pillar in effect: an explicit `sectionPillar.preferred`
    /// override wins over `pillarWidth`.
    pub fn effective_pillar_width(&self) -> f64 {
        self.mining_rules
            .as_ref()
            .and_then(RuleOverrides::section_pillar_preferred)
            .unwrap_or(self.pillar_width)
    }

    /// Boundary pillar in effect: an explicit `boundaryPillar.preferred`
    /// override wins over `boundaryMargin`.
    pub fn effective_boundary_margin(&self) -> f64 {
        self.mining_rules
            .as_ref()
            .and_then(RuleOverrides::boundary_pillar_preferred)
            .unwrap_or(self.boundary_margin)
    }
}

/// One extraction panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkfaceCandidate {
    /// `WF-01`, `WF-02`, ...
    pub id: String,
    /// Open ring in world coordinates.
    pub points: Vec<Point2D>,
    pub center_x: f64,
    pub center_y: f64,
    /// Face length (layout-frame y extent), meters.
    pub length: f64,
    /// Advance length (layout-frame x extent), meters.
    pub advance_length: f64,
    /// Square meters.
    pub area: f64,
    pub score: f64,
    pub grade: ScoreGrade,
    pub is_valid: bool,
    pub validation_message: String,
}

impl WorkfaceCandidate {
    pub fn center(&self) -> Point2D {
        Point2D::new(self.center_x, self.center_y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignStats {
    /// Area of the (repaired) boundary.
    pub boundary_area: f64,
    /// Area left after eroding the boundary pillar.
    pub mining_area: f64,
    /// Sum of workface areas.
    pub total_area: f64,
    pub count: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub layout_direction: LayoutDirection,
    /// How the rotation was chosen, for display.
    pub orientation: String,
    pub avg_face_length: f64,
    pub avg_advance_length: f64,
    pub avg_score: f64,
    pub mining_method: String,
    /// Seam dip class when a dip angle is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dip_class: Option<DipClass>,
    pub needs_pseudo_incline: bool,
    pub fallback: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    pub workfaces: Vec<WorkfaceCandidate>,
    pub roadways: Vec<Roadway>,
    pub stats: DesignStats,
    /// Effective rule set the design was checked against.
    pub rules: MiningRuleSet,
    pub frame: LayoutFrame,
}

/// Per-workface outcome of `validate_design`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkfaceCheck {
    pub id: String,
    pub is_valid: bool,
    pub messages: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub workfaces: Vec<WorkfaceCheck>,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub mining_method: MiningMethod,
}
