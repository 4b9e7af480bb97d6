//! Mining-regulation rule set: bounds, class breakpoints and validation predicates.
//!
//! Purpose
//! - Hold the regulation constants a design run is checked against (face
//!   length, advance length, pillar widths, dip and thickness classes, score
//!   weights) and answer pure questions about them.
//! - Reject inconsistent configurations at construction (`validate`), so no
//!   downstream stage scores against nonsense bounds.
//!
//! Serialization follows the JSON contract of the design API (camelCase,
//! nested `{min, max, preferred}` bounds).

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

mod overrides;

pub use overrides::{BoundOverride, RuleOverrides};

/// Inclusive `[min, max]` range with a preferred value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
    pub preferred: f64,
}

impl Bound {
    pub const fn new(min: f64, max: f64, preferred: f64) -> Self {
        Self {
            min,
            max,
            preferred,
        }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    fn check(&self, name: &'static str) -> Result<(), RuleError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.preferred.is_finite())
            || self.min <= 0.0
        {
            return Err(RuleError::NonPositive {
                name,
                min: self.min,
            });
        }
        if self.min > self.max {
            return Err(RuleError::InvertedBound {
                name,
                min: self.min,
                max: self.max,
            });
        }
        if !self.contains(self.preferred) {
            return Err(RuleError::PreferredOutOfRange {
                name,
                preferred: self.preferred,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Dip-angle class breakpoints (degrees, inclusive upper bounds).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DipClasses {
    pub gentle_max: f64,
    pub inclined_max: f64,
    pub steep_max: f64,
    /// Above this |dip| panels need a pseudo-inclined (oblique) face.
    pub pseudo_incline_threshold: f64,
}

impl Default for DipClasses {
    fn default() -> Self {
        Self {
            gentle_max: 8.0,
            inclined_max: 25.0,
            steep_max: 45.0,
            pseudo_incline_threshold: 15.0,
        }
    }
}

/// Coal-thickness class breakpoints (meters).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThicknessClasses {
    /// Below this a seam is not worth mining.
    pub min_minable: f64,
    pub thin_max: f64,
    pub medium_max: f64,
}

impl Default for ThicknessClasses {
    fn default() -> Self {
        Self {
            min_minable: 0.8,
            thin_max: 1.3,
            medium_max: 3.5,
        }
    }
}

/// Weights of the composite mineability indicators. Must sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub coal_thickness: f64,
    pub roof_stability: f64,
    pub gas_content: f64,
    pub water_inflow: f64,
    pub geological_structure: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.coal_thickness
            + self.roof_stability
            + self.gas_content
            + self.water_inflow
            + self.geological_structure
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            coal_thickness: 0.35,
            roof_stability: 0.25,
            gas_content: 0.20,
            water_inflow: 0.15,
            geological_structure: 0.05,
        }
    }
}

/// Score grade thresholds (lower bounds).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub excellent: f64,
    pub good: f64,
    pub acceptable: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            excellent: 85.0,
            good: 70.0,
            acceptable: 60.0,
        }
    }
}

/// Which seam direction the panels advance along.
///
/// The layout frame puts advance on x; `layout::direction` rotates the
/// chosen direction onto that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    /// Strike longwall: advance along strike, face spanning the dip.
    #[default]
    Strike,
    /// Dip longwall: advance along the dip direction, face spanning strike.
    Dip,
}

impl LayoutDirection {
    pub fn label(self) -> &'static str {
        match self {
            LayoutDirection::Strike => "strike",
            LayoutDirection::Dip => "dip",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MiningMethod {
    #[default]
    Retreat,
    Advance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DipClass {
    Gentle,
    Inclined,
    Steep,
    VerySteep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThicknessClass {
    Unminable,
    Thin,
    Medium,
    Thick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreGrade {
    Excellent,
    Good,
    Acceptable,
    Unsuitable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PillarKind {
    Section,
    Boundary,
}

/// Outcome of a bound check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub ok: bool,
    pub message: String,
}

impl Verdict {
    fn compliant() -> Self {
        Self {
            ok: true,
            message: "compliant".to_string(),
        }
    }

    fn violation(message: String) -> Self {
        Self { ok: false, message }
    }
}

/// One layout alternative of `suggest_face_count`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSuggestion {
    pub direction: LayoutDirection,
    pub face_count: usize,
    pub face_length: f64,
    pub advance_length: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceCountSuggestion {
    pub strike: LayoutSuggestion,
    pub dip: LayoutSuggestion,
    pub recommended: LayoutDirection,
}

/// Regulation constants for one design request. Read-only once validated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningRuleSet {
    /// Face length (along the face, perpendicular to advance), meters.
    pub face_length: Bound,
    /// Advance (retreat) length, meters.
    pub advance_length: Bound,
    /// Pillar between adjacent panels.
    pub section_pillar: Bound,
    /// Pillar along the mining-area boundary.
    pub boundary_pillar: Bound,
    pub dip_angle: DipClasses,
    pub coal_thickness: ThicknessClasses,
    pub score_weights: ScoreWeights,
    pub score_thresholds: ScoreThresholds,
    pub layout_direction: LayoutDirection,
    pub mining_method: MiningMethod,
}

impl Default for MiningRuleSet {
    fn default() -> Self {
        Self {
            face_length: Bound::new(150.0, 300.0, 200.0),
            advance_length: Bound::new(800.0, 2500.0, 1500.0),
            section_pillar: Bound::new(15.0, 30.0, 20.0),
            boundary_pillar: Bound::new(20.0, 50.0, 30.0),
            dip_angle: DipClasses::default(),
            coal_thickness: ThicknessClasses::default(),
            score_weights: ScoreWeights::default(),
            score_thresholds: ScoreThresholds::default(),
            layout_direction: LayoutDirection::Strike,
            mining_method: MiningMethod::Retreat,
        }
    }
}

impl MiningRuleSet {
    /// Defaults with `overrides` applied, then validated.
    pub fn with_overrides(overrides: &RuleOverrides) -> Result<Self, RuleError> {
        let mut rules = Self::default();
        overrides.apply(&mut rules);
        rules.validate()?;
        Ok(rules)
    }

    /// Fail fast on inconsistent configuration.
    pub fn validate(&self) -> Result<(), RuleError> {
        self.face_length.check("faceLength")?;
        self.advance_length.check("advanceLength")?;
        self.section_pillar.check("sectionPillar")?;
        self.boundary_pillar.check("boundaryPillar")?;

        let d = &self.dip_angle;
        if !(0.0 < d.gentle_max && d.gentle_max < d.inclined_max && d.inclined_max < d.steep_max)
            || !(d.pseudo_incline_threshold >= 0.0)
        {
            return Err(RuleError::Breakpoints { name: "dipAngle" });
        }
        let t = &self.coal_thickness;
        if !(0.0 < t.min_minable && t.min_minable < t.thin_max && t.thin_max < t.medium_max) {
            return Err(RuleError::Breakpoints {
                name: "coalThickness",
            });
        }
        let s = &self.score_thresholds;
        if !(s.acceptable < s.good && s.good < s.excellent) {
            return Err(RuleError::Breakpoints {
                name: "scoreThresholds",
            });
        }

        let w = &self.score_weights;
        let parts = [
            w.coal_thickness,
            w.roof_stability,
            w.gas_content,
            w.water_inflow,
            w.geological_structure,
        ];
        let sum = w.sum();
        if parts.iter().any(|v| !v.is_finite() || *v < 0.0) || (sum - 1.0).abs() > 1e-6 {
            return Err(RuleError::WeightSum { sum });
        }
        Ok(())
    }

    pub fn classify_dip_angle(&self, angle_deg: f64) -> DipClass {
        let a = angle_deg.abs();
        let d = &self.dip_angle;
        if a <= d.gentle_max {
            DipClass::Gentle
        } else if a <= d.inclined_max {
            DipClass::Inclined
        } else if a <= d.steep_max {
            DipClass::Steep
        } else {
            DipClass::VerySteep
        }
    }

    pub fn classify_coal_thickness(&self, thickness_m: f64) -> ThicknessClass {
        let t = &self.coal_thickness;
        if thickness_m < t.min_minable {
            ThicknessClass::Unminable
        } else if thickness_m <= t.thin_max {
            ThicknessClass::Thin
        } else if thickness_m <= t.medium_max {
            ThicknessClass::Medium
        } else {
            ThicknessClass::Thick
        }
    }

    pub fn classify_score(&self, score: f64) -> ScoreGrade {
        let s = &self.score_thresholds;
        if score >= s.excellent {
            ScoreGrade::Excellent
        } else if score >= s.good {
            ScoreGrade::Good
        } else if score >= s.acceptable {
            ScoreGrade::Acceptable
        } else {
            ScoreGrade::Unsuitable
        }
    }

    pub fn validate_face_length(&self, length: f64) -> Verdict {
        check_length("face length", length, &self.face_length)
    }

    pub fn validate_advance_length(&self, length: f64) -> Verdict {
        check_length("advance length", length, &self.advance_length)
    }

    pub fn needs_pseudo_incline(&self, dip_angle_deg: f64) -> bool {
        dip_angle_deg.abs() > self.dip_angle.pseudo_incline_threshold
    }

    /// Preferred pillar width.
    pub fn pillar_width(&self, kind: PillarKind) -> f64 {
        match kind {
            PillarKind::Section => self.section_pillar.preferred,
            PillarKind::Boundary => self.boundary_pillar.preferred,
        }
    }

    /// Panel count for strike and dip longwall layouts of a rectangular district.
    ///
    /// Each dimension loses two boundary pillars; panels of the preferred face
    /// length are separated by preferred section pillars. Counts are at least 1.
    pub fn suggest_face_count(
        &self,
        total_strike_length: f64,
        total_dip_length: f64,
    ) -> FaceCountSuggestion {
        let margin = 2.0 * self.boundary_pillar.preferred;
        let effective_strike = total_strike_length - margin;
        let effective_dip = total_dip_length - margin;
        let pitch = self.face_length.preferred + self.section_pillar.preferred;
        let count = |span: f64| -> usize {
            let n = (span / pitch).floor();
            if n.is_finite() && n >= 1.0 {
                n as usize
            } else {
                1
            }
        };
        let strike = LayoutSuggestion {
            direction: LayoutDirection::Strike,
            face_count: count(effective_dip),
            face_length: self.face_length.preferred,
            advance_length: effective_strike,
        };
        let dip = LayoutSuggestion {
            direction: LayoutDirection::Dip,
            face_count: count(effective_strike),
            face_length: self.face_length.preferred,
            advance_length: effective_dip,
        };
        let recommended = if strike.advance_length > dip.advance_length {
            LayoutDirection::Strike
        } else {
            LayoutDirection::Dip
        };
        FaceCountSuggestion {
            strike,
            dip,
            recommended,
        }
    }
}

fn check_length(what: &str, length: f64, bound: &Bound) -> Verdict {
    if length < bound.min {
        Verdict::violation(format!(
            "{what} {length:.1} m below minimum {} m",
            bound.min
        ))
    } else if length > bound.max {
        Verdict::violation(format!(
            "{what} {length:.1} m above maximum {} m",
            bound.max
        ))
    } else {
        Verdict::compliant()
    }
}

#[cfg(test)]
mod tests;
