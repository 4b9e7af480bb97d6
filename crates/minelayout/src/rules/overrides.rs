//! Partial rule overrides as they arrive in a design request (`miningRules`).

use serde::{Deserialize, Serialize};

use super::{
    Bound, DipClasses, LayoutDirection, MiningMethod, MiningRuleSet, ScoreThresholds,
    ScoreWeights, ThicknessClasses,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub preferred: Option<f64>,
}

impl BoundOverride {
    fn apply(&self, b: &mut Bound) {
        if let Some(v) = self.min {
            b.min = v;
        }
        if let Some(v) = self.max {
            b.max = v;
        }
        if let Some(v) = self.preferred {
            b.preferred = v;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DipOverride {
    pub gentle_max: Option<f64>,
    pub inclined_max: Option<f64>,
    pub steep_max: Option<f64>,
    pub pseudo_incline_threshold: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThicknessOverride {
    pub min_minable: Option<f64>,
    pub thin_max: Option<f64>,
    pub medium_max: Option<f64>,
}

/// Every field optional; absent fields keep the default rule set.
///
/// Weights and thresholds replace the whole group, since partial weights
/// would almost never sum to 1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleOverrides {
    pub face_length: Option<BoundOverride>,
    pub advance_length: Option<BoundOverride>,
    pub section_pillar: Option<BoundOverride>,
    pub boundary_pillar: Option<BoundOverride>,
    pub dip_angle: Option<DipOverride>,
    pub coal_thickness: Option<ThicknessOverride>,
    pub score_weights: Option<ScoreWeights>,
    pub score_thresholds: Option<ScoreThresholds>,
    pub layout_direction: Option<LayoutDirection>,
    pub mining_method: Option<MiningMethod>,
}

impl RuleOverrides {
    /// Preferred section pillar, if the caller set one.
    pub fn section_pillar_preferred(&self) -> Option<f64> {
        self.section_pillar.and_then(|b| b.preferred)
    }

    /// Preferred boundary pillar, if the caller set one.
    pub fn boundary_pillar_preferred(&self) -> Option<f64> {
        self.boundary_pillar.and_then(|b| b.preferred)
    }

    pub(super) fn apply(&self, rules: &mut MiningRuleSet) {
        let bounds = [
            (&self.face_length, &mut rules.face_length),
            (&self.advance_length, &mut rules.advance_length),
            (&self.section_pillar, &mut rules.section_pillar),
            (&self.boundary_pillar, &mut rules.boundary_pillar),
        ];
        for (o, b) in bounds {
            if let Some(o) = o {
                o.apply(b);
            }
        }
        if let Some(d) = &self.dip_angle {
            apply_dip(d, &mut rules.dip_angle);
        }
        if let Some(t) = &self.coal_thickness {
            apply_thickness(t, &mut rules.coal_thickness);
        }
        if let Some(w) = self.score_weights {
            rules.score_weights = w;
        }
        if let Some(s) = self.score_thresholds {
            rules.score_thresholds = s;
        }
        if let Some(d) = self.layout_direction {
            rules.layout_direction = d;
        }
        if let Some(m) = self.mining_method {
            rules.mining_method = m;
        }
    }
}

fn apply_dip(o: &DipOverride, d: &mut DipClasses) {
    d.gentle_max = o.gentle_max.unwrap_or(d.gentle_max);
    d.inclined_max = o.inclined_max.unwrap_or(d.inclined_max);
    d.steep_max = o.steep_max.unwrap_or(d.steep_max);
    d.pseudo_incline_threshold = o
        .pseudo_incline_threshold
        .unwrap_or(d.pseudo_incline_threshold);
}

fn apply_thickness(o: &ThicknessOverride, t: &mut ThicknessClasses) {
    t.min_minable = o.min_minable.unwrap_or(t.min_minable);
    t.thin_max = o.thin_max.unwrap_or(t.thin_max);
    t.medium_max = o.medium_max.unwrap_or(t.medium_max);
}
