//! Face-length choice and the strip sweep over the rotated mining area.

use geo::{Area, Polygon};

use crate::geom2::{bounds, clip_to_band, GeomCfg};
use crate::rules::MiningRuleSet;

use super::MIN_FRAGMENT_AREA;

/// Strips shorter than this fraction of the minimum face length are skipped.
const SHORT_STRIP_FRACTION: f64 = 0.8;
/// Slack on the last strip's upper edge, meters.
const SWEEP_SLACK: f64 = 1.0;
/// Candidate face lengths are tried in steps of this many meters.
const FACE_LENGTH_STEP: usize = 10;

/// A strip ∩ mining-area piece in the layout frame.
#[derive(Clone, Debug)]
pub(crate) struct Fragment {
    pub poly: Polygon<f64>,
    /// y extent.
    pub length: f64,
    /// x extent.
    pub advance: f64,
}

impl Fragment {
    pub(crate) fn new(poly: Polygon<f64>) -> Option<Self> {
        let b = bounds(&poly)?;
        Some(Self {
            length: b.height(),
            advance: b.width(),
            poly,
        })
    }
}

/// Face length for an area whose face-direction extent is `available`.
///
/// Extents up to the maximum are used whole. Longer extents try every
/// candidate in `[min, max]` and keep the one leaving the least non-negative
/// remainder after packing panels and pillars; the first minimum wins and the
/// preferred length stands if nothing fits.
pub(crate) fn determine_face_length(available: f64, rules: &MiningRuleSet, pillar: f64) -> f64 {
    let bound = rules.face_length;
    if available <= bound.max {
        return available;
    }
    let lo = bound.min.floor() as i64;
    let hi = bound.max.floor() as i64;
    let mut best = bound.preferred;
    let mut best_waste = f64::INFINITY;
    for candidate in (lo..=hi).step_by(FACE_LENGTH_STEP) {
        let len = candidate as f64;
        let n = ((available + pillar) / (len + pillar)).floor();
        if n < 1.0 {
            continue;
        }
        let waste = available - (n * len + (n - 1.0) * pillar);
        if waste >= 0.0 && waste < best_waste {
            best_waste = waste;
            best = len;
        }
    }
    best
}

/// Sweep strips of `face_length` separated by `pillar` upward from the
/// area's lowest y and collect the surviving pieces in sweep order.
pub(crate) fn sweep(
    area: &Polygon<f64>,
    face_length: f64,
    pillar: f64,
    rules: &MiningRuleSet,
    cfg: GeomCfg,
) -> Vec<Fragment> {
    let Some(b) = bounds(area) else {
        return Vec::new();
    };
    if !(face_length > 0.0) {
        return Vec::new();
    }
    let pillar = pillar.max(0.0);
    let (min_x, max_x, max_y) = (b.min().x, b.max().x, b.max().y);
    let shortest = SHORT_STRIP_FRACTION * rules.face_length.min;

    let mut out = Vec::new();
    let mut y = b.min().y;
    while y + face_length <= max_y + SWEEP_SLACK {
        let top = (y + face_length).min(max_y);
        let actual = top - y;
        if actual < shortest {
            tracing::debug!(y, length = actual, "strip too short, skipped");
        } else {
            for part in clip_to_band(area, min_x, max_x, y, top, cfg) {
                let a = part.unsigned_area();
                if a < MIN_FRAGMENT_AREA {
                    tracing::debug!(y, area = a, "fragment below minimum area dropped");
                    continue;
                }
                out.extend(Fragment::new(part));
            }
        }
        let next = top + pillar;
        if next <= y {
            break;
        }
        y = next;
    }
    out
}
