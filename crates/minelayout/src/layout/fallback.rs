//! Fallback layout when the strip sweep yields nothing.
//!
//! The rotated area is cut into `max(1, floor(height / 200))` equal bands and
//! the largest piece of each band becomes an (always invalid) panel, so a
//! non-empty mining area still produces candidates to look at.

use geo::{Area, Polygon};

use crate::geom2::{bounds, clip_to_band, largest_part, GeomCfg};

use super::strips::Fragment;

/// Nominal band height, meters.
pub(crate) const FALLBACK_BAND: f64 = 200.0;
/// Pieces smaller than this are dropped, square meters.
pub(crate) const FALLBACK_MIN_AREA: f64 = 100.0;
pub(crate) const FALLBACK_SCORE: f64 = 70.0;
pub(crate) const FALLBACK_MESSAGE: &str =
    "generated by the fallback layout; may not satisfy the mining rules";

pub(crate) fn band_fragments(area: &Polygon<f64>, cfg: GeomCfg) -> Vec<Fragment> {
    let Some(b) = bounds(area) else {
        return Vec::new();
    };
    let height = b.height();
    if !(height > 0.0) {
        return Vec::new();
    }
    let bands = ((height / FALLBACK_BAND).floor() as usize).max(1);
    let band_h = height / bands as f64;
    tracing::warn!(bands, band_height = band_h, "no workface survived the sweep, using fallback layout");

    (0..bands)
        .filter_map(|i| {
            let y0 = b.min().y + i as f64 * band_h;
            let y1 = b.min().y + (i + 1) as f64 * band_h;
            let pieces = clip_to_band(area, b.min().x, b.max().x, y0, y1, cfg);
            let piece = largest_part(geo::MultiPolygon(pieces))?;
            if piece.unsigned_area() < FALLBACK_MIN_AREA {
                return None;
            }
            Fragment::new(piece)
        })
        .collect()
}
