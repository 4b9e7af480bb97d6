//! Seam naming: coal-layer detection and cross-borehole name normalization.

use std::sync::LazyLock;

use regex::Regex;

/// Numeric seam designation with an optional position suffix (upper/middle/lower).
static SEAM_DESIGNATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+[-_]?\d*)\s*(上|中|下)?\s*煤?").expect("seam designation pattern compiles")
});

/// Normalize a seam name so the same seam matches across boreholes.
///
/// Spaces are removed and `_` becomes `-`; a numeric designation such as
/// `15-4`, `3上` or `16_3 煤` collapses to `"{num}{pos}煤"`. Names without a
/// numeric designation pass through trimmed.
pub fn normalize_seam_name(name: &str) -> String {
    let compact: String = name
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '_' { '-' } else { c })
        .collect();
    match SEAM_DESIGNATION.captures(&compact) {
        Some(caps) => {
            let base = caps.get(1).map_or("", |m| m.as_str());
            let pos = caps.get(2).map_or("", |m| m.as_str());
            format!("{base}{pos}煤")
        }
        None => compact,
    }
}

/// Whether a stratum name denotes a coal layer. Carbonaceous mudstone
/// (炭质/碳质) carries coal in its name but is rock.
pub fn is_coal_layer(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    if lower.contains("炭质") || lower.contains("碳质") || lower.contains("carbonaceous") {
        return false;
    }
    lower.contains('煤') || lower.contains("coal")
}
