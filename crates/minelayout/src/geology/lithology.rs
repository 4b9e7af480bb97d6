//! Lithology lookup tables for roof stability and floor water stability.
//!
//! Scores are on a 0–100 scale, higher is better. Names are matched by
//! substring; among all table keys contained in the rock name the longest one
//! wins, so `粉砂岩` (siltstone) is not scored as `砂岩` (sandstone).

/// Score for blank or unrecognized rock names.
pub const UNKNOWN_ROCK_SCORE: f64 = 50.0;

/// Roof stability by rock hardness.
const ROOF_HARDNESS: &[(&str, f64)] = &[
    ("砾岩", 90.0),
    ("粗砾岩", 90.0),
    ("中砾岩", 85.0),
    ("砂岩", 80.0),
    ("细砂岩", 80.0),
    ("中砂岩", 75.0),
    ("粗砂岩", 70.0),
    ("粉砂岩", 60.0),
    ("泥岩", 40.0),
    ("页岩", 35.0),
    ("炭质泥岩", 25.0),
    ("碳质泥岩", 25.0),
    ("煤", 20.0),
    ("腐殖土", 10.0),
    ("土", 10.0),
    ("灰岩", 85.0),
    ("石灰岩", 85.0),
    ("conglomerate", 90.0),
    ("sandstone", 80.0),
    ("fine sandstone", 80.0),
    ("medium sandstone", 75.0),
    ("coarse sandstone", 70.0),
    ("siltstone", 60.0),
    ("mudstone", 40.0),
    ("shale", 35.0),
    ("carbonaceous mudstone", 25.0),
    ("coal", 20.0),
    ("soil", 10.0),
    ("limestone", 85.0),
];

/// Floor stability when wet; mudstones swell.
const FLOOR_WATER_STABILITY: &[(&str, f64)] = &[
    ("砾岩", 90.0),
    ("粗砾岩", 90.0),
    ("中砾岩", 85.0),
    ("砂岩", 85.0),
    ("细砂岩", 80.0),
    ("中砂岩", 80.0),
    ("粗砂岩", 75.0),
    ("粉砂岩", 60.0),
    ("泥岩", 30.0),
    ("炭质泥岩", 20.0),
    ("碳质泥岩", 20.0),
    ("页岩", 25.0),
    ("灰岩", 90.0),
    ("石灰岩", 90.0),
    ("conglomerate", 90.0),
    ("sandstone", 85.0),
    ("fine sandstone", 80.0),
    ("medium sandstone", 80.0),
    ("coarse sandstone", 75.0),
    ("siltstone", 60.0),
    ("mudstone", 30.0),
    ("carbonaceous mudstone", 20.0),
    ("shale", 25.0),
    ("limestone", 90.0),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RockRole {
    Roof,
    Floor,
}

pub fn rock_score(name: &str, role: RockRole) -> f64 {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return UNKNOWN_ROCK_SCORE;
    }
    let table = match role {
        RockRole::Roof => ROOF_HARDNESS,
        RockRole::Floor => FLOOR_WATER_STABILITY,
    };
    let mut best: Option<(usize, f64)> = None;
    for &(key, score) in table {
        if name.contains(key) {
            let len = key.chars().count();
            if best.is_none_or(|(l, _)| len > l) {
                best = Some((len, score));
            }
        }
    }
    best.map_or(UNKNOWN_ROCK_SCORE, |(_, s)| s)
}
