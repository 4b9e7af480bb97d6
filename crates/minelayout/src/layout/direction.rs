//! Layout rotation: which way the panels run.
//!
//! Priority: a manual roadway hint, then a known dip direction, then the
//! long axis of the mining area's minimum rotated rectangle. The returned
//! angle rotates world coordinates into the layout frame (advance along x,
//! face length along y).

use geo::Polygon;

use crate::geom2::longest_edge_angle;
use crate::rules::LayoutDirection;

use super::types::RoadwayHint;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Orientation {
    pub rotation_deg: f64,
    pub note: String,
}

pub(crate) fn choose_rotation(
    area: &Polygon<f64>,
    hints: &[RoadwayHint],
    dip_direction: Option<f64>,
    direction: LayoutDirection,
) -> Orientation {
    if let Some(bearing) = hints.first().and_then(RoadwayHint::bearing_deg) {
        return Orientation {
            rotation_deg: -bearing,
            note: format!("manual roadway bearing {bearing:.1}°"),
        };
    }
    if let Some(dip) = dip_direction {
        return match direction {
            LayoutDirection::Strike => {
                let strike = (dip + 90.0).rem_euclid(360.0);
                Orientation {
                    rotation_deg: -strike,
                    note: format!("strike longwall, strike {strike:.1}°"),
                }
            }
            LayoutDirection::Dip => Orientation {
                rotation_deg: -dip,
                note: format!("dip longwall, dip direction {dip:.1}°"),
            },
        };
    }
    let angle = longest_edge_angle(area).unwrap_or(0.0);
    Orientation {
        rotation_deg: -angle,
        note: format!("auto-detected advance direction {angle:.1}°"),
    }
}
