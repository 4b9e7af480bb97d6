//! Layout frame: a rotation about a fixed origin.
//!
//! The layout engine rotates the mining area into a working frame where
//! strips are axis-aligned (advance along x, face length along y) and the
//! roadway synthesizer reuses the same frame. Angles are degrees,
//! counter-clockwise positive.

use geo::{MapCoords, Polygon};
use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use super::types::Point2D;

/// Rotate `p` by `angle_deg` (CCW) about `origin`.
#[inline]
pub fn rotate_about(p: Point2D, angle_deg: f64, origin: Point2D) -> Point2D {
    let rot = Rotation2::new(angle_deg.to_radians());
    let o: Vector2<f64> = origin.to_vec();
    Point2D::from_vec(rot * (p.to_vec() - o) + o)
}

/// World ↔ layout mapping used by the layout engine and roadway synthesizer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFrame {
    /// Rotation applied to world coordinates to reach the layout frame.
    pub rotation_deg: f64,
    /// Rotation center (mining-area centroid).
    pub origin: Point2D,
}

impl LayoutFrame {
    pub fn new(rotation_deg: f64, origin: Point2D) -> Self {
        Self {
            rotation_deg,
            origin,
        }
    }

    #[inline]
    pub fn to_layout(&self, p: Point2D) -> Point2D {
        rotate_about(p, self.rotation_deg, self.origin)
    }

    #[inline]
    pub fn to_world(&self, p: Point2D) -> Point2D {
        rotate_about(p, -self.rotation_deg, self.origin)
    }

    pub fn polygon_to_layout(&self, poly: &Polygon<f64>) -> Polygon<f64> {
        poly.map_coords(|c| self.to_layout(Point2D::from(c)).to_coord())
    }

    pub fn polygon_to_world(&self, poly: &Polygon<f64>) -> Polygon<f64> {
        poly.map_coords(|c| self.to_world(Point2D::from(c)).to_coord())
    }
}
