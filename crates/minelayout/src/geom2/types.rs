//! Basic planar types and tolerances shared by the layout pipeline.
//!
//! - `GeomCfg`: centralizes epsilons for vertex dedup, zero-area checks and
//!   segment predicates.
//! - `Point2D`: the serializable coordinate type exchanged with callers.
//!
//! Code cross-refs: `frame::LayoutFrame`, `polygon::{polygon_from_points, exterior_points}`

use geo::Coord;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Geometry configuration (tolerances, meters / square meters).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Vertices closer than this are merged when a ring is built.
    pub eps_len: f64,
    /// Polygons with less area than this are treated as degenerate.
    pub eps_area: f64,
    /// Orientation tolerance for segment intersection tests.
    pub eps_orient: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_len: 1e-9,
            eps_area: 1e-6,
            eps_orient: 1e-12,
        }
    }
}

/// Planar coordinate in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.to_vec() - other.to_vec()).norm()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn to_vec(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn from_vec(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }

    #[inline]
    pub fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

impl From<Coord<f64>> for Point2D {
    #[inline]
    fn from(c: Coord<f64>) -> Self {
        Self { x: c.x, y: c.y }
    }
}

impl From<Point2D> for Coord<f64> {
    #[inline]
    fn from(p: Point2D) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

impl From<geo::Point<f64>> for Point2D {
    #[inline]
    fn from(p: geo::Point<f64>) -> Self {
        Self { x: p.x(), y: p.y() }
    }
}

/// Polyline length: sum of consecutive segment distances.
pub fn path_length(path: &[Point2D]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
