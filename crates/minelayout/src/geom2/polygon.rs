//! Polygon operations on top of the `geo` kernel.
//!
//! - Build a ring from caller points (dedup, close, orient CCW).
//! - Repair self-intersecting rings by a self-union and keep the largest part.
//! - Erode inward (negative buffer) and clip against axis-aligned bands.
//!
//! Every function returns owned polygons; nothing here keeps state.

use geo::orient::{Direction, Orient};
use geo::{
    Area, BooleanOps, BoundingRect, Buffer, Coord, LineString, MinimumRotatedRect, MultiPolygon,
    Polygon, Rect,
};

use super::types::{GeomCfg, Point2D};
use super::util::{ring_is_simple, ring_signed_area};

/// Build a CCW polygon from caller points.
///
/// Returns `None` for non-finite coordinates or fewer than 3 distinct vertices.
/// A repeated closing vertex is accepted and dropped.
pub fn polygon_from_points(points: &[Point2D], cfg: GeomCfg) -> Option<Polygon<f64>> {
    if points.iter().any(|p| !p.is_finite()) {
        return None;
    }
    let mut ring: Vec<Coord<f64>> = Vec::with_capacity(points.len());
    for p in points {
        let c = p.to_coord();
        if let Some(last) = ring.last() {
            if (c.x - last.x).hypot(c.y - last.y) <= cfg.eps_len {
                continue;
            }
        }
        ring.push(c);
    }
    while ring.len() > 1 {
        let (first, last) = (ring[0], ring[ring.len() - 1]);
        if (first.x - last.x).hypot(first.y - last.y) <= cfg.eps_len {
            ring.pop();
        } else {
            break;
        }
    }
    if ring.len() < 3 {
        return None;
    }
    let poly = Polygon::new(LineString::from(ring), vec![]);
    Some(poly.orient(Direction::Default))
}

/// Open exterior ring of `poly` (closing vertex dropped).
pub fn exterior_points(poly: &Polygon<f64>) -> Vec<Point2D> {
    let coords = &poly.exterior().0;
    let n = if coords.len() > 1 && coords.first() == coords.last() {
        coords.len() - 1
    } else {
        coords.len()
    };
    coords[..n].iter().map(|c| Point2D::from(*c)).collect()
}

/// Signed shoelace area of an open point ring (CCW positive).
pub fn ring_area(points: &[Point2D]) -> f64 {
    let ring: Vec<Coord<f64>> = points.iter().map(|p| p.to_coord()).collect();
    ring_signed_area(&ring)
}

/// Exterior ring without self-touching or crossing edges.
pub fn is_simple(poly: &Polygon<f64>, cfg: GeomCfg) -> bool {
    let ring: Vec<Coord<f64>> = exterior_points(poly).iter().map(|p| p.to_coord()).collect();
    ring_is_simple(&ring, cfg)
}

/// Largest member of a multipolygon by unsigned area.
pub fn largest_part(mp: MultiPolygon<f64>) -> Option<Polygon<f64>> {
    mp.0.into_iter().max_by(|a, b| {
        a.unsigned_area()
            .partial_cmp(&b.unsigned_area())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Zero-width repair: self-union resolves crossings into valid parts.
pub fn repair(poly: &Polygon<f64>, cfg: GeomCfg) -> Option<Polygon<f64>> {
    let unioned = poly.union(poly);
    let part = largest_part(unioned)?;
    if part.unsigned_area() <= cfg.eps_area {
        return None;
    }
    Some(part.orient(Direction::Default))
}

/// Erode inward by `distance` meters and keep the largest surviving region.
///
/// `distance <= 0` returns the input unchanged.
pub fn erode(poly: &Polygon<f64>, distance: f64, cfg: GeomCfg) -> Option<Polygon<f64>> {
    if distance <= 0.0 {
        return Some(poly.clone());
    }
    let eroded = poly.buffer(-distance);
    let part = largest_part(eroded)?;
    if part.unsigned_area() <= cfg.eps_area {
        return None;
    }
    Some(part.orient(Direction::Default))
}

/// Intersect `poly` with the band `[x0,x1] × [y0,y1]`; returns non-empty parts in
/// the order the kernel reports them.
pub fn clip_to_band(
    poly: &Polygon<f64>,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    cfg: GeomCfg,
) -> Vec<Polygon<f64>> {
    let band = Rect::new(Coord { x: x0, y: y0 }, Coord { x: x1, y: y1 }).to_polygon();
    poly.intersection(&band)
        .0
        .into_iter()
        .filter(|p| p.unsigned_area() > cfg.eps_area)
        .collect()
}

/// Axis-aligned bounds.
pub fn bounds(poly: &Polygon<f64>) -> Option<Rect<f64>> {
    poly.bounding_rect()
}

/// Direction (degrees, `atan2` convention) of the longest edge of the
/// minimum-area bounding rectangle. Ties keep the first edge in ring order.
pub fn longest_edge_angle(poly: &Polygon<f64>) -> Option<f64> {
    let rect = poly.minimum_rotated_rect()?;
    let coords = &rect.exterior().0;
    let mut best: Option<(f64, f64)> = None;
    for w in coords.windows(2) {
        let d = w[1] - w[0];
        let len = d.x.hypot(d.y);
        if best.is_none_or(|(l, _)| len > l + 1e-9) {
            best = Some((len, d.y.atan2(d.x).to_degrees()));
        }
    }
    best.map(|(_, angle)| angle)
}
