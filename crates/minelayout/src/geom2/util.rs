use geo::Coord;

use super::types::GeomCfg;

#[inline]
fn cross(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
fn orientation(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>, eps: f64) -> i8 {
    let v = cross(a, b, c);
    if v > eps {
        1
    } else if v < -eps {
        -1
    } else {
        0
    }
}

/// `c` lies within the axis-aligned box of segment `a`–`b` (used for collinear cases).
#[inline]
fn within_box(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

/// Closed-segment intersection test (touching counts).
pub(crate) fn segments_intersect(
    p1: Coord<f64>,
    p2: Coord<f64>,
    q1: Coord<f64>,
    q2: Coord<f64>,
    eps: f64,
) -> bool {
    let o1 = orientation(p1, p2, q1, eps);
    let o2 = orientation(p1, p2, q2, eps);
    let o3 = orientation(q1, q2, p1, eps);
    let o4 = orientation(q1, q2, p2, eps);
    if o1 != o2 && o3 != o4 && o1 != 0 && o2 != 0 && o3 != 0 && o4 != 0 {
        return true;
    }
    (o1 == 0 && within_box(p1, p2, q1))
        || (o2 == 0 && within_box(p1, p2, q2))
        || (o3 == 0 && within_box(q1, q2, p1))
        || (o4 == 0 && within_box(q1, q2, p2))
}

/// Shoelace signed area of an open or closed ring (CCW positive).
pub(crate) fn ring_signed_area(ring: &[Coord<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for k in 0..ring.len() {
        let p = ring[k];
        let q = ring[(k + 1) % ring.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}

/// True when no two non-adjacent edges of the open ring touch or cross.
///
/// O(n²) over edges; boundaries are hand-drawn and stay small.
pub(crate) fn ring_is_simple(ring: &[Coord<f64>], cfg: GeomCfg) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let (a1, a2) = (ring[i], ring[(i + 1) % n]);
        for j in (i + 1)..n {
            // neighbours share a vertex by construction
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (b1, b2) = (ring[j], ring[(j + 1) % n]);
            if segments_intersect(a1, a2, b1, b2, cfg.eps_orient) {
                return false;
            }
        }
    }
    true
}
