//! Random mining boundaries and borehole collars (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic sampler for star-shaped, simple boundary rings used by the
//!   randomized layout tests and the criterion benches.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, sort by angle (so the ring stays simple), then shift the
//!   ring so its minimum corner sits at `(margin, margin)` like a normalized
//!   upload.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Point2D;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Base radius in meters.
    pub base_radius: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
    /// Offset of the ring's minimum corner from the origin.
    pub margin: f64,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.2,
            base_radius: 900.0,
            random_phase: true,
            margin: 10.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random star-shaped boundary ring (open, CCW).
pub fn draw_boundary_radial(cfg: RadialCfg, tok: ReplayToken) -> Vec<Point2D> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng).max(3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.base_radius.max(1e-6);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI
    } else {
        0.0
    };
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let base = phase + (k as f64) * delta;
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            base + jitter
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pts: Vec<Point2D> = angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u) * r0;
            Point2D::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    let min_x = pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    pts.into_iter()
        .map(|p| Point2D::new(p.x - min_x + cfg.margin, p.y - min_y + cfg.margin))
        .collect()
}

/// Uniform collar positions inside the axis-aligned box `[lo, hi]`.
pub fn draw_collars(count: usize, lo: Point2D, hi: Point2D, tok: ReplayToken) -> Vec<Point2D> {
    let mut rng = tok.to_std_rng();
    (0..count)
        .map(|_| {
            Point2D::new(
                lo.x + rng.gen::<f64>() * (hi.x - lo.x),
                lo.y + rng.gen::<f64>() * (hi.y - lo.y),
            )
        })
        .collect()
}
