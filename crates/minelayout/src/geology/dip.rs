//! Seam trend estimation: least-squares plane through seam elevations.
//!
//! Model: `z = a·x + b·y + c` with `z = -depth` of the seam top at each
//! collar. Dip is the plane's inclination, dip direction the azimuth of the
//! gradient `(a, b)` measured from +y (north) clockwise, strike a quarter turn
//! further.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Fit quality of a dip estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub a: f64,
    pub b: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DipEstimate {
    /// Degrees, 2 decimals.
    pub dip_angle: f64,
    /// Degrees in [0, 360), 1 decimal.
    pub dip_direction: f64,
    pub strike_direction: f64,
    pub confidence: Confidence,
    pub points_used: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seam_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
    /// Root-mean-square residual of the fit, meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DipEstimate {
    /// Flat, low-confidence estimate.
    pub(crate) fn degenerate(
        points_used: usize,
        seam_name: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            dip_angle: 0.0,
            dip_direction: 0.0,
            strike_direction: 0.0,
            confidence: Confidence::Low,
            points_used,
            seam_name,
            gradient: None,
            rms: None,
            message: Some(message.into()),
        }
    }

    pub fn is_reliable(&self) -> bool {
        self.confidence != Confidence::Low
    }
}

pub(crate) fn round_to(v: f64, places: i32) -> f64 {
    let m = 10f64.powi(places);
    (v * m).round() / m
}

fn azimuth(deg: f64) -> f64 {
    let a = round_to(deg.rem_euclid(360.0), 1);
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Fit a plane through `(x, y, z)` samples. Needs at least 3 points.
pub(crate) fn fit_plane(points: &[[f64; 3]], seam_name: Option<String>) -> DipEstimate {
    let n = points.len();
    if n < 3 {
        return DipEstimate::degenerate(
            n,
            seam_name,
            format!("{n} seam intersections; at least 3 are needed to fit a plane"),
        );
    }
    // centered collars keep the design matrix well conditioned
    let mx = points.iter().map(|p| p[0]).sum::<f64>() / n as f64;
    let my = points.iter().map(|p| p[1]).sum::<f64>() / n as f64;
    let design = DMatrix::from_fn(n, 3, |i, j| match j {
        0 => points[i][0] - mx,
        1 => points[i][1] - my,
        _ => 1.0,
    });
    let z = DVector::from_iterator(n, points.iter().map(|p| p[2]));

    let svd = design.clone().svd(true, true);
    let smax = svd.singular_values.max();
    let tol = smax.max(1.0) * 1e-9;
    if svd.rank(tol) < 3 {
        return DipEstimate::degenerate(
            n,
            seam_name,
            "borehole collars are collinear; dip is undetermined",
        );
    }
    let coeffs = match svd.solve(&z, tol) {
        Ok(c) => c,
        Err(e) => return DipEstimate::degenerate(n, seam_name, e),
    };
    let (a, b) = (coeffs[0], coeffs[1]);
    let residual = &design * &coeffs - &z;
    let rms = (residual.norm_squared() / n as f64).sqrt();

    let dip = a.hypot(b).atan().to_degrees();
    let dip_direction = a.atan2(b).to_degrees();
    let confidence = if rms < 5.0 {
        Confidence::High
    } else if rms < 15.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    };
    tracing::debug!(a, b, rms, points = n, "seam plane fitted");
    DipEstimate {
        dip_angle: round_to(dip, 2),
        dip_direction: azimuth(dip_direction),
        strike_direction: azimuth(dip_direction + 90.0),
        confidence,
        points_used: n,
        seam_name,
        gradient: Some(Gradient {
            a: round_to(a, 6),
            b: round_to(b, 6),
        }),
        rms: Some(round_to(rms, 3)),
        message: None,
    }
}
