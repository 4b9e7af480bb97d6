//! Layout engine: boundary → rotated mining area → strips → workfaces.
//!
//! Purpose
//! - Turn a district boundary into rule-checked extraction panels, score
//!   them, connect them with roadways and summarize the result.
//!
//! Pipeline
//! 1. Build (and if needed repair) the boundary polygon.
//! 2. Erode the boundary pillar; keep the largest region.
//! 3. Choose the layout rotation (`direction::choose_rotation`).
//! 4. Rotate about the mining-area centroid; advance runs along x, face
//!    length along y.
//! 5. Pick the face length and sweep strips (`strips`).
//! 6. Rotate pieces back, validate, score; fall back to bands if nothing
//!    survived (`fallback`).
//! 7. Roadways (`roadway::generate_roadways`) and stats.
//!
//! Only malformed boundaries and too-small mining areas are errors.

use geo::{Area, Centroid, Polygon};

use crate::error::LayoutError;
use crate::geology::{DipEstimate, GeologyAnalyzer};
use crate::geom2::{
    erode, exterior_points, is_simple, polygon_from_points, repair, GeomCfg, LayoutFrame, Point2D,
};
use crate::roadway::generate_roadways;
use crate::rules::{MiningMethod, MiningRuleSet};

mod direction;
mod fallback;
mod strips;
mod types;

pub use types::{
    DesignParams, DesignResult, DesignStats, RoadwayHint, ValidationReport, WorkfaceCandidate,
    WorkfaceCheck,
};

use strips::Fragment;

/// Smallest mining area (after the boundary pillar) worth laying out, m².
pub const MIN_MINING_AREA: f64 = 1000.0;
/// Strip pieces below this are dropped, m².
pub const MIN_FRAGMENT_AREA: f64 = 500.0;
/// Panels shorter than this fraction of the minimum face length are edge
/// remnants rather than near-misses.
const EDGE_PANEL_FRACTION: f64 = 0.6;

/// Lay out workfaces and roadways inside `boundary`.
///
/// `rules` must already carry the request's overrides; `geology`, when it
/// holds boreholes, scores panels and may supply the dip direction.
pub fn generate_layout(
    boundary: &[Point2D],
    params: &DesignParams,
    rules: &MiningRuleSet,
    geology: Option<&GeologyAnalyzer>,
) -> Result<DesignResult, LayoutError> {
    let cfg = GeomCfg::default();
    rules.validate()?;

    let margin = params.effective_boundary_margin();
    let pillar = params.effective_pillar_width().max(0.0);
    let (boundary_poly, boundary_area) = build_boundary(boundary, margin, cfg)?;
    tracing::info!(area = boundary_area, "boundary area");

    let eroded = erode(&boundary_poly, margin, cfg);
    let mining_area_size = eroded.as_ref().map_or(0.0, |p| p.unsigned_area());
    let mining = match eroded {
        Some(p) if mining_area_size >= MIN_MINING_AREA => p,
        _ => {
            return Err(LayoutError::InsufficientArea {
                area: mining_area_size,
                margin,
                min: MIN_MINING_AREA,
            })
        }
    };
    tracing::info!(area = mining_area_size, margin, "mining area after boundary pillar");

    let geology = geology.filter(|g| !g.is_empty());
    let estimate: Option<DipEstimate> = geology
        .map(|g| g.calculate_dip_angle(params.target_seam.as_deref()))
        .filter(DipEstimate::is_reliable);
    let dip_direction = params
        .dip_direction
        .filter(|d| d.is_finite() && *d != 0.0)
        .or(estimate.as_ref().map(|e| e.dip_direction));
    let dip_angle = params
        .dip_angle
        .filter(|d| d.is_finite())
        .or(estimate.as_ref().map(|e| e.dip_angle));

    let orientation = direction::choose_rotation(
        &mining,
        &params.manual_roadways,
        dip_direction,
        rules.layout_direction,
    );
    let origin = mining
        .centroid()
        .map(Point2D::from)
        .ok_or_else(|| LayoutError::Boundary("mining area has no centroid".to_string()))?;
    let frame = LayoutFrame::new(orientation.rotation_deg, origin);
    tracing::info!(rotation = frame.rotation_deg, "{}", orientation.note);

    let rotated = frame.polygon_to_layout(&mining);
    let Some(extent) = crate::geom2::bounds(&rotated) else {
        return Err(LayoutError::Boundary("rotated mining area is empty".to_string()));
    };
    let face_length = strips::determine_face_length(extent.height(), rules, pillar);
    tracing::info!(
        advance_extent = extent.width(),
        face_extent = extent.height(),
        face_length,
        advance_hint = params.face_width,
        pillar,
        "panel parameters"
    );

    let fragments = strips::sweep(&rotated, face_length, pillar, rules, cfg);
    let scorer = PanelScorer {
        geology,
        target: params.target_seam.as_deref(),
    };
    let mut workfaces: Vec<WorkfaceCandidate> = fragments
        .iter()
        .enumerate()
        .filter_map(|(k, f)| regular_workface(k + 1, f, &frame, rules, &scorer))
        .collect();

    let fallback = workfaces.is_empty();
    if fallback {
        workfaces = fallback::band_fragments(&rotated, cfg)
            .iter()
            .enumerate()
            .filter_map(|(k, f)| fallback_workface(k + 1, f, &frame, rules))
            .collect();
    }

    let roadways = generate_roadways(&workfaces, &frame, &rotated);
    let stats = summarize(
        &workfaces,
        rules,
        StatsInput {
            boundary_area,
            mining_area: mining_area_size,
            orientation: orientation.note,
            dip_angle,
            fallback,
        },
    );
    tracing::info!(
        count = stats.count,
        valid = stats.valid_count,
        roadways = roadways.len(),
        fallback,
        "layout generated"
    );

    Ok(DesignResult {
        workfaces,
        roadways,
        stats,
        rules: rules.clone(),
        frame,
    })
}

/// Re-check existing workfaces against `rules`.
pub fn validate_design(workfaces: &[WorkfaceCandidate], rules: &MiningRuleSet) -> ValidationReport {
    let checks: Vec<WorkfaceCheck> = workfaces
        .iter()
        .map(|wf| {
            let face = rules.validate_face_length(wf.length);
            let advance = rules.validate_advance_length(wf.advance_length);
            let is_valid = face.ok && advance.ok;
            let messages = [face, advance]
                .into_iter()
                .filter(|v| !v.ok)
                .map(|v| v.message)
                .collect();
            WorkfaceCheck {
                id: wf.id.clone(),
                is_valid,
                messages,
            }
        })
        .collect();
    let valid_count = checks.iter().filter(|c| c.is_valid).count();
    ValidationReport {
        invalid_count: checks.len() - valid_count,
        valid_count,
        workfaces: checks,
        mining_method: rules.mining_method,
    }
}

/// Build the boundary polygon, repairing self-intersections.
///
/// The area check runs on the repaired ring: lobes of a crossing ring can
/// cancel in the shoelace sum.
fn build_boundary(
    boundary: &[Point2D],
    margin: f64,
    cfg: GeomCfg,
) -> Result<(Polygon<f64>, f64), LayoutError> {
    let poly = polygon_from_points(boundary, cfg).ok_or_else(|| {
        LayoutError::Boundary(format!(
            "expected at least 3 distinct finite vertices, got {} points",
            boundary.len()
        ))
    })?;
    let poly = if is_simple(&poly, cfg) {
        poly
    } else {
        tracing::warn!("boundary self-intersects, repairing");
        match repair(&poly, cfg) {
            Some(fixed) => fixed,
            // a crossing ring with no interior, e.g. a folded-back line
            None if poly.unsigned_area() <= cfg.eps_area => {
                return Err(LayoutError::InsufficientArea {
                    area: 0.0,
                    margin,
                    min: MIN_MINING_AREA,
                })
            }
            None => {
                return Err(LayoutError::Boundary(
                    "self-intersecting boundary could not be repaired".to_string(),
                ))
            }
        }
    };
    let area = poly.unsigned_area();
    if area <= cfg.eps_area {
        return Err(LayoutError::InsufficientArea {
            area: 0.0,
            margin,
            min: MIN_MINING_AREA,
        });
    }
    Ok((poly, area))
}

struct PanelScorer<'a> {
    geology: Option<&'a GeologyAnalyzer>,
    target: Option<&'a str>,
}

impl PanelScorer<'_> {
    /// Geology score at the centroid, or a synthetic score that falls
    /// slightly with the panel number.
    fn score(&self, number: usize, center: Point2D) -> f64 {
        match self.geology {
            Some(g) => g.calculate_score_at_point(center.x, center.y, self.target).total_score,
            None => {
                let s = 75.0 + 10.0 * (1.0 - number as f64 / 10.0);
                (s * 10.0).round() / 10.0
            }
        }
    }
}

struct Placed {
    points: Vec<Point2D>,
    center: Point2D,
    area: f64,
}

/// Rotate a layout-frame piece back to world coordinates.
fn place(f: &Fragment, frame: &LayoutFrame) -> Option<Placed> {
    let world = frame.polygon_to_world(&f.poly);
    let center = Point2D::from(world.centroid()?);
    Some(Placed {
        points: exterior_points(&world),
        center,
        area: f.poly.unsigned_area(),
    })
}

fn regular_workface(
    number: usize,
    f: &Fragment,
    frame: &LayoutFrame,
    rules: &MiningRuleSet,
    scorer: &PanelScorer<'_>,
) -> Option<WorkfaceCandidate> {
    let placed = place(f, frame)?;
    let face = rules.validate_face_length(f.length);
    let advance = rules.validate_advance_length(f.advance);
    let is_valid = face.ok && advance.ok;

    let validation_message = if is_valid {
        face.message
    } else {
        let mut messages = Vec::with_capacity(2);
        if !face.ok {
            if f.length >= EDGE_PANEL_FRACTION * rules.face_length.min {
                messages.push(format!("edge panel: {}", face.message));
            } else {
                messages.push(face.message);
            }
        }
        if !advance.ok {
            messages.push(advance.message);
        }
        messages.join("; ")
    };

    let score = scorer.score(number, placed.center);
    Some(WorkfaceCandidate {
        id: format!("WF-{number:02}"),
        points: placed.points,
        center_x: placed.center.x,
        center_y: placed.center.y,
        length: f.length,
        advance_length: f.advance,
        area: placed.area,
        score,
        grade: rules.classify_score(score),
        is_valid,
        validation_message,
    })
}

fn fallback_workface(
    number: usize,
    f: &Fragment,
    frame: &LayoutFrame,
    rules: &MiningRuleSet,
) -> Option<WorkfaceCandidate> {
    let placed = place(f, frame)?;
    Some(WorkfaceCandidate {
        id: format!("WF-{number:02}"),
        points: placed.points,
        center_x: placed.center.x,
        center_y: placed.center.y,
        length: f.length,
        advance_length: f.advance,
        area: placed.area,
        score: fallback::FALLBACK_SCORE,
        grade: rules.classify_score(fallback::FALLBACK_SCORE),
        is_valid: false,
        validation_message: fallback::FALLBACK_MESSAGE.to_string(),
    })
}

struct StatsInput {
    boundary_area: f64,
    mining_area: f64,
    orientation: String,
    dip_angle: Option<f64>,
    fallback: bool,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn summarize(
    workfaces: &[WorkfaceCandidate],
    rules: &MiningRuleSet,
    input: StatsInput,
) -> DesignStats {
    let count = workfaces.len();
    let valid_count = workfaces.iter().filter(|w| w.is_valid).count();
    let mean = |f: fn(&WorkfaceCandidate) -> f64| {
        if count == 0 {
            0.0
        } else {
            round1(workfaces.iter().map(f).sum::<f64>() / count as f64)
        }
    };
    let method = match rules.mining_method {
        MiningMethod::Retreat => "retreat",
        MiningMethod::Advance => "advance",
    };
    let mining_method = if input.fallback {
        "fallback layout".to_string()
    } else {
        format!("{} longwall {method} mining", rules.layout_direction.label())
    };
    DesignStats {
        boundary_area: input.boundary_area,
        mining_area: input.mining_area,
        total_area: workfaces.iter().map(|w| w.area).sum(),
        count,
        valid_count,
        invalid_count: count - valid_count,
        layout_direction: rules.layout_direction,
        orientation: input.orientation,
        avg_face_length: mean(|w| w.length),
        avg_advance_length: mean(|w| w.advance_length),
        avg_score: mean(|w| w.score),
        mining_method,
        dip_class: input.dip_angle.map(|d| rules.classify_dip_angle(d)),
        needs_pseudo_incline: input.dip_angle.is_some_and(|d| rules.needs_pseudo_incline(d)),
        fallback: input.fallback,
    }
}
