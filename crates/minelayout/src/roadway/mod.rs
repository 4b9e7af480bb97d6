//! Roadway synthesizer: trunk, gateway and cut topology for a panel set.
//!
//! Purpose
//! - Connect every workface to a pair of trunk roadways (main transport and
//!   main ventilation) with two gateways and an open-off cut.
//!
//! Layout frame picture (trunks on the low-x side):
//!
//! ```text
//!  vent  transport
//!   │      ├──── transport gateway ────┐
//!   │      │        WF-01              │ cut
//!   │      ├──── return gateway ───────┘
//!   │      ├──── transport gateway ────┐
//!   │      │        WF-02              │ cut
//!   │      ├──── return gateway ───────┘
//! ```
//!
//! Trunks move to the high-x side when that side has materially more room
//! between the panels and the mining-area boundary.
//!
//! Code cross-refs: `layout::generate_layout`, `geom2::LayoutFrame`.

use geo::Polygon;
use serde::{Deserialize, Serialize};

use crate::geom2::{bounds, path_length, LayoutFrame, Point2D};
use crate::layout::WorkfaceCandidate;

/// Gap between the panels' bounding box and the transport trunk, meters.
pub const TRUNK_OFFSET: f64 = 30.0;
/// Spacing between the transport and ventilation trunks, meters.
pub const TRUNK_SPACING: f64 = 15.0;
/// Trunk overrun past the outermost panels at each end, meters.
pub const TRUNK_OVERRUN: f64 = 50.0;
/// Extra clearance the high side needs before trunks move there, meters.
const SIDE_PREFERENCE: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadwayKind {
    Main,
    Ventilation,
    Transport,
    Return,
    Cut,
    Gate,
}

impl RoadwayKind {
    /// Drawing width used by the CAD exporter, meters.
    pub fn nominal_width(self) -> f64 {
        match self {
            RoadwayKind::Main => 5.0,
            RoadwayKind::Ventilation => 4.5,
            RoadwayKind::Transport => 4.0,
            RoadwayKind::Return => 4.0,
            RoadwayKind::Cut => 6.0,
            RoadwayKind::Gate => 3.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadway {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RoadwayKind,
    /// World coordinates, at least two points.
    pub path: Vec<Point2D>,
    /// Sum of segment lengths of `path`.
    pub length: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workface_id: Option<String>,
}

/// Twin side lines of a roadway at ± half its nominal width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub left: Vec<Point2D>,
    pub right: Vec<Point2D>,
}

impl Roadway {
    fn new(
        id: String,
        name: String,
        kind: RoadwayKind,
        path: Vec<Point2D>,
        workface_id: Option<&str>,
    ) -> Self {
        let length = path_length(&path);
        Self {
            id,
            name,
            kind,
            path,
            length,
            workface_id: workface_id.map(str::to_string),
        }
    }

    /// Offset polylines on both sides of the center line. Interior vertices
    /// use mitered joins; degenerate (zero-length) paths yield `None`.
    pub fn corridor(&self) -> Option<Corridor> {
        let half = self.kind.nominal_width() / 2.0;
        let n = self.path.len();
        if n < 2 {
            return None;
        }
        let normals: Vec<(f64, f64)> = self
            .path
            .windows(2)
            .filter_map(|w| {
                let (dx, dy) = (w[1].x - w[0].x, w[1].y - w[0].y);
                let len = dx.hypot(dy);
                (len > 0.0).then(|| (-dy / len, dx / len))
            })
            .collect();
        if normals.len() != n - 1 {
            return None;
        }
        let mut left = Vec::with_capacity(n);
        let mut right = Vec::with_capacity(n);
        for (i, p) in self.path.iter().enumerate() {
            let (nx, ny) = if i == 0 {
                normals[0]
            } else if i == n - 1 {
                normals[n - 2]
            } else {
                let (a, b) = (normals[i - 1], normals[i]);
                let (mx, my) = (a.0 + b.0, a.1 + b.1);
                let m = mx.hypot(my);
                if m < 1e-9 {
                    a
                } else {
                    // scale so the offset edges stay `half` away from both segments
                    let (ux, uy) = (mx / m, my / m);
                    let cos = ux * a.0 + uy * a.1;
                    (ux / cos, uy / cos)
                }
            };
            left.push(Point2D::new(p.x + nx * half, p.y + ny * half));
            right.push(Point2D::new(p.x - nx * half, p.y - ny * half));
        }
        Some(Corridor { left, right })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrunkSide {
    Low,
    High,
}

/// Panel extents in the layout frame.
struct PanelBox {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

fn panel_box(wf: &WorkfaceCandidate, frame: &LayoutFrame) -> Option<PanelBox> {
    let pts: Vec<Point2D> = wf.points.iter().map(|p| frame.to_layout(*p)).collect();
    if pts.is_empty() {
        return None;
    }
    let mut b = PanelBox {
        x0: f64::INFINITY,
        x1: f64::NEG_INFINITY,
        y0: f64::INFINITY,
        y1: f64::NEG_INFINITY,
    };
    for p in &pts {
        b.x0 = b.x0.min(p.x);
        b.x1 = b.x1.max(p.x);
        b.y0 = b.y0.min(p.y);
        b.y1 = b.y1.max(p.y);
    }
    Some(b)
}

/// Roadways for `workfaces`, built in `frame` and returned in world
/// coordinates.
///
/// Order: main transport, main ventilation, then transport gateway, return
/// gateway and cut for each workface in input order. Empty input gives an
/// empty network.
pub fn generate_roadways(
    workfaces: &[WorkfaceCandidate],
    frame: &LayoutFrame,
    rotated_area: &Polygon<f64>,
) -> Vec<Roadway> {
    let panels: Vec<(&WorkfaceCandidate, PanelBox)> = workfaces
        .iter()
        .filter_map(|wf| panel_box(wf, frame).map(|b| (wf, b)))
        .collect();
    if panels.is_empty() {
        return Vec::new();
    }
    let min_x = panels.iter().map(|(_, b)| b.x0).fold(f64::INFINITY, f64::min);
    let max_x = panels.iter().map(|(_, b)| b.x1).fold(f64::NEG_INFINITY, f64::max);
    let min_y = panels.iter().map(|(_, b)| b.y0).fold(f64::INFINITY, f64::min);
    let max_y = panels.iter().map(|(_, b)| b.y1).fold(f64::NEG_INFINITY, f64::max);

    let side = match bounds(rotated_area) {
        Some(area) => {
            let low = min_x - area.min().x;
            let high = area.max().x - max_x;
            if high > low + SIDE_PREFERENCE {
                TrunkSide::High
            } else {
                TrunkSide::Low
            }
        }
        None => TrunkSide::Low,
    };
    let (transport_x, vent_x) = match side {
        TrunkSide::Low => {
            let t = min_x - TRUNK_OFFSET;
            (t, t - TRUNK_SPACING)
        }
        TrunkSide::High => {
            let t = max_x + TRUNK_OFFSET;
            (t, t + TRUNK_SPACING)
        }
    };
    tracing::debug!(?side, transport_x, vent_x, panels = panels.len(), "trunk placement");

    let world = |pts: [(f64, f64); 2]| -> Vec<Point2D> {
        pts.iter()
            .map(|&(x, y)| frame.to_world(Point2D::new(x, y)))
            .collect()
    };
    let (y_start, y_end) = (min_y - TRUNK_OVERRUN, max_y + TRUNK_OVERRUN);

    let mut out = Vec::with_capacity(2 + 3 * panels.len());
    out.push(Roadway::new(
        "Main-Transport".to_string(),
        "main transport roadway".to_string(),
        RoadwayKind::Main,
        world([(transport_x, y_start), (transport_x, y_end)]),
        None,
    ));
    out.push(Roadway::new(
        "Main-Ventilation".to_string(),
        "main ventilation roadway".to_string(),
        RoadwayKind::Ventilation,
        world([(vent_x, y_start), (vent_x, y_end)]),
        None,
    ));

    for (i, (wf, b)) in panels.iter().enumerate() {
        let k = i + 1;
        let far_x = match side {
            TrunkSide::Low => b.x1,
            TrunkSide::High => b.x0,
        };
        let id = Some(wf.id.as_str());
        out.push(Roadway::new(
            format!("Transport-Lane-{k}"),
            format!("{} transport gateway", wf.id),
            RoadwayKind::Transport,
            world([(transport_x, b.y1), (far_x, b.y1)]),
            id,
        ));
        out.push(Roadway::new(
            format!("Return-Lane-{k}"),
            format!("{} return gateway", wf.id),
            RoadwayKind::Return,
            world([(transport_x, b.y0), (far_x, b.y0)]),
            id,
        ));
        out.push(Roadway::new(
            format!("Cut-{k}"),
            format!("{} open-off cut", wf.id),
            RoadwayKind::Cut,
            world([(far_x, b.y0), (far_x, b.y1)]),
            id,
        ));
    }
    out
}
