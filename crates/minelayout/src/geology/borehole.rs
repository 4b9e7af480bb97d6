//! Borehole records and seam extraction from stratum logs.

use serde::{Deserialize, Serialize};

use super::seam::is_coal_layer;
use crate::geom2::Point2D;

/// Depth assumed for a seam synthesized from a bare coal thickness.
pub const SYNTHETIC_SEAM_DEPTH: f64 = 100.0;
/// Name of a seam synthesized from a bare coal thickness.
pub const MAIN_SEAM_NAME: &str = "主采煤层";

fn default_coal_thickness() -> f64 {
    3.0
}
fn default_gas_content() -> f64 {
    2.0
}
fn default_rock_hardness() -> f64 {
    5.0
}
fn default_ground_water() -> f64 {
    10.0
}

/// One coal seam intersected by a borehole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoalSeamInfo {
    pub name: String,
    /// Meters.
    pub thickness: f64,
    /// Depth of the seam top below the collar, meters.
    pub depth: f64,
    #[serde(default)]
    pub roof_rock: String,
    #[serde(default)]
    pub floor_rock: String,
    #[serde(default)]
    pub roof_thickness: f64,
    #[serde(default)]
    pub floor_thickness: f64,
}

/// One entry of a top-down borehole log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StratumLayer {
    pub name: String,
    pub thickness: f64,
}

impl StratumLayer {
    pub fn new(name: impl Into<String>, thickness: f64) -> Self {
        Self {
            name: name.into(),
            thickness,
        }
    }
}

/// A drilled sample location with scalar attributes and intersected seams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoreholeSample {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_coal_thickness")]
    pub coal_thickness: f64,
    #[serde(default = "default_gas_content")]
    pub gas_content: f64,
    #[serde(default = "default_rock_hardness")]
    pub rock_hardness: f64,
    #[serde(default = "default_ground_water")]
    pub ground_water: f64,
    #[serde(default)]
    pub seams: Vec<CoalSeamInfo>,
    /// Raw log; when present and `seams` is empty, seams are derived from it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<StratumLayer>,
}

impl BoreholeSample {
    /// Sample with default scalar attributes and no seams.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            coal_thickness: default_coal_thickness(),
            gas_content: default_gas_content(),
            rock_hardness: default_rock_hardness(),
            ground_water: default_ground_water(),
            seams: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Sample whose seams are read off a top-down stratum log.
    ///
    /// The coal thickness attribute takes the first seam's thickness.
    pub fn from_layers(id: impl Into<String>, x: f64, y: f64, layers: Vec<StratumLayer>) -> Self {
        let mut s = Self::new(id, x, y);
        s.seams = seams_from_layers(&layers);
        if let Some(first) = s.seams.first() {
            s.coal_thickness = first.thickness;
        }
        s.layers = layers;
        s
    }

    pub fn with_seam(mut self, seam: CoalSeamInfo) -> Self {
        self.seams.push(seam);
        self
    }

    pub fn collar(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Fill `seams` from the log, or synthesize one main seam from the bare
    /// coal thickness when there is nothing else to go on.
    pub(crate) fn resolve_seams(&mut self) {
        if !self.seams.is_empty() {
            return;
        }
        if !self.layers.is_empty() {
            self.seams = seams_from_layers(&self.layers);
        }
        if self.seams.is_empty() && self.coal_thickness > 0.0 {
            self.seams.push(CoalSeamInfo {
                name: MAIN_SEAM_NAME.to_string(),
                thickness: self.coal_thickness,
                depth: SYNTHETIC_SEAM_DEPTH,
                roof_rock: "砂岩".to_string(),
                floor_rock: "泥岩".to_string(),
                roof_thickness: 5.0,
                floor_thickness: 3.0,
            });
        }
    }
}

/// Coal layers of a log with their immediate roof and floor.
pub fn seams_from_layers(layers: &[StratumLayer]) -> Vec<CoalSeamInfo> {
    let mut seams = Vec::new();
    let mut top = 0.0;
    for (i, layer) in layers.iter().enumerate() {
        if is_coal_layer(&layer.name) {
            let roof = i.checked_sub(1).and_then(|j| layers.get(j));
            let floor = layers.get(i + 1);
            seams.push(CoalSeamInfo {
                name: layer.name.trim().to_string(),
                thickness: layer.thickness,
                depth: top,
                roof_rock: roof.map(|l| l.name.trim().to_string()).unwrap_or_default(),
                roof_thickness: roof.map_or(0.0, |l| l.thickness),
                floor_rock: floor.map(|l| l.name.trim().to_string()).unwrap_or_default(),
                floor_thickness: floor.map_or(0.0, |l| l.thickness),
            });
        }
        top += layer.thickness;
    }
    seams
}
