//! Planar geometry for the layout pipeline.
//!
//! Purpose
//! - One coordinate type (`Point2D`), one rotation convention (`LayoutFrame`,
//!   degrees, CCW positive) and a thin polygon layer over the `geo` kernel.
//! - Keep numerics explicit: tolerances live in `GeomCfg`.
//!
//! Why a kernel
//! - Boolean ops, inward buffers and minimum rotated rectangles on concave
//!   boundaries are delegated to `geo`; only ring predicates and rotations are
//!   written here.
//!
//! Code cross-refs: `layout::generate_layout`, `roadway::generate_roadways`

mod frame;
mod polygon;
pub mod rand;
mod types;
mod util;

pub use frame::{rotate_about, LayoutFrame};
pub use polygon::{
    bounds, clip_to_band, erode, exterior_points, is_simple, largest_part,
    longest_edge_angle, polygon_from_points, repair, ring_area,
};
pub use types::{path_length, GeomCfg, Point2D};
