//! Coal-mine district layout: workfaces, roadways and geological scoring.
//!
//! Modules, leaves first:
//! - `rules`: regulation constants and predicates.
//! - `geology`: borehole seams, dip estimation, IDW mineability scores.
//! - `geom2`: planar geometry over the `geo` kernel.
//! - `layout`: boundary → strips → workfaces, stats.
//! - `roadway`: trunk, gateway and cut network.
//! - `api`: request-scoped context and the one-call `run_design`.
//!
//! Everything is pure and synchronous; each design request builds its own
//! rule set, analyzer and polygons.

pub mod api;
pub mod error;
pub mod geology;
pub mod geom2;
pub mod layout;
pub mod roadway;
pub mod rules;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{LayoutError, RuleError};
pub use geom2::{GeomCfg, Point2D};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{run_design, DesignContext, DesignOutcome, DesignRequest};
    pub use crate::error::{LayoutError, RuleError};
    pub use crate::geology::{BoreholeSample, CoalSeamInfo, GeologyAnalyzer, StratumLayer};
    pub use crate::geom2::{LayoutFrame, Point2D};
    pub use crate::layout::{generate_layout, DesignParams, DesignResult, WorkfaceCandidate};
    pub use crate::roadway::{Roadway, RoadwayKind};
    pub use crate::rules::{LayoutDirection, MiningRuleSet, RuleOverrides};
}
