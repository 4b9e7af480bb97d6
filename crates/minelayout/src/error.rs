//! Error types surfaced to callers.
//!
//! Only input problems fail a design request; geometric degeneracies and sparse
//! geology degrade inside the pipeline and are reported through flags.

use thiserror::Error;

/// Rejected mining-rule configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("score weights sum to {sum:.4}, expected 1.0")]
    WeightSum { sum: f64 },
    #[error("{name}: min {min} exceeds max {max}")]
    InvertedBound { name: &'static str, min: f64, max: f64 },
    #[error("{name}: preferred {preferred} outside [{min}, {max}]")]
    PreferredOutOfRange {
        name: &'static str,
        preferred: f64,
        min: f64,
        max: f64,
    },
    #[error("{name}: bounds must be positive and finite (min {min})")]
    NonPositive { name: &'static str, min: f64 },
    #[error("{name}: class breakpoints must be strictly increasing")]
    Breakpoints { name: &'static str },
}

/// Hard failures of `layout::generate_layout`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Missing, non-finite or unrepairable boundary.
    #[error("boundary data missing or invalid: {0}")]
    Boundary(String),
    /// Nothing (or too little) left after eroding the boundary pillar.
    #[error("mining area too small: {area:.0} m² left after a {margin} m boundary pillar (minimum {min} m²)")]
    InsufficientArea { area: f64, margin: f64, min: f64 },
    #[error(transparent)]
    Rules(#[from] RuleError),
}
