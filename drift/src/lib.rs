//! # Drift Library
//!
//! Leibniz-series approximation of pi, truncation vs rounding baselines, and
//! how their difference propagates through a downstream magnitude formula.
//!
//! # Module Structure
//!
//! - [`numeric`] - Series, rounding policies, magnitude formula
//! - [`baseline`] - `(truncated, rounded)` pair per step
//! - [`report`] - Propagation rows and the console table
//! - [`trajectory`] - Per-frame angles, positions and annotations
//! - [`animator`] - Pluggable rendering backends
//! - [`cli`] - Command-line arguments
//!
//! # Data Flow
//!
//! ```text
//! step ──► approximate ──► partial ──► truncate / round ──► (trunc, round)
//!                                                              │
//!                                           magnitude(each) ◄──┘
//!                                                  │
//!                                                  ▼
//!                                   gap = |Vec(round) - Vec(trunc)|
//! ```

#![warn(missing_docs)]

pub mod animator;
pub mod baseline;
pub mod cli;
pub mod numeric;
pub mod report;
pub mod trajectory;

// Re-export key types for convenience
pub use crate::animator::{AnimationError, AnimationOutcome, Animator, AnimatorRegistry, animate};
pub use crate::baseline::Baselines;
pub use crate::numeric::NumericError;
pub use crate::report::{
    PropagationReport, PropagationRow, ReportError, TableStyle, build_report, render_table,
};
pub use crate::trajectory::{StepFrame, Trajectory};
