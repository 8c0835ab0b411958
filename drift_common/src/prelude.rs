//! Prelude module for common re-exports.
//!
//! ```rust
//! use drift_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    AnimationConfig, BaselineStrategy, ConfigError, ConfigLoader, DriftConfig, NumericConfig,
    ReportConfig,
};

// ─── Limits ─────────────────────────────────────────────────────────
pub use crate::consts::{MAX_DECIMAL_DIGITS, MAX_STEP_LIMIT};
