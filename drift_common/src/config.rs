//! Configuration loading traits and types.
//!
//! Every tunable of the drift pipeline lives in [`DriftConfig`], loaded once at
//! startup and passed by reference to each component.
//!
//! # Usage
//!
//! ```rust,no_run
//! use drift_common::config::{ConfigLoader, DriftConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = DriftConfig::load(Path::new("drift.toml"))?;
//!     config.validate()?;
//!     println!("max step: {}", config.animation.max_step);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::{
    DEFAULT_ANGLE_DIVISOR, DEFAULT_BACKEND, DEFAULT_DECIMAL_DIGITS, DEFAULT_DISPLAY_PRECISION,
    DEFAULT_HIGHLIGHT_PAUSE_MS, DEFAULT_HIGHLIGHTED_STEPS, DEFAULT_MAX_STEP, DEFAULT_SCALE,
    DEFAULT_STEP_DELAY_MS, DEFAULT_VISUAL_AMPLIFICATION, FIXED_ROUNDED_BASELINE,
    FIXED_TRUNCATED_BASELINE, MAX_DECIMAL_DIGITS, MAX_DISPLAY_PRECISION, MAX_STEP_LIMIT,
};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Where the `(truncated, rounded)` baseline pair comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BaselineStrategy {
    /// Quantize the Leibniz partial sum at every step.
    #[default]
    Series,
    /// Use the constant pair `fixed_truncated` / `fixed_rounded` at every step.
    Fixed,
}

/// Numeric pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumericConfig {
    /// Decimal digits kept by both rounding policies (default: 4).
    #[serde(default = "default_decimal_digits")]
    pub decimal_digits: u32,

    /// Baseline derivation strategy (default: series).
    #[serde(default)]
    pub baseline: BaselineStrategy,

    /// Truncated baseline for [`BaselineStrategy::Fixed`] (default: 3.1415).
    #[serde(default = "default_fixed_truncated")]
    pub fixed_truncated: f64,

    /// Rounded baseline for [`BaselineStrategy::Fixed`] (default: 3.1416).
    #[serde(default = "default_fixed_rounded")]
    pub fixed_rounded: f64,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            decimal_digits: default_decimal_digits(),
            baseline: BaselineStrategy::default(),
            fixed_truncated: default_fixed_truncated(),
            fixed_rounded: default_fixed_rounded(),
        }
    }
}

/// Table report settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Steps that get a table row and an on-screen annotation.
    #[serde(default = "default_highlighted_steps")]
    pub highlighted_steps: Vec<i64>,

    /// Fractional digits for partial sums, magnitudes and gaps (default: 15).
    #[serde(default = "default_display_precision")]
    pub display_precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            highlighted_steps: default_highlighted_steps(),
            display_precision: default_display_precision(),
        }
    }
}

/// Trajectory animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    /// Animator backend name (default: "terminal").
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Last animated step, inclusive (default: 100).
    #[serde(default = "default_max_step")]
    pub max_step: i64,

    /// Heading angle = baseline * step / angle_divisor (default: 50.0).
    #[serde(default = "default_angle_divisor")]
    pub angle_divisor: f64,

    /// Radius growth per step in canvas units (default: 3.5).
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Multiplier on the rounded heading deviation, display only (default: 500.0).
    #[serde(default = "default_visual_amplification")]
    pub visual_amplification: f64,

    /// Delay between frames [ms] (default: 50).
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// Extra pause on highlighted steps [ms] (default: 800).
    #[serde(default = "default_highlight_pause_ms")]
    pub highlight_pause_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            max_step: default_max_step(),
            angle_divisor: default_angle_divisor(),
            scale: default_scale(),
            visual_amplification: default_visual_amplification(),
            step_delay_ms: default_step_delay_ms(),
            highlight_pause_ms: default_highlight_pause_ms(),
        }
    }
}

/// Top-level configuration (`drift.toml`).
///
/// # TOML Example
///
/// ```toml
/// log_level = "debug"
///
/// [numeric]
/// baseline = "fixed"
///
/// [report]
/// highlighted_steps = [10, 50]
///
/// [animation]
/// max_step = 200
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriftConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Numeric pipeline settings.
    #[serde(default)]
    pub numeric: NumericConfig,

    /// Table report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Trajectory animation settings.
    #[serde(default)]
    pub animation: AnimationConfig,
}

fn default_decimal_digits() -> u32 {
    DEFAULT_DECIMAL_DIGITS
}
fn default_fixed_truncated() -> f64 {
    FIXED_TRUNCATED_BASELINE
}
fn default_fixed_rounded() -> f64 {
    FIXED_ROUNDED_BASELINE
}
fn default_highlighted_steps() -> Vec<i64> {
    DEFAULT_HIGHLIGHTED_STEPS.to_vec()
}
fn default_display_precision() -> usize {
    DEFAULT_DISPLAY_PRECISION
}
fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}
fn default_max_step() -> i64 {
    DEFAULT_MAX_STEP
}
fn default_angle_divisor() -> f64 {
    DEFAULT_ANGLE_DIVISOR
}
fn default_scale() -> f64 {
    DEFAULT_SCALE
}
fn default_visual_amplification() -> f64 {
    DEFAULT_VISUAL_AMPLIFICATION
}
fn default_step_delay_ms() -> u64 {
    DEFAULT_STEP_DELAY_MS
}
fn default_highlight_pause_ms() -> u64 {
    DEFAULT_HIGHLIGHT_PAUSE_MS
}

impl NumericConfig {
    /// Validate the numeric settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `decimal_digits` exceeds
    /// [`MAX_DECIMAL_DIGITS`], a fixed baseline is not finite and positive,
    /// or, under [`BaselineStrategy::Fixed`], a fixed baseline carries more
    /// fractional digits than `decimal_digits`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_digits > MAX_DECIMAL_DIGITS {
            return Err(ConfigError::ValidationError(format!(
                "decimal_digits {} exceeds maximum {}",
                self.decimal_digits, MAX_DECIMAL_DIGITS
            )));
        }
        for (name, value) in [
            ("fixed_truncated", self.fixed_truncated),
            ("fixed_rounded", self.fixed_rounded),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
            if self.baseline == BaselineStrategy::Fixed
                && !fits_decimal_digits(value, self.decimal_digits)
            {
                return Err(ConfigError::ValidationError(format!(
                    "{name} {value} has more than {} decimal digits",
                    self.decimal_digits
                )));
            }
        }
        Ok(())
    }
}

/// Whether `value` is a multiple of `10^-digits`, up to binary noise.
fn fits_decimal_digits(value: f64, digits: u32) -> bool {
    let scaled = value * 10f64.powi(digits as i32);
    (scaled - scaled.round()).abs() <= 8.0 * f64::EPSILON * scaled.abs().max(1.0)
}

impl ReportConfig {
    /// Validate the report settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the step list is empty, holds a
    /// step outside `1..=MAX_STEP_LIMIT`, or the display precision is too large.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.highlighted_steps.is_empty() {
            return Err(ConfigError::ValidationError(
                "highlighted_steps cannot be empty".to_string(),
            ));
        }
        if let Some(step) = self
            .highlighted_steps
            .iter()
            .find(|&&s| s < 1 || s > MAX_STEP_LIMIT)
        {
            return Err(ConfigError::ValidationError(format!(
                "highlighted step {step} outside 1..={MAX_STEP_LIMIT}"
            )));
        }
        if self.display_precision > MAX_DISPLAY_PRECISION {
            return Err(ConfigError::ValidationError(format!(
                "display_precision {} exceeds maximum {}",
                self.display_precision, MAX_DISPLAY_PRECISION
            )));
        }
        Ok(())
    }
}

impl AnimationConfig {
    /// Validate the animation settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` on an empty backend name, a
    /// `max_step` outside `1..=MAX_STEP_LIMIT`, or a non-finite / non-positive
    /// divisor, scale or amplification.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.is_empty() {
            return Err(ConfigError::ValidationError(
                "backend cannot be empty".to_string(),
            ));
        }
        if self.max_step < 1 || self.max_step > MAX_STEP_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_step {} outside 1..={}",
                self.max_step, MAX_STEP_LIMIT
            )));
        }
        for (name, value) in [
            ("angle_divisor", self.angle_divisor),
            ("scale", self.scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !self.visual_amplification.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "visual_amplification must be finite, got {}",
                self.visual_amplification
            )));
        }
        Ok(())
    }
}

impl DriftConfig {
    /// Validate every section plus the cross-section constraint that all
    /// highlighted steps are reachable by the animation.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::ValidationError` encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.numeric.validate()?;
        self.report.validate()?;
        self.animation.validate()?;

        let max_highlighted = self
            .report
            .highlighted_steps
            .iter()
            .copied()
            .max()
            .unwrap_or(0);
        if self.animation.max_step < max_highlighted {
            return Err(ConfigError::ValidationError(format!(
                "max_step {} is below highlighted step {}",
                self.animation.max_step, max_highlighted
            )));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
///
/// Semantic validation is left to the caller (`DriftConfig::validate`).
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation: any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
