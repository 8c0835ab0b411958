//! Propagation report.
//!
//! For every highlighted step the report carries both baselines, the
//! magnitude each one produces downstream, and the absolute gap between
//! those magnitudes. Rows are always in ascending step order with
//! duplicates removed.

use std::collections::BTreeSet;
use std::fmt::Write;

use drift_common::config::{BaselineStrategy, NumericConfig, ReportConfig};
use thiserror::Error;
use tracing::debug;

use crate::baseline::Baselines;
use crate::numeric::{self, NumericError};

/// Error building a propagation report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// Computing the row for `step` failed.
    #[error("Report row for step {step} failed: {source}")]
    Row {
        /// Step whose row could not be built.
        step: i64,
        /// Underlying numeric failure.
        #[source]
        source: NumericError,
    },
}

/// One report row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationRow {
    /// Step index (series term count and magnitude multiplier).
    pub step: i64,
    /// Leibniz partial sum after `step` terms.
    pub partial: f64,
    /// Truncation baseline.
    pub truncated: f64,
    /// Rounding baseline.
    pub rounded: f64,
    /// `magnitude(truncated, step)`.
    pub magnitude_truncated: f64,
    /// `magnitude(rounded, step)`.
    pub magnitude_rounded: f64,
    /// `|magnitude_rounded - magnitude_truncated|`.
    pub gap: f64,
}

impl PropagationRow {
    /// Run the full pipeline for a single step.
    ///
    /// This is the only place the gap is computed; the animator annotations
    /// reuse it.
    pub fn compute(step: i64, config: &NumericConfig) -> Result<Self, NumericError> {
        Self::from_baselines(step, &Baselines::derive(step, config)?)
    }

    /// Propagate baselines already derived for `step`.
    ///
    /// # Errors
    /// `NumericError::InvalidArgument` if the magnitude formula rejects `step`.
    pub fn from_baselines(step: i64, baselines: &Baselines) -> Result<Self, NumericError> {
        let magnitude_truncated = numeric::magnitude(baselines.truncated, step)?;
        let magnitude_rounded = numeric::magnitude(baselines.rounded, step)?;

        Ok(Self {
            step,
            partial: baselines.partial,
            truncated: baselines.truncated,
            rounded: baselines.rounded,
            magnitude_truncated,
            magnitude_rounded,
            gap: (magnitude_rounded - magnitude_truncated).abs(),
        })
    }
}

/// Where a report's baselines came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaselineSource {
    /// Partial sum quantized at every step.
    Series,
    /// Constant pair used at every step.
    Fixed {
        /// Truncated baseline.
        truncated: f64,
        /// Rounded baseline.
        rounded: f64,
    },
}

impl BaselineSource {
    /// Source described by `config`.
    pub fn from_config(config: &NumericConfig) -> Self {
        match config.baseline {
            BaselineStrategy::Series => Self::Series,
            BaselineStrategy::Fixed => Self::Fixed {
                truncated: config.fixed_truncated,
                rounded: config.fixed_rounded,
            },
        }
    }
}

/// Rows for a set of highlighted steps, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationReport {
    /// Digits kept by both baselines.
    pub decimal_digits: u32,
    /// Where the baselines came from.
    pub baseline: BaselineSource,
    /// One row per distinct step, ascending.
    pub rows: Vec<PropagationRow>,
}

impl PropagationReport {
    /// Row for `step`, if it was reported.
    pub fn row(&self, step: i64) -> Option<&PropagationRow> {
        self.rows
            .binary_search_by_key(&step, |r| r.step)
            .ok()
            .map(|idx| &self.rows[idx])
    }
}

/// Build the report for `steps` (any order, duplicates allowed).
///
/// # Errors
/// `ReportError::Row` for the first (lowest) step whose computation fails.
/// No row is silently skipped.
pub fn build_report<I>(steps: I, config: &NumericConfig) -> Result<PropagationReport, ReportError>
where
    I: IntoIterator<Item = i64>,
{
    let steps: BTreeSet<i64> = steps.into_iter().collect();

    let rows = steps
        .into_iter()
        .map(|step| {
            let row = PropagationRow::compute(step, config)
                .map_err(|source| ReportError::Row { step, source })?;
            debug!(
                "row step={} trunc={} round={} gap={:e}",
                row.step, row.truncated, row.rounded, row.gap
            );
            Ok(row)
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    Ok(PropagationReport {
        decimal_digits: config.decimal_digits,
        baseline: BaselineSource::from_config(config),
        rows,
    })
}

/// Formatting options for [`render_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    /// Fractional digits for partial sums, magnitudes and gaps.
    pub precision: usize,
}

impl TableStyle {
    /// Style taken from the report settings.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            precision: config.display_precision,
        }
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

/// Render the console table.
///
/// Baselines use the report's decimal digit count.
pub fn render_table(report: &PropagationReport, style: &TableStyle) -> String {
    let precision = style.precision;
    let digits = report.decimal_digits as usize;
    let w_step = 6;
    let w_val = (precision + 6).max(20);
    let w_gap = precision.max(14);

    let col_trunc = format!("Trunc ({digits} dec)");
    let col_round = format!("Round ({digits} dec)");

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "--- Error Propagation: pi from Leibniz Series (Truncated vs Rounded Baseline) ---"
    );
    let _ = writeln!(
        out,
        "Formula that calculates pi: pi/4 = 1 - 1/3 + 1/5 - 1/7 + ... (Leibniz)"
    );
    match report.baseline {
        BaselineSource::Series => {
            let _ = writeln!(
                out,
                "Baselines: partial sum truncated and rounded to {digits} decimals at each step."
            );
        }
        BaselineSource::Fixed { truncated, rounded } => {
            let _ = writeln!(
                out,
                "Baselines: fixed {truncated:.digits$} (truncated) and {rounded:.digits$} (rounded)."
            );
        }
    }
    let _ = writeln!(
        out,
        "Vec = sqrt((baseline*step)^2 + step^2); Gap = |Vec(round) - Vec(trunc)|.\n"
    );

    let header = format!(
        "{:<w_step$} | {:<w_val$} | {:<w_val$} | {:<w_val$} | {:<w_val$} | {:<w_val$} | {:<w_gap$}",
        "Step", "Partial pi", col_trunc, col_round, "Vec (trunc)", "Vec (round)", "Gap"
    );
    let separator = "-".repeat(header.len());
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{separator}");

    for row in &report.rows {
        let _ = writeln!(
            out,
            "{:<w_step$} | {:<w_val$.precision$} | {:<w_val$.digits$} | {:<w_val$.digits$} | {:<w_val$.precision$} | {:<w_val$.precision$} | {:<w_gap$.precision$}",
            row.step,
            row.partial,
            row.truncated,
            row.rounded,
            row.magnitude_truncated,
            row.magnitude_rounded,
            row.gap,
        );
    }
    let _ = writeln!(out, "{separator}");
    out
}
