//! Baseline derivation: the `(truncated, rounded)` pair for one step.

use drift_common::config::{BaselineStrategy, NumericConfig};

use crate::numeric::{self, NumericError};

/// Partial sum and both quantized baselines for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baselines {
    /// Leibniz partial sum after `step` terms.
    pub partial: f64,
    /// Truncation baseline.
    pub truncated: f64,
    /// Rounding baseline.
    pub rounded: f64,
}

impl Baselines {
    /// Derive the baselines for `step` according to `config.baseline`.
    ///
    /// The partial sum is always computed, so an invalid step is rejected
    /// under both strategies.
    ///
    /// # Errors
    /// `NumericError::InvalidArgument` if `step <= 0`.
    pub fn derive(step: i64, config: &NumericConfig) -> Result<Self, NumericError> {
        Ok(Self::from_partial(numeric::approximate(step)?, config))
    }

    /// Quantize an already computed partial sum.
    pub fn from_partial(partial: f64, config: &NumericConfig) -> Self {
        let (truncated, rounded) = match config.baseline {
            BaselineStrategy::Series => (
                numeric::truncate(partial, config.decimal_digits),
                numeric::round(partial, config.decimal_digits),
            ),
            BaselineStrategy::Fixed => (config.fixed_truncated, config.fixed_rounded),
        };
        Self {
            partial,
            truncated,
            rounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_strategy_at_step_20() {
        let b = Baselines::derive(20, &NumericConfig::default()).unwrap();
        assert!((b.partial - 3.091_623_806_667_84).abs() < 1e-12);
        assert_eq!(b.truncated, 3.0916);
        assert_eq!(b.rounded, 3.0916);
    }

    #[test]
    fn series_strategy_at_step_100() {
        let b = Baselines::derive(100, &NumericConfig::default()).unwrap();
        assert_eq!(b.truncated, 3.1315);
        assert_eq!(b.rounded, 3.1316);
    }

    #[test]
    fn fixed_strategy_ignores_step() {
        let config = NumericConfig {
            baseline: BaselineStrategy::Fixed,
            ..Default::default()
        };
        for step in [1, 20, 100] {
            let b = Baselines::derive(step, &config).unwrap();
            assert_eq!(b.truncated, 3.1415);
            assert_eq!(b.rounded, 3.1416);
        }
    }

    #[test]
    fn digit_count_is_honored() {
        let config = NumericConfig {
            decimal_digits: 2,
            ..Default::default()
        };
        let b = Baselines::derive(100, &config).unwrap();
        assert_eq!(b.truncated, 3.13);
        assert_eq!(b.rounded, 3.13);
    }

    #[test]
    fn rejects_invalid_step() {
        let config = NumericConfig {
            baseline: BaselineStrategy::Fixed,
            ..Default::default()
        };
        assert!(Baselines::derive(0, &config).is_err());
    }
}
