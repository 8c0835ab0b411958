//! Command-line arguments and their mapping onto [`DriftConfig`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use drift_common::prelude::{BaselineStrategy, ConfigError, ConfigLoader, DriftConfig};
use tracing::info;

/// Baseline strategy as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BaselineArg {
    /// Truncate/round the Leibniz partial sum at every step.
    Series,
    /// Use the fixed 3.1415 / 3.1416 pair (or the configured values).
    Fixed,
}

impl From<BaselineArg> for BaselineStrategy {
    fn from(arg: BaselineArg) -> Self {
        match arg {
            BaselineArg::Series => BaselineStrategy::Series,
            BaselineArg::Fixed => BaselineStrategy::Fixed,
        }
    }
}

/// pi from the Leibniz series: truncated vs rounded baseline error propagation
#[derive(Parser, Debug, Clone)]
#[command(name = "drift")]
#[command(author = "RTS007")]
#[command(version)]
#[command(
    about = "pi from the Leibniz series: compare truncated vs rounded baselines at 20, 40, 60, 100"
)]
#[command(long_about = None)]
pub struct Args {
    /// Print the comparison table and exit (no visualization)
    #[arg(long, conflicts_with = "viz")]
    pub table_only: bool,

    /// Show the rocket visualization only (no table)
    #[arg(long)]
    pub viz: bool,

    /// Steps to report and annotate (default: 20 40 60 100)
    #[arg(long, num_args = 1.., value_name = "N", value_parser = clap::value_parser!(i64).range(1..))]
    pub steps: Option<Vec<i64>>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Animation backend (terminal, headless)
    #[arg(long, value_name = "NAME")]
    pub backend: Option<String>,

    /// Last animated step
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(i64).range(1..))]
    pub max_step: Option<i64>,

    /// Baseline derivation strategy
    #[arg(long, value_enum)]
    pub baseline: Option<BaselineArg>,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_wait: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Whether the report table is printed.
    pub fn shows_table(&self) -> bool {
        !self.viz
    }

    /// Whether the animation runs.
    pub fn shows_animation(&self) -> bool {
        !self.table_only
    }

    /// Whether to wait for Enter before exiting (default invocation only).
    pub fn waits_for_ack(&self) -> bool {
        !self.table_only && !self.viz && !self.no_wait
    }

    /// Load the configuration file (or defaults), apply CLI overrides and
    /// validate the result.
    ///
    /// When `--steps` reaches past the animation range and `--max-step` is
    /// not given, the range is extended so every step gets annotated.
    ///
    /// # Errors
    /// Any `ConfigError` from loading or validation.
    pub fn load_config(&self) -> Result<DriftConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                DriftConfig::load(path)?
            }
            None => DriftConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut DriftConfig) {
        if let Some(steps) = &self.steps {
            config.report.highlighted_steps = steps.clone();
            if self.max_step.is_none() {
                let highest = steps.iter().copied().max().unwrap_or(0);
                config.animation.max_step = config.animation.max_step.max(highest);
            }
        }
        if let Some(max_step) = self.max_step {
            config.animation.max_step = max_step;
        }
        if let Some(backend) = &self.backend {
            config.animation.backend = backend.clone();
        }
        if let Some(baseline) = self.baseline {
            config.numeric.baseline = baseline.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn default_invocation() {
        let args = Args::try_parse_from(["drift"]).unwrap();
        assert!(args.shows_table());
        assert!(args.shows_animation());
        assert!(args.waits_for_ack());
        assert!(args.steps.is_none());
    }

    #[test]
    fn table_only_and_viz_conflict() {
        let err = Args::try_parse_from(["drift", "--table-only", "--viz"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn steps_accept_many_values() {
        let args = Args::try_parse_from(["drift", "--steps", "100", "20", "60"]).unwrap();
        assert_eq!(args.steps, Some(vec![100, 20, 60]));
    }

    #[test]
    fn steps_must_be_positive() {
        assert!(Args::try_parse_from(["drift", "--steps", "0"]).is_err());
        assert!(Args::try_parse_from(["drift", "--steps", "-3"]).is_err());
    }

    #[test]
    fn modes() {
        let table = Args::try_parse_from(["drift", "--table-only"]).unwrap();
        assert!(table.shows_table() && !table.shows_animation() && !table.waits_for_ack());

        let viz = Args::try_parse_from(["drift", "--viz"]).unwrap();
        assert!(!viz.shows_table() && viz.shows_animation() && !viz.waits_for_ack());
    }

    #[test]
    fn steps_beyond_range_extend_max_step() {
        let args = Args::try_parse_from(["drift", "--steps", "20", "150"]).unwrap();
        let config = args.load_config().unwrap();
        assert_eq!(config.animation.max_step, 150);
        assert_eq!(config.report.highlighted_steps, vec![20, 150]);
    }

    #[test]
    fn explicit_max_step_below_steps_is_rejected() {
        let args =
            Args::try_parse_from(["drift", "--steps", "150", "--max-step", "100"]).unwrap();
        assert!(matches!(
            args.load_config(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn overrides_apply() {
        let args = Args::try_parse_from([
            "drift",
            "--baseline",
            "fixed",
            "--backend",
            "headless",
            "--max-step",
            "120",
        ])
        .unwrap();
        let config = args.load_config().unwrap();
        assert_eq!(config.numeric.baseline, BaselineStrategy::Fixed);
        assert_eq!(config.animation.backend, "headless");
        assert_eq!(config.animation.max_step, 120);
    }

    #[test]
    fn config_file_then_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("drift.toml");
        std::fs::write(
            &path,
            "[numeric]\nbaseline = \"fixed\"\n\n[animation]\nbackend = \"headless\"\nmax_step = 80\n\n[report]\nhighlighted_steps = [10, 80]\n",
        )
        .unwrap();
        let path_arg = path.to_str().unwrap();

        let from_file = Args::try_parse_from(["drift", "--config", path_arg])
            .unwrap()
            .load_config()
            .unwrap();
        assert_eq!(from_file.numeric.baseline, BaselineStrategy::Fixed);
        assert_eq!(from_file.animation.backend, "headless");
        assert_eq!(from_file.animation.max_step, 80);
        assert_eq!(from_file.report.highlighted_steps, vec![10, 80]);

        let overridden = Args::try_parse_from([
            "drift", "--config", path_arg, "--baseline", "series", "--steps", "40",
        ])
        .unwrap()
        .load_config()
        .unwrap();
        assert_eq!(overridden.numeric.baseline, BaselineStrategy::Series);
        assert_eq!(overridden.animation.max_step, 80);
        assert_eq!(overridden.report.highlighted_steps, vec![40]);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        let args = Args::try_parse_from(["drift", "-c", path.to_str().unwrap()]).unwrap();
        assert!(matches!(args.load_config(), Err(ConfigError::FileNotFound)));
    }
}
