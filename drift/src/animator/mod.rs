//! Trajectory animator trait, error types and backends.
//!
//! This module defines:
//! - `Animator` trait - Interface for pluggable rendering backends
//! - `AnimationError` enum - Error types for animation runs
//! - `AnimationOutcome` enum - How a run ended
//! - `AnimatorFactory` type alias - Factory function type
//!
//! Backends:
//! - [`terminal`] - ratatui canvas in the alternate screen
//! - [`headless`] - no rendering, logs annotations
//!
//! # Lifecycle
//!
//! 1. `AnimatorRegistry::create()` - Build the backend by name
//! 2. `run()` - Consume frames `1..=max_step` until done or interrupted
//!
//! [`animate`] does both for a loaded [`DriftConfig`] and applies the
//! run-level error policy.

pub mod headless;
pub mod registry;
pub mod terminal;

use std::sync::atomic::AtomicBool;

use drift_common::config::{AnimationConfig, DriftConfig};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::numeric::NumericError;
use crate::trajectory::Trajectory;

pub use headless::HeadlessAnimator;
pub use registry::AnimatorRegistry;
pub use terminal::TerminalAnimator;

/// Error types for animation runs.
#[derive(Debug, Error)]
pub enum AnimationError {
    /// Backend cannot run in this environment (unknown name, no terminal).
    #[error("Animation backend unavailable: {0}")]
    Unavailable(String),

    /// The numeric core rejected a frame.
    #[error("Frame for step {step} failed: {source}")]
    Numeric {
        /// Step whose frame could not be computed.
        step: i64,
        /// Underlying numeric failure.
        #[source]
        source: NumericError,
    },

    /// Terminal I/O failed mid-run.
    #[error("Animation I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// How an animation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// Every frame was shown.
    Completed {
        /// Number of frames shown.
        frames: i64,
    },
    /// The user stopped the run early.
    Interrupted {
        /// Last step shown before stopping (0 if none).
        at_step: i64,
    },
}

/// Factory function type for creating animator instances.
pub type AnimatorFactory = fn(&AnimationConfig) -> Box<dyn Animator>;

/// Trait defining the interface for animation backends.
///
/// Backends only render; every number they show comes from the
/// [`Trajectory`] frames.
pub trait Animator {
    /// Returns the backend's unique identifier (e.g., "terminal").
    fn name(&self) -> &'static str;

    /// Play all frames of `trajectory`.
    ///
    /// `running` is cleared by the Ctrl-C handler; the backend checks it at
    /// least once per frame and returns `AnimationOutcome::Interrupted`.
    ///
    /// # Errors
    /// `AnimationError::Unavailable` if the backend cannot start,
    /// `AnimationError::Numeric` if a frame fails, `AnimationError::Io` for
    /// rendering failures after start.
    fn run(
        &mut self,
        trajectory: &Trajectory<'_>,
        running: &AtomicBool,
    ) -> Result<AnimationOutcome, AnimationError>;
}

/// Build the configured backend from `registry` and play the trajectory.
///
/// An unavailable backend is logged and tolerated, and an interrupted run
/// counts as success. Frame and I/O failures are logged and returned.
///
/// # Errors
/// `AnimationError::Numeric` or `AnimationError::Io` from the backend.
pub fn animate(
    registry: &AnimatorRegistry,
    config: &DriftConfig,
    running: &AtomicBool,
) -> Result<(), AnimationError> {
    let trajectory = Trajectory::new(
        &config.numeric,
        &config.animation,
        config.report.highlighted_steps.iter().copied(),
    );

    let outcome = registry
        .create(&config.animation.backend, &config.animation)
        .and_then(|mut animator| {
            info!("Animating with '{}' backend", animator.name());
            animator.run(&trajectory, running)
        });

    match outcome {
        Ok(AnimationOutcome::Completed { frames }) => {
            info!("Animation completed ({} frames)", frames);
            Ok(())
        }
        Ok(AnimationOutcome::Interrupted { at_step }) => {
            info!("Animation stopped at step {}", at_step);
            Ok(())
        }
        Err(AnimationError::Unavailable(reason)) => {
            warn!(
                "Animation not available: {}. Run with --table-only to see the table.",
                reason
            );
            Ok(())
        }
        Err(e) => {
            error!("Animation failed: {}", e);
            Err(e)
        }
    }
}
