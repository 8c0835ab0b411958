//! Headless animator: walks every frame without rendering or pacing and
//! logs the annotations. Used in tests and non-interactive runs.

use std::sync::atomic::{AtomicBool, Ordering};

use drift_common::config::AnimationConfig;
use tracing::{debug, info};

use super::{AnimationError, AnimationOutcome, Animator};
use crate::trajectory::{StepFrame, Trajectory};

/// Registry name of this backend.
pub const BACKEND_NAME: &str = "headless";

/// Factory function registered under [`BACKEND_NAME`].
pub fn create_animator(_config: &AnimationConfig) -> Box<dyn Animator> {
    Box::new(HeadlessAnimator::new())
}

/// Frame recorder with no display.
#[derive(Debug, Default)]
pub struct HeadlessAnimator {
    frames: Vec<StepFrame>,
}

impl HeadlessAnimator {
    /// Create an animator with an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames consumed by the last run, in order.
    pub fn frames(&self) -> &[StepFrame] {
        &self.frames
    }
}

impl Animator for HeadlessAnimator {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn run(
        &mut self,
        trajectory: &Trajectory<'_>,
        running: &AtomicBool,
    ) -> Result<AnimationOutcome, AnimationError> {
        self.frames.clear();

        for (step, frame) in (1..).zip(trajectory.frames()) {
            if !running.load(Ordering::SeqCst) {
                info!("Headless animation interrupted after step {}", step - 1);
                return Ok(AnimationOutcome::Interrupted { at_step: step - 1 });
            }

            let frame = frame.map_err(|source| AnimationError::Numeric { step, source })?;
            debug!(
                "frame {} trunc=({:.3}, {:.3}) round=({:.3}, {:.3})",
                frame.step,
                frame.truncated_position.x,
                frame.truncated_position.y,
                frame.rounded_position.x,
                frame.rounded_position.y
            );
            if let Some(row) = &frame.annotation {
                info!(
                    "step {:>4}: vec(trunc)={:.10} vec(round)={:.10} gap={:.10}",
                    row.step, row.magnitude_truncated, row.magnitude_rounded, row.gap
                );
            }
            self.frames.push(frame);
        }

        Ok(AnimationOutcome::Completed {
            frames: trajectory.max_step(),
        })
    }
}
