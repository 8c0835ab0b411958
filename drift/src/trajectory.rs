//! Per-frame numeric tuples for the trajectory animation.
//!
//! Each step yields two headings, one from each baseline. The rounded
//! heading's deviation from the truncated one is amplified for display
//! by [`visual_angle`], which only runs after the true angles have been
//! recorded. Annotations at highlighted steps are built by
//! [`PropagationRow::from_baselines`], the same function the report uses,
//! so on-screen numbers always equal the table.

use std::collections::BTreeSet;

use drift_common::config::{AnimationConfig, NumericConfig};

use crate::baseline::Baselines;
use crate::numeric::{NumericError, PartialSums};
use crate::report::PropagationRow;

/// Point on the animation plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// Numeric content of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepFrame {
    /// Step index, 1-based.
    pub step: i64,
    /// Heading from the truncated baseline [rad].
    pub angle_truncated: f64,
    /// Heading from the rounded baseline, unamplified [rad].
    pub angle_rounded: f64,
    /// Rounded heading as drawn [rad].
    pub angle_rounded_visual: f64,
    /// Marker position for the truncated trajectory.
    pub truncated_position: Point,
    /// Marker position for the rounded trajectory (uses the visual angle).
    pub rounded_position: Point,
    /// True magnitudes and gap, present only at highlighted steps.
    pub annotation: Option<PropagationRow>,
}

/// Heading angle for a baseline at `step`.
#[inline]
pub fn heading(baseline: f64, step: i64, angle_divisor: f64) -> f64 {
    baseline * step as f64 / angle_divisor
}

/// Amplify the deviation of `angle_rounded` from `angle_truncated`.
#[inline]
pub fn visual_angle(angle_truncated: f64, angle_rounded: f64, amplification: f64) -> f64 {
    angle_truncated + (angle_rounded - angle_truncated) * amplification
}

/// Polar-to-cartesian with radius `step * scale`.
#[inline]
pub fn position(angle: f64, step: i64, scale: f64) -> Point {
    let radius = step as f64 * scale;
    Point {
        x: radius * angle.cos(),
        y: radius * angle.sin(),
    }
}

/// Frame source for steps `1..=max_step`.
#[derive(Debug, Clone)]
pub struct Trajectory<'a> {
    numeric: &'a NumericConfig,
    animation: &'a AnimationConfig,
    highlighted: BTreeSet<i64>,
}

impl<'a> Trajectory<'a> {
    /// Create a frame source. Duplicate highlighted steps collapse.
    pub fn new<I>(numeric: &'a NumericConfig, animation: &'a AnimationConfig, highlighted: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            numeric,
            animation,
            highlighted: highlighted.into_iter().collect(),
        }
    }

    /// Last step, inclusive.
    pub fn max_step(&self) -> i64 {
        self.animation.max_step
    }

    /// Animation settings this trajectory was built with.
    pub fn animation(&self) -> &AnimationConfig {
        self.animation
    }

    /// Whether `step` carries an annotation.
    pub fn is_highlighted(&self, step: i64) -> bool {
        self.highlighted.contains(&step)
    }

    /// Compute the frame for `step`.
    ///
    /// # Errors
    /// `NumericError::InvalidArgument` for a step the numeric core rejects.
    pub fn frame(&self, step: i64) -> Result<StepFrame, NumericError> {
        self.frame_from(step, Baselines::derive(step, self.numeric)?)
    }

    /// All frames in ascending step order.
    ///
    /// Partial sums are carried from one step to the next, so the whole
    /// range costs one pass over the series.
    pub fn frames(&self) -> impl Iterator<Item = Result<StepFrame, NumericError>> + '_ {
        (1..=self.animation.max_step)
            .zip(PartialSums::new())
            .map(move |(step, partial)| {
                self.frame_from(step, Baselines::from_partial(partial, self.numeric))
            })
    }

    fn frame_from(&self, step: i64, baselines: Baselines) -> Result<StepFrame, NumericError> {
        let divisor = self.animation.angle_divisor;

        let angle_truncated = heading(baselines.truncated, step, divisor);
        let angle_rounded = heading(baselines.rounded, step, divisor);
        let annotation = if self.is_highlighted(step) {
            Some(PropagationRow::from_baselines(step, &baselines)?)
        } else {
            None
        };

        let angle_rounded_visual = visual_angle(
            angle_truncated,
            angle_rounded,
            self.animation.visual_amplification,
        );

        Ok(StepFrame {
            step,
            angle_truncated,
            angle_rounded,
            angle_rounded_visual,
            truncated_position: position(angle_truncated, step, self.animation.scale),
            rounded_position: position(angle_rounded_visual, step, self.animation.scale),
            annotation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_common::config::BaselineStrategy;

    #[test]
    fn heading_formula() {
        assert!((heading(3.1415, 50, 50.0) - 3.1415).abs() < 1e-12);
        assert_eq!(heading(2.0, 10, 4.0), 5.0);
    }

    #[test]
    fn visual_angle_identity_without_amplification() {
        assert_eq!(visual_angle(1.0, 1.25, 1.0), 1.25);
        assert_eq!(visual_angle(1.0, 1.0, 500.0), 1.0);
    }

    #[test]
    fn visual_angle_amplifies_deviation() {
        let v = visual_angle(1.0, 1.001, 500.0);
        assert!((v - 1.5).abs() < 1e-9);
    }

    #[test]
    fn position_on_circle() {
        let p = position(0.0, 10, 3.5);
        assert_eq!(p, Point { x: 35.0, y: 0.0 });
        let q = position(std::f64::consts::FRAC_PI_2, 2, 1.0);
        assert!(q.x.abs() < 1e-12);
        assert!((q.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn frame_without_highlight_has_no_annotation() {
        let numeric = NumericConfig::default();
        let animation = AnimationConfig::default();
        let trajectory = Trajectory::new(&numeric, &animation, [20]);
        assert!(trajectory.frame(19).unwrap().annotation.is_none());
        assert!(trajectory.frame(20).unwrap().annotation.is_some());
    }

    #[test]
    fn frames_cover_range() {
        let numeric = NumericConfig::default();
        let animation = AnimationConfig {
            max_step: 5,
            ..Default::default()
        };
        let trajectory = Trajectory::new(&numeric, &animation, [5]);
        let steps: Vec<i64> = trajectory.frames().map(|f| f.unwrap().step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sequential_frames_equal_single_frames() {
        for baseline in [BaselineStrategy::Series, BaselineStrategy::Fixed] {
            let numeric = NumericConfig {
                baseline,
                ..Default::default()
            };
            let animation = AnimationConfig::default();
            let trajectory = Trajectory::new(&numeric, &animation, [20, 40, 60, 100]);
            for frame in trajectory.frames() {
                let frame = frame.unwrap();
                assert_eq!(frame, trajectory.frame(frame.step).unwrap());
            }
        }
    }
}
