//! Downstream consumer of a baseline: the trajectory diagonal
//! `sqrt((scalar·step)² + step²)`.

use drift_common::consts::MAX_STEP_LIMIT;

use super::NumericError;

/// Euclidean norm of `(scalar·step, step)`.
///
/// # Errors
/// `NumericError::InvalidArgument` if `step <= 0` or `step > MAX_STEP_LIMIT`.
pub fn magnitude(scalar: f64, step: i64) -> Result<f64, NumericError> {
    if step <= 0 {
        return Err(NumericError::InvalidArgument(format!(
            "step must be positive, got {step}"
        )));
    }
    if step > MAX_STEP_LIMIT {
        return Err(NumericError::InvalidArgument(format!(
            "step {step} exceeds limit {MAX_STEP_LIMIT}"
        )));
    }

    let step = step as f64;
    Ok((scalar * step).hypot(step))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_baselines_at_step_100() {
        let trunc = magnitude(3.1415, 100).unwrap();
        let round = magnitude(3.1416, 100).unwrap();
        assert!((trunc - 329.682_002_086_859_5).abs() < 1e-9);
        assert!((round - 329.691_530_980_096_56).abs() < 1e-9);

        let gap = (round - trunc).abs();
        assert!(gap > 0.0 && gap < 0.1);
        assert!((gap - 0.009_528_893_237).abs() < 1e-9);
    }

    #[test]
    fn never_below_step() {
        for step in [1, 2, 17, 100, 10_000] {
            for scalar in [0.0, 0.5, 3.1415, 42.0] {
                assert!(magnitude(scalar, step).unwrap() >= step as f64);
            }
        }
    }

    #[test]
    fn zero_scalar_is_step() {
        assert_eq!(magnitude(0.0, 7).unwrap(), 7.0);
    }

    #[test]
    fn rejects_bad_steps() {
        assert!(matches!(
            magnitude(3.1415, 0),
            Err(NumericError::InvalidArgument(_))
        ));
        assert!(matches!(
            magnitude(3.1415, -1),
            Err(NumericError::InvalidArgument(_))
        ));
        assert!(matches!(
            magnitude(3.1415, MAX_STEP_LIMIT + 1),
            Err(NumericError::InvalidArgument(_))
        ));
        assert!(magnitude(3.1415, MAX_STEP_LIMIT).is_ok());
    }
}
