//! Decimal quantization policies.
//!
//! Both policies scale by `10^digits`, quantize to an integer and scale
//! back. `round` is half-away-from-zero (`f64::round`). Only non-negative
//! inputs are meaningful; negative behavior is left unspecified.

/// Discard all digits past `digits` decimal places.
///
/// For `value >= 0` the result never exceeds `value`, even when the scaled
/// product lands on an integer only because of binary rounding.
pub fn truncate(value: f64, digits: u32) -> f64 {
    let factor = scale_factor(digits);
    let mut quantized = (value * factor).trunc();
    if value >= 0.0 && quantized / factor > value {
        quantized -= 1.0;
    }
    quantized / factor
}

/// Round to `digits` decimal places, ties away from zero.
pub fn round(value: f64, digits: u32) -> f64 {
    let factor = scale_factor(digits);
    (value * factor).round() / factor
}

#[inline]
fn scale_factor(digits: u32) -> f64 {
    10f64.powi(digits as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn pi_baselines() {
        assert_eq!(truncate(PI, 4), 3.1415);
        assert_eq!(round(PI, 4), 3.1416);
    }

    #[test]
    fn zero_digits() {
        assert_eq!(truncate(2.99, 0), 2.0);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(2.49, 0), 2.0);
    }

    #[test]
    fn exact_values_unchanged() {
        assert_eq!(truncate(3.25, 2), 3.25);
        assert_eq!(round(3.25, 2), 3.25);
        assert_eq!(truncate(0.0, 4), 0.0);
    }

    #[test]
    fn truncate_never_exceeds_input() {
        let samples = [
            0.29, 0.57, 1.005, 2.675, 3.091_623_806_667_84, 3.131_592_903_558_553_7, 4.0,
            0.1 + 0.2, 123.456_789,
        ];
        for &x in &samples {
            for d in 0..=8 {
                assert!(truncate(x, d) <= x, "truncate({x}, {d}) = {}", truncate(x, d));
            }
        }
    }

    #[test]
    fn round_within_half_unit() {
        let samples = [0.29, 1.005, 2.675, 3.091_623_806_667_84, PI, 9.999_95];
        for &x in &samples {
            for d in 0..=8 {
                let bound = 0.5 * 10f64.powi(-(d as i32));
                let err = (round(x, d) - x).abs();
                assert!(err <= bound + 1e-12, "round({x}, {d}) off by {err}");
            }
        }
    }

    #[test]
    fn policies_can_disagree() {
        assert_eq!(truncate(3.131_592_903_558_553_7, 4), 3.1315);
        assert_eq!(round(3.131_592_903_558_553_7, 4), 3.1316);
    }
}
