//! Workspace-wide constants.
//!
//! Single source of truth for numeric defaults and limits.

/// Decimal digits kept by both baselines.
pub const DEFAULT_DECIMAL_DIGITS: u32 = 4;

/// Largest accepted decimal digit count (f64 carries ~15.9 significant digits).
pub const MAX_DECIMAL_DIGITS: u32 = 15;

/// Steps reported in the table and annotated during the animation.
pub const DEFAULT_HIGHLIGHTED_STEPS: [i64; 4] = [20, 40, 60, 100];

/// Upper bound of the animation range.
pub const DEFAULT_MAX_STEP: i64 = 100;

/// Largest step accepted by the magnitude formula.
pub const MAX_STEP_LIMIT: i64 = 1_000_000;

/// Fractional digits for partial sums, magnitudes and gaps in the table.
pub const DEFAULT_DISPLAY_PRECISION: usize = 15;

/// Largest fractional digit count accepted for display.
pub const MAX_DISPLAY_PRECISION: usize = 17;

/// Truncated baseline used by the fixed strategy.
pub const FIXED_TRUNCATED_BASELINE: f64 = 3.1415;

/// Rounded baseline used by the fixed strategy.
pub const FIXED_ROUNDED_BASELINE: f64 = 3.1416;

/// Heading angle = baseline * step / divisor.
pub const DEFAULT_ANGLE_DIVISOR: f64 = 50.0;

/// Radius growth per step, in canvas units.
pub const DEFAULT_SCALE: f64 = 3.5;

/// Cosmetic multiplier on the rounded heading deviation.
pub const DEFAULT_VISUAL_AMPLIFICATION: f64 = 500.0;

/// Delay between animation frames.
pub const DEFAULT_STEP_DELAY_MS: u64 = 50;

/// Extra pause on highlighted steps.
pub const DEFAULT_HIGHLIGHT_PAUSE_MS: u64 = 800;

/// Animator backend used when none is configured.
pub const DEFAULT_BACKEND: &str = "terminal";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let max_highlighted = DEFAULT_HIGHLIGHTED_STEPS.iter().copied().max().unwrap();
        assert!(DEFAULT_MAX_STEP >= max_highlighted);
        assert!(DEFAULT_MAX_STEP <= MAX_STEP_LIMIT);
        assert!(DEFAULT_DECIMAL_DIGITS <= MAX_DECIMAL_DIGITS);
        assert!(DEFAULT_DISPLAY_PRECISION <= MAX_DISPLAY_PRECISION);
        assert!(DEFAULT_ANGLE_DIVISOR > 0.0);
    }

    #[test]
    fn fixed_baselines_bracket_pi() {
        assert!(FIXED_TRUNCATED_BASELINE < std::f64::consts::PI);
        assert!(FIXED_ROUNDED_BASELINE > std::f64::consts::PI);
    }
}
