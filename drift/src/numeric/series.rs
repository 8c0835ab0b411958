//! Leibniz/Gregory series: π/4 = 1 − 1/3 + 1/5 − 1/7 + …

use super::NumericError;

/// Partial-sum approximation of π using exactly `term_count` terms.
///
/// Terms are summed in index order (k = 0, 1, …, term_count − 1) so partial
/// sums are reproducible bit for bit.
///
/// # Errors
/// `NumericError::InvalidArgument` if `term_count <= 0`.
pub fn approximate(term_count: i64) -> Result<f64, NumericError> {
    if term_count <= 0 {
        return Err(NumericError::InvalidArgument(format!(
            "term count must be positive, got {term_count}"
        )));
    }

    let mut total = 0.0_f64;
    let mut sign = 1.0_f64;
    for k in 0..term_count {
        total += sign / (2 * k + 1) as f64;
        sign = -sign;
    }
    Ok(4.0 * total)
}

/// Running partial sums: the n-th item equals `approximate(n)` bit for bit.
///
/// Lets callers walk consecutive term counts in O(1) per step.
#[derive(Debug, Clone)]
pub struct PartialSums {
    k: i64,
    total: f64,
    sign: f64,
}

impl PartialSums {
    /// Start before the first term.
    pub fn new() -> Self {
        Self {
            k: 0,
            total: 0.0,
            sign: 1.0,
        }
    }
}

impl Default for PartialSums {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for PartialSums {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.total += self.sign / (2 * self.k + 1) as f64;
        self.sign = -self.sign;
        self.k += 1;
        Some(4.0 * self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn first_terms() {
        assert_eq!(approximate(1).unwrap(), 4.0);
        assert!((approximate(2).unwrap() - 8.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn twentieth_term() {
        let value = approximate(20).unwrap();
        assert!((value - 3.091_623_806_667_84).abs() < 1e-12);
    }

    #[test]
    fn deterministic() {
        for n in [1, 7, 20, 100, 1000] {
            assert_eq!(
                approximate(n).unwrap().to_bits(),
                approximate(n).unwrap().to_bits()
            );
        }
    }

    #[test]
    fn converges_toward_pi() {
        let err_10 = (approximate(10).unwrap() - PI).abs();
        let err_1000 = (approximate(1000).unwrap() - PI).abs();
        assert!(err_1000 < err_10);
        // Alternating series error is bounded by the first omitted term.
        assert!(err_1000 <= 4.0 / 2001.0);
    }

    #[test]
    fn alternates_around_pi() {
        assert!(approximate(99).unwrap() > PI);
        assert!(approximate(100).unwrap() < PI);
    }

    #[test]
    fn running_sums_match_direct_sums() {
        for (n, running) in (1..=2000).zip(PartialSums::new()) {
            assert_eq!(running.to_bits(), approximate(n).unwrap().to_bits(), "n={n}");
        }
    }

    #[test]
    fn rejects_non_positive() {
        assert!(matches!(
            approximate(0),
            Err(NumericError::InvalidArgument(_))
        ));
        assert!(matches!(
            approximate(-5),
            Err(NumericError::InvalidArgument(_))
        ));
    }
}
