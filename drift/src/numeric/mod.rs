//! Numeric core: series approximation, rounding policies and the
//! downstream magnitude formula.
//!
//! Every function here is pure and deterministic.

pub mod magnitude;
pub mod rounding;
pub mod series;

use thiserror::Error;

pub use magnitude::magnitude;
pub use rounding::{round, truncate};
pub use series::{PartialSums, approximate};

/// Errors raised by the numeric core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    /// An argument is outside the function's domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
