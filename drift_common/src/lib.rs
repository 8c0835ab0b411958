//! Drift Common Library
//!
//! Shared constants and configuration loading for the pi drift workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Numeric defaults and hard limits
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust,no_run
//! use drift_common::config::{ConfigLoader, DriftConfig};
//! use std::path::Path;
//!
//! let config = DriftConfig::load(Path::new("drift.toml")).unwrap();
//! config.validate().unwrap();
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
