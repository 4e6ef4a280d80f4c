//! # swingdx common library
//!
//! Shared code for the swing diagnostics crates including:
//! - Input data model (pose frames, batted-ball events, swing samples, biomechanics)
//! - Peak detection and smoothing utilities
//! - Descriptive statistics
//! - Population baseline tables
//! - Engine configuration loading and parameter validation

pub mod baselines;
pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod signal;
pub mod stats;

pub use baselines::{BaselineTable, PercentileRange, PopulationBaseline};
pub use config::EngineConfig;
pub use error::{Error, Result};
