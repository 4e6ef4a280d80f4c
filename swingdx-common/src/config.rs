//! Engine configuration loading
//!
//! Every tunable constant of the scoring engine lives here, with a
//! built-in default. A TOML file may override any subset of them.
//!
//! # Resolution order
//!
//! 1. Explicit path (e.g. `--config` on the command line), must exist
//! 2. `SWINGDX_CONFIG` environment variable
//! 3. Platform config dir: `<config_dir>/swingdx/config.toml`
//! 4. Compiled defaults
//!
//! A missing file at steps 2–3 is not an error: a warning is logged and
//! resolution continues. A file that exists but fails to parse or
//! validate is always an error.

use crate::baselines::{builtin_baselines, BaselineTable, PopulationBaseline, DEFAULT_LEVEL};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "SWINGDX_CONFIG";

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub extractor: ExtractorConfig,

    #[serde(default)]
    pub percentile: PercentileConfig,

    #[serde(default)]
    pub ball_flight: BallFlightConfig,

    /// Replacement benchmark tables; empty means use the compiled tables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub baselines: Vec<PopulationBaseline>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Segment momentum extractor constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Centered moving-average window, frames (odd)
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,

    /// Wrist-midpoint speed → bat-tip speed factor when no bat end is tracked
    ///
    /// Empirical approximation, not a kinematic derivation.
    #[serde(default = "default_bat_speed_multiplier")]
    pub bat_speed_multiplier: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            smoothing_window: default_smoothing_window(),
            bat_speed_multiplier: default_bat_speed_multiplier(),
        }
    }
}

/// Percentile engine constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileConfig {
    /// Group used for unrecognized level keys
    #[serde(default = "default_level")]
    pub default_level: String,

    #[serde(default)]
    pub regression: RegressionCoefficients,
}

impl Default for PercentileConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            regression: RegressionCoefficients::default(),
        }
    }
}

/// Expected bat speed = intercept + Σ coefficient × sub-percentile
///
/// Fitted offline; the engine never re-derives them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionCoefficients {
    pub intercept: f64,
    pub bat_speed: f64,
    pub hand_speed: f64,
    pub hand_to_bat_ratio: f64,
    pub timing: f64,
}

impl Default for RegressionCoefficients {
    fn default() -> Self {
        Self {
            intercept: 42.0,
            bat_speed: 0.10,
            hand_speed: 0.20,
            hand_to_bat_ratio: 0.15,
            timing: 0.05,
        }
    }
}

/// Ball-flight predictor constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallFlightConfig {
    /// Regulation baseball mass, kg
    #[serde(default = "default_ball_mass_kg")]
    pub ball_mass_kg: f64,

    #[serde(default = "default_base_collision_efficiency")]
    pub base_collision_efficiency: f64,

    #[serde(default = "default_min_collision_efficiency")]
    pub min_collision_efficiency: f64,

    #[serde(default = "default_max_collision_efficiency")]
    pub max_collision_efficiency: f64,

    /// Launch angle before profile/rotation adjustments, degrees
    #[serde(default = "default_base_launch_angle")]
    pub base_launch_angle: f64,
}

impl Default for BallFlightConfig {
    fn default() -> Self {
        Self {
            ball_mass_kg: default_ball_mass_kg(),
            base_collision_efficiency: default_base_collision_efficiency(),
            min_collision_efficiency: default_min_collision_efficiency(),
            max_collision_efficiency: default_max_collision_efficiency(),
            base_launch_angle: default_base_launch_angle(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_smoothing_window() -> usize {
    crate::signal::DEFAULT_SMOOTHING_WINDOW
}

fn default_bat_speed_multiplier() -> f64 {
    1.5
}

fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}

fn default_ball_mass_kg() -> f64 {
    0.145
}

fn default_base_collision_efficiency() -> f64 {
    0.20
}

fn default_min_collision_efficiency() -> f64 {
    0.18
}

fn default_max_collision_efficiency() -> f64 {
    0.25
}

fn default_base_launch_angle() -> f64 {
    18.0
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve configuration following the documented priority order
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        // Priority 1: explicit path must exist
        if let Some(path) = explicit {
            return Self::load(path);
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load(&path);
            }
            warn!(
                "{} points to missing file {}, ignoring",
                CONFIG_ENV_VAR,
                path.display()
            );
        }

        // Priority 3: platform config directory
        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::load(&path);
            }
            debug!("No config file at {}", path.display());
        }

        // Priority 4: compiled defaults
        warn!("No configuration file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Run every parameter validator, reporting all failures together
    pub fn validate(&self) -> Result<()> {
        let failures: Vec<String> = Self::metadata()
            .iter()
            .filter_map(|meta| (meta.validator)(self).err())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(failures.join("; ")))
        }
    }

    /// Baseline table from config, or the compiled tables if none given
    ///
    /// The configured default level applies in both cases.
    pub fn baseline_table(&self) -> Result<BaselineTable> {
        let baselines = if self.baselines.is_empty() {
            builtin_baselines()
        } else {
            self.baselines.clone()
        };
        BaselineTable::new(baselines, &self.percentile.default_level)
    }
}

/// `<config_dir>/swingdx/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("swingdx").join("config.toml"))
}
