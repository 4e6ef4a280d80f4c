//! Parameter metadata definitions
//!
//! Single source of truth for the validation ranges of every tunable
//! engine constant. `EngineConfig::validate` walks this table; the CLI
//! prints it for `swingdx params`.

use crate::config::EngineConfig;

/// Description and validator for one configuration parameter
#[derive(Debug, Clone, Copy)]
pub struct ParamMetadata {
    /// Dotted TOML key, e.g. `extractor.smoothing_window`
    pub key: &'static str,
    pub data_type: &'static str,
    pub default_value: &'static str,
    pub description: &'static str,
    pub validation_range: &'static str,
    pub validator: fn(&EngineConfig) -> Result<(), String>,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn validate_log_level(config: &EngineConfig) -> Result<(), String> {
    let level = config.logging.level.to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "logging.level: '{}' is not one of {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        ))
    }
}

fn validate_smoothing_window(config: &EngineConfig) -> Result<(), String> {
    let v = config.extractor.smoothing_window;
    if !(1..=15).contains(&v) || v % 2 == 0 {
        return Err(format!(
            "extractor.smoothing_window: value {} must be odd and in [1, 15]",
            v
        ));
    }
    Ok(())
}

fn validate_bat_speed_multiplier(config: &EngineConfig) -> Result<(), String> {
    let v = config.extractor.bat_speed_multiplier;
    if !(v > 1.0 && v <= 3.0) {
        return Err(format!(
            "extractor.bat_speed_multiplier: value {} out of range (1.0, 3.0]",
            v
        ));
    }
    Ok(())
}

fn validate_regression(config: &EngineConfig) -> Result<(), String> {
    let r = &config.percentile.regression;
    let all = [r.intercept, r.bat_speed, r.hand_speed, r.hand_to_bat_ratio, r.timing];
    if all.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err("percentile.regression: coefficients must be finite numbers".to_string())
    }
}

fn validate_baselines(config: &EngineConfig) -> Result<(), String> {
    config
        .baseline_table()
        .map(|_| ())
        .map_err(|e| format!("baselines: {}", e))
}

fn validate_ball_mass(config: &EngineConfig) -> Result<(), String> {
    let v = config.ball_flight.ball_mass_kg;
    if !(0.1..=0.2).contains(&v) {
        return Err(format!(
            "ball_flight.ball_mass_kg: value {} out of range [0.1, 0.2]",
            v
        ));
    }
    Ok(())
}

fn validate_collision_efficiency(config: &EngineConfig) -> Result<(), String> {
    let bf = &config.ball_flight;
    let (min, base, max) = (
        bf.min_collision_efficiency,
        bf.base_collision_efficiency,
        bf.max_collision_efficiency,
    );
    if !(0.0 < min && min < max && max < 1.0) {
        return Err(format!(
            "ball_flight: collision efficiency bounds must satisfy 0 < min < max < 1 (got {}, {})",
            min, max
        ));
    }
    if !(min..=max).contains(&base) {
        return Err(format!(
            "ball_flight.base_collision_efficiency: value {} outside [{}, {}]",
            base, min, max
        ));
    }
    Ok(())
}

fn validate_base_launch_angle(config: &EngineConfig) -> Result<(), String> {
    let v = config.ball_flight.base_launch_angle;
    if !(-10.0..=45.0).contains(&v) {
        return Err(format!(
            "ball_flight.base_launch_angle: value {} out of range [-10, 45]",
            v
        ));
    }
    Ok(())
}

static PARAM_METADATA: [ParamMetadata; 8] = [
    ParamMetadata {
        key: "logging.level",
        data_type: "string",
        default_value: "info",
        description: "Log level when RUST_LOG is unset",
        validation_range: "trace|debug|info|warn|error",
        validator: validate_log_level,
    },
    ParamMetadata {
        key: "extractor.smoothing_window",
        data_type: "usize",
        default_value: "3",
        description: "Centered moving-average window applied to segment curves (frames)",
        validation_range: "odd, 1-15",
        validator: validate_smoothing_window,
    },
    ParamMetadata {
        key: "extractor.bat_speed_multiplier",
        data_type: "f64",
        default_value: "1.5",
        description: "Wrist-midpoint to bat-tip speed factor when no bat end is tracked",
        validation_range: "(1.0, 3.0]",
        validator: validate_bat_speed_multiplier,
    },
    ParamMetadata {
        key: "percentile.regression",
        data_type: "f64 x5",
        default_value: "42.0, 0.10, 0.20, 0.15, 0.05",
        description: "Expected bat speed regression over sub-percentiles",
        validation_range: "finite",
        validator: validate_regression,
    },
    ParamMetadata {
        key: "baselines",
        data_type: "table[]",
        default_value: "built-in youth..professional",
        description: "Population p10/p50/p90 benchmarks and the fallback level",
        validation_range: "p10 < p50 < p90, default level defined",
        validator: validate_baselines,
    },
    ParamMetadata {
        key: "ball_flight.ball_mass_kg",
        data_type: "f64",
        default_value: "0.145",
        description: "Ball mass used in the exit velocity energy balance (kg)",
        validation_range: "0.1-0.2",
        validator: validate_ball_mass,
    },
    ParamMetadata {
        key: "ball_flight.collision_efficiency",
        data_type: "f64 x3",
        default_value: "0.18 <= 0.20 <= 0.25",
        description: "Bat-ball energy transfer: min, base, max",
        validation_range: "0 < min <= base <= max < 1",
        validator: validate_collision_efficiency,
    },
    ParamMetadata {
        key: "ball_flight.base_launch_angle",
        data_type: "f64",
        default_value: "18.0",
        description: "Launch angle before profile and rotation adjustments (degrees)",
        validation_range: "-10-45",
        validator: validate_base_launch_angle,
    },
];

impl EngineConfig {
    /// Metadata for every validated parameter
    pub fn metadata() -> &'static [ParamMetadata] {
        &PARAM_METADATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_every_validator() {
        let config = EngineConfig::default();
        for meta in EngineConfig::metadata() {
            assert!(
                (meta.validator)(&config).is_ok(),
                "default for {} failed validation",
                meta.key
            );
        }
    }

    #[test]
    fn test_metadata_keys_unique() {
        let mut keys: Vec<_> = EngineConfig::metadata().iter().map(|m| m.key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), EngineConfig::metadata().len());
    }

    #[test]
    fn test_smoothing_window_must_be_odd() {
        let mut config = EngineConfig::default();
        config.extractor.smoothing_window = 5;
        assert!(validate_smoothing_window(&config).is_ok());
        config.extractor.smoothing_window = 2;
        assert!(validate_smoothing_window(&config).is_err());
        config.extractor.smoothing_window = 17;
        assert!(validate_smoothing_window(&config).is_err());
    }

    #[test]
    fn test_multiplier_bounds() {
        let mut config = EngineConfig::default();
        config.extractor.bat_speed_multiplier = 1.0;
        assert!(validate_bat_speed_multiplier(&config).is_err());
        config.extractor.bat_speed_multiplier = f64::NAN;
        assert!(validate_bat_speed_multiplier(&config).is_err());
        config.extractor.bat_speed_multiplier = 3.0;
        assert!(validate_bat_speed_multiplier(&config).is_ok());
    }

    #[test]
    fn test_collision_efficiency_ordering() {
        let mut config = EngineConfig::default();
        config.ball_flight.base_collision_efficiency = 0.30;
        assert!(validate_collision_efficiency(&config).is_err());

        let mut config = EngineConfig::default();
        config.ball_flight.min_collision_efficiency = 0.26;
        assert!(validate_collision_efficiency(&config).is_err());
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = EngineConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_log_level(&config).is_ok());
        config.logging.level = "verbose".to_string();
        assert!(validate_log_level(&config).is_err());
    }

    #[test]
    fn test_unknown_default_level_rejected() {
        let mut config = EngineConfig::default();
        config.percentile.default_level = "semi_pro".to_string();
        assert!(validate_baselines(&config).is_err());
    }
}
