//! Population baseline tables
//!
//! Empirical p10/p50/p90 anchors per age/level group for the four ranked
//! metrics. Tables are immutable reference data: built once (compiled
//! defaults or a `[[baselines]]` config section) and handed to the
//! percentile engine, never consulted as ambient global state.
//!
//! # Level keys
//!
//! Keys are normalized before lookup: lowercased, surrounding whitespace
//! trimmed, spaces and hyphens replaced by underscores. A small alias list
//! maps common shorthands (`hs`, `pro`, `12u`, ...) onto canonical groups.
//! Unknown keys resolve to the table's default group.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Canonical key of the fallback group
pub const DEFAULT_LEVEL: &str = "high_school";

/// p10/p50/p90 anchors for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRange {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl PercentileRange {
    pub const fn new(p10: f64, p50: f64, p90: f64) -> Self {
        Self { p10, p50, p90 }
    }

    /// Anchors must be finite and strictly increasing
    pub fn is_valid(&self) -> bool {
        self.p10.is_finite()
            && self.p50.is_finite()
            && self.p90.is_finite()
            && self.p10 < self.p50
            && self.p50 < self.p90
    }
}

/// Baselines for one age/level group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationBaseline {
    /// Canonical level key, e.g. `high_school`
    pub level: String,
    /// Bat speed at contact, mph
    pub bat_speed: PercentileRange,
    /// Peak hand speed, mph
    pub hand_speed: PercentileRange,
    /// Bat speed divided by hand speed
    pub hand_to_bat_ratio: PercentileRange,
    /// Time-to-contact coefficient of variation (lower is better)
    pub timing_cv: PercentileRange,
}

/// Lowercase, trim, and replace spaces/hyphens with underscores
///
/// ```rust
/// use swingdx_common::baselines::normalize_level_key;
///
/// assert_eq!(normalize_level_key(" High School "), "high_school");
/// assert_eq!(normalize_level_key("middle-school"), "middle_school");
/// ```
pub fn normalize_level_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Shorthand → canonical level key
fn alias(normalized: &str) -> Option<&'static str> {
    match normalized {
        "youth" | "little_league" | "10u" | "11u" | "12u" => Some("youth"),
        "ms" | "middle" | "13u" | "14u" => Some("middle_school"),
        "hs" | "highschool" | "varsity" | "jv" => Some("high_school"),
        "ncaa" | "college" | "collegiate" => Some("college"),
        "pro" | "mlb" | "milb" | "professional" => Some("professional"),
        _ => None,
    }
}

/// Result of resolving a level key against a table
#[derive(Debug, Clone, Copy)]
pub struct ResolvedBaseline<'a> {
    pub baseline: &'a PopulationBaseline,
    /// True when the key was unknown and the default group was used
    pub used_fallback: bool,
}

/// Immutable set of population baselines keyed by canonical level
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTable {
    groups: BTreeMap<String, PopulationBaseline>,
    default_level: String,
}

impl BaselineTable {
    /// Build and validate a table
    ///
    /// Group keys are normalized. Fails if any range is not strictly
    /// increasing, a level appears twice, or the default level is absent.
    pub fn new(baselines: Vec<PopulationBaseline>, default_level: &str) -> Result<Self> {
        let mut groups = BTreeMap::new();

        for mut baseline in baselines {
            let key = normalize_level_key(&baseline.level);
            for (metric, range) in [
                ("bat_speed", &baseline.bat_speed),
                ("hand_speed", &baseline.hand_speed),
                ("hand_to_bat_ratio", &baseline.hand_to_bat_ratio),
                ("timing_cv", &baseline.timing_cv),
            ] {
                if !range.is_valid() {
                    return Err(Error::Config(format!(
                        "baseline '{}': {} anchors must satisfy p10 < p50 < p90 (got {}, {}, {})",
                        key, metric, range.p10, range.p50, range.p90
                    )));
                }
            }
            baseline.level = key.clone();
            if groups.insert(key.clone(), baseline).is_some() {
                return Err(Error::Config(format!("baseline '{}' defined twice", key)));
            }
        }

        let default_level = normalize_level_key(default_level);
        if !groups.contains_key(&default_level) {
            return Err(Error::Config(format!(
                "default baseline level '{}' is not defined",
                default_level
            )));
        }

        Ok(Self {
            groups,
            default_level,
        })
    }

    /// Compiled-in benchmark table
    pub fn builtin() -> &'static BaselineTable {
        &BUILTIN
    }

    /// Canonical key of the fallback group
    pub fn default_level(&self) -> &str {
        &self.default_level
    }

    /// Canonical level keys, sorted
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Exact lookup by (normalized or aliased) key, no fallback
    pub fn get(&self, key: &str) -> Option<&PopulationBaseline> {
        let normalized = normalize_level_key(key);
        self.groups
            .get(&normalized)
            .or_else(|| alias(&normalized).and_then(|canonical| self.groups.get(canonical)))
    }

    /// Lookup with fallback to the default group
    ///
    /// Never fails: an unrecognized key logs a warning and resolves to the
    /// default group.
    pub fn resolve(&self, key: &str) -> ResolvedBaseline<'_> {
        if let Some(baseline) = self.get(key) {
            return ResolvedBaseline {
                baseline,
                used_fallback: false,
            };
        }

        warn!(
            "Unknown level '{}', falling back to '{}' baselines",
            key, self.default_level
        );
        ResolvedBaseline {
            baseline: &self.groups[&self.default_level],
            used_fallback: true,
        }
    }
}

/// Compiled defaults: youth through professional
pub fn builtin_baselines() -> Vec<PopulationBaseline> {
    let group = |level: &str,
                 bat: PercentileRange,
                 hand: PercentileRange,
                 ratio: PercentileRange,
                 cv: PercentileRange| PopulationBaseline {
        level: level.to_string(),
        bat_speed: bat,
        hand_speed: hand,
        hand_to_bat_ratio: ratio,
        timing_cv: cv,
    };

    vec![
        group(
            "youth",
            PercentileRange::new(40.0, 48.0, 56.0),
            PercentileRange::new(14.0, 17.0, 20.0),
            PercentileRange::new(2.6, 2.9, 3.2),
            PercentileRange::new(0.05, 0.12, 0.25),
        ),
        group(
            "middle_school",
            PercentileRange::new(50.0, 58.0, 66.0),
            PercentileRange::new(16.0, 19.0, 22.0),
            PercentileRange::new(2.7, 3.0, 3.3),
            PercentileRange::new(0.045, 0.11, 0.22),
        ),
        group(
            "high_school",
            PercentileRange::new(60.0, 68.0, 75.0),
            PercentileRange::new(18.0, 21.0, 24.0),
            PercentileRange::new(2.8, 3.15, 3.4),
            PercentileRange::new(0.04, 0.09, 0.18),
        ),
        group(
            "college",
            PercentileRange::new(67.0, 73.0, 79.0),
            PercentileRange::new(20.0, 23.0, 26.0),
            PercentileRange::new(2.9, 3.2, 3.5),
            PercentileRange::new(0.035, 0.08, 0.16),
        ),
        group(
            "professional",
            PercentileRange::new(70.0, 75.0, 80.0),
            PercentileRange::new(21.0, 24.0, 27.0),
            PercentileRange::new(3.0, 3.3, 3.6),
            PercentileRange::new(0.03, 0.07, 0.14),
        ),
    ]
}

static BUILTIN: Lazy<BaselineTable> = Lazy::new(|| BaselineTable {
    groups: builtin_baselines()
        .into_iter()
        .map(|b| (b.level.clone(), b))
        .collect(),
    default_level: DEFAULT_LEVEL.to_string(),
});
