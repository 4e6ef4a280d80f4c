//! Kinetic fingerprint aggregation
//!
//! Summarizes a window of swings into a pattern descriptor: where the bat
//! is aimed (attack direction, horizontal), how steep it travels (attack
//! angle, vertical), how fast the swing unfolds (time to contact), and how
//! repeatable all of that is.
//!
//! Fingerprints are always recomputed from the full window; there is no
//! incremental update.

mod profile;

pub use profile::classify_motor_profile;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swingdx_common::models::{MotorProfile, SwingSample};
use swingdx_common::stats::{coefficient_of_variation, mean, percentile_index_lookup, population_std_dev};
use tracing::debug;

/// Mean time to contact below this is quick (ms)
pub const QUICK_TEMPO_MS: f64 = 350.0;
/// Mean time to contact above this is deliberate (ms)
pub const DELIBERATE_TEMPO_MS: f64 = 450.0;

const DEPTH_WINDOW_START_MS: f64 = 250.0;
const DEPTH_WINDOW_END_MS: f64 = 550.0;
const TIGHTNESS_PENALTY: f64 = 2.0;
/// Mean impact depth (inches) beyond which contact is out front or deep
const ZONE_BIAS_INCHES: f64 = 3.0;
const IMPROVEMENT_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoCategory {
    Quick,
    #[default]
    Moderate,
    Deliberate,
}

impl TempoCategory {
    pub fn from_mean_ms(mean_ms: f64) -> Self {
        if mean_ms < QUICK_TEMPO_MS {
            TempoCategory::Quick
        } else if mean_ms > DELIBERATE_TEMPO_MS {
            TempoCategory::Deliberate
        } else {
            TempoCategory::Moderate
        }
    }
}

/// Where the batter tends to meet the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneBias {
    OutFront,
    Neutral,
    Deep,
    /// No impact locations reported
    #[default]
    Unknown,
}

impl ZoneBias {
    pub fn from_mean_depth(depth_inches: f64) -> Self {
        if depth_inches > ZONE_BIAS_INCHES {
            ZoneBias::OutFront
        } else if depth_inches < -ZONE_BIAS_INCHES {
            ZoneBias::Deep
        } else {
            ZoneBias::Neutral
        }
    }
}

/// 10th–90th percentile band of direction and angle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComfortZone {
    pub horizontal_min: f64,
    pub horizontal_max: f64,
    pub vertical_min: f64,
    pub vertical_max: f64,
}

/// Statistical swing-pattern descriptor over a window of swings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KineticFingerprintData {
    pub swing_count: usize,
    /// Attack direction, degrees
    pub horizontal_mean: f64,
    pub horizontal_std_dev: f64,
    /// Attack angle, degrees
    pub vertical_mean: f64,
    pub vertical_std_dev: f64,
    pub timing_mean_ms: f64,
    pub timing_cv: f64,
    pub tempo: TempoCategory,
    /// 0 at 250 ms mean time to contact, 100 at 550 ms
    pub depth_index: f64,
    /// 0–100, higher is more repeatable
    pub tightness: f64,
    /// Percent of swings aimed to the pull side
    pub pull_bias: f64,
    pub comfort_zone: ComfortZone,
    pub zone_bias: ZoneBias,
    pub motor_profile: MotorProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_end: Option<DateTime<Utc>>,
}

impl KineticFingerprintData {
    /// Neutral fingerprint for an empty window
    pub fn empty() -> Self {
        Self {
            swing_count: 0,
            horizontal_mean: 0.0,
            horizontal_std_dev: 0.0,
            vertical_mean: 0.0,
            vertical_std_dev: 0.0,
            timing_mean_ms: 0.0,
            timing_cv: 0.0,
            tempo: TempoCategory::Moderate,
            depth_index: 0.0,
            tightness: 0.0,
            pull_bias: 0.0,
            comfort_zone: ComfortZone::default(),
            zone_bias: ZoneBias::Unknown,
            motor_profile: MotorProfile::Unknown,
            window_start: None,
            window_end: None,
        }
    }

    /// `100 × (1 − timing CV)`, clamped to 0–100
    pub fn timing_consistency(&self) -> f64 {
        (100.0 * (1.0 - self.timing_cv)).clamp(0.0, 100.0)
    }
}

/// Change between two fingerprints (later minus earlier)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintComparison {
    pub tightness_delta: f64,
    pub timing_consistency_delta: f64,
    pub improved: bool,
}

fn is_usable(sample: &SwingSample) -> bool {
    sample.attack_angle.is_finite()
        && sample.attack_direction.is_finite()
        && sample.time_to_contact_ms.is_finite()
}

/// Aggregate a window of swings into a fingerprint
///
/// Samples with a non-finite angle, direction or timing are skipped.
/// An empty (or fully unusable) window returns `KineticFingerprintData::empty()`.
pub fn build_fingerprint(samples: &[SwingSample]) -> KineticFingerprintData {
    let usable: Vec<&SwingSample> = samples.iter().filter(|s| is_usable(s)).collect();
    if usable.len() < samples.len() {
        debug!(
            "Skipped {} swing samples with non-finite values",
            samples.len() - usable.len()
        );
    }
    if usable.is_empty() {
        return KineticFingerprintData::empty();
    }

    let horizontal: Vec<f64> = usable.iter().map(|s| s.attack_direction).collect();
    let vertical: Vec<f64> = usable.iter().map(|s| s.attack_angle).collect();
    let timing: Vec<f64> = usable.iter().map(|s| s.time_to_contact_ms).collect();

    let horizontal_std_dev = population_std_dev(&horizontal);
    let vertical_std_dev = population_std_dev(&vertical);
    let timing_mean_ms = mean(&timing);

    let depth_index = (100.0 * (timing_mean_ms - DEPTH_WINDOW_START_MS)
        / (DEPTH_WINDOW_END_MS - DEPTH_WINDOW_START_MS))
        .clamp(0.0, 100.0);
    let tightness =
        (100.0 - TIGHTNESS_PENALTY * (horizontal_std_dev + vertical_std_dev)).clamp(0.0, 100.0);

    let pulled = horizontal.iter().filter(|&&d| d < 0.0).count();
    let pull_bias = 100.0 * pulled as f64 / usable.len() as f64;

    let depths: Vec<f64> = usable
        .iter()
        .filter_map(|s| s.impact_location.map(|loc| loc.depth))
        .filter(|d| d.is_finite())
        .collect();
    let zone_bias = if depths.is_empty() {
        ZoneBias::Unknown
    } else {
        ZoneBias::from_mean_depth(mean(&depths))
    };

    let window_start = usable.iter().filter_map(|s| s.recorded_at).min();
    let window_end = usable.iter().filter_map(|s| s.recorded_at).max();

    let mut fingerprint = KineticFingerprintData {
        swing_count: usable.len(),
        horizontal_mean: mean(&horizontal),
        horizontal_std_dev,
        vertical_mean: mean(&vertical),
        vertical_std_dev,
        timing_mean_ms,
        timing_cv: coefficient_of_variation(&timing),
        tempo: TempoCategory::from_mean_ms(timing_mean_ms),
        depth_index,
        tightness,
        pull_bias,
        comfort_zone: ComfortZone {
            horizontal_min: percentile_index_lookup(&horizontal, 0.1),
            horizontal_max: percentile_index_lookup(&horizontal, 0.9),
            vertical_min: percentile_index_lookup(&vertical, 0.1),
            vertical_max: percentile_index_lookup(&vertical, 0.9),
        },
        zone_bias,
        motor_profile: MotorProfile::Unknown,
        window_start,
        window_end,
    };
    fingerprint.motor_profile = classify_motor_profile(&fingerprint);
    fingerprint
}

/// Compare an earlier fingerprint with a later one
///
/// Improvement means tightness or timing consistency rose by more than 5.
pub fn compare_fingerprints(
    earlier: &KineticFingerprintData,
    later: &KineticFingerprintData,
) -> FingerprintComparison {
    let tightness_delta = later.tightness - earlier.tightness;
    let timing_consistency_delta = later.timing_consistency() - earlier.timing_consistency();
    FingerprintComparison {
        tightness_delta,
        timing_consistency_delta,
        improved: tightness_delta > IMPROVEMENT_THRESHOLD
            || timing_consistency_delta > IMPROVEMENT_THRESHOLD,
    }
}

/// Swings recorded in `[start, end)`; undated swings are excluded
pub fn select_window(
    samples: &[SwingSample],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<SwingSample> {
    samples
        .iter()
        .filter(|s| matches!(s.recorded_at, Some(t) if t >= start && t < end))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use swingdx_common::models::ImpactLocation;

    fn sample(angle: f64, direction: f64, timing: f64) -> SwingSample {
        SwingSample::new(angle, direction, timing)
    }

    #[test]
    fn test_empty_window() {
        let fp = build_fingerprint(&[]);
        assert_eq!(fp.swing_count, 0);
        assert_eq!(fp, KineticFingerprintData::empty());
        assert_eq!(fp.motor_profile, MotorProfile::Unknown);
    }

    #[test]
    fn test_basic_statistics() {
        let samples = vec![
            sample(8.0, -4.0, 300.0),
            sample(12.0, 4.0, 300.0),
            sample(10.0, -2.0, 300.0),
            sample(10.0, 2.0, 300.0),
        ];
        let fp = build_fingerprint(&samples);

        assert_eq!(fp.swing_count, 4);
        assert_eq!(fp.horizontal_mean, 0.0);
        assert_eq!(fp.vertical_mean, 10.0);
        assert!((fp.horizontal_std_dev - 10f64.sqrt()).abs() < 1e-9);
        assert!((fp.vertical_std_dev - 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(fp.timing_cv, 0.0);
        assert_eq!(fp.tempo, TempoCategory::Quick);
        assert_eq!(fp.pull_bias, 50.0);
        assert!((fp.depth_index - 100.0 * 50.0 / 300.0).abs() < 1e-9);
        assert_eq!(fp.zone_bias, ZoneBias::Unknown);
    }

    #[test]
    fn test_tempo_boundaries() {
        assert_eq!(TempoCategory::from_mean_ms(349.9), TempoCategory::Quick);
        assert_eq!(TempoCategory::from_mean_ms(350.0), TempoCategory::Moderate);
        assert_eq!(TempoCategory::from_mean_ms(450.0), TempoCategory::Moderate);
        assert_eq!(TempoCategory::from_mean_ms(450.1), TempoCategory::Deliberate);
    }

    #[test]
    fn test_depth_and_tightness_clamped() {
        let wild = vec![sample(-40.0, -40.0, 900.0), sample(40.0, 40.0, 900.0)];
        let fp = build_fingerprint(&wild);
        assert_eq!(fp.depth_index, 100.0);
        assert_eq!(fp.tightness, 0.0);
    }

    #[test]
    fn test_comfort_zone_index_lookup() {
        let samples: Vec<_> = (0..10)
            .map(|i| sample(i as f64, (i * 2) as f64, 400.0))
            .collect();
        let fp = build_fingerprint(&samples);
        // floor(0.1 × 10) = 1, floor(0.9 × 10) = 9
        assert_eq!(fp.comfort_zone.vertical_min, 1.0);
        assert_eq!(fp.comfort_zone.vertical_max, 9.0);
        assert_eq!(fp.comfort_zone.horizontal_min, 2.0);
        assert_eq!(fp.comfort_zone.horizontal_max, 18.0);
    }

    #[test]
    fn test_zone_bias_from_impact_depth() {
        let mut s = sample(10.0, -5.0, 330.0);
        s.impact_location = Some(ImpactLocation {
            horizontal: 0.0,
            depth: 5.0,
        });
        let fp = build_fingerprint(&[s, s, s]);
        assert_eq!(fp.zone_bias, ZoneBias::OutFront);
        assert_eq!(fp.pull_bias, 100.0);
        // Quick but CV 0 → Whipper wins before Spinner
        assert_eq!(fp.motor_profile, MotorProfile::Whipper);
    }

    #[test]
    fn test_non_finite_samples_skipped() {
        let samples = vec![sample(10.0, 0.0, 400.0), sample(f64::NAN, 0.0, 400.0)];
        let fp = build_fingerprint(&samples);
        assert_eq!(fp.swing_count, 1);
        assert_eq!(fp.vertical_mean, 10.0);
    }

    #[test]
    fn test_compare_improved() {
        let earlier = KineticFingerprintData {
            swing_count: 5,
            tightness: 50.0,
            timing_cv: 0.20,
            ..KineticFingerprintData::empty()
        };
        let later = KineticFingerprintData {
            tightness: 53.0,
            timing_cv: 0.10,
            ..earlier.clone()
        };
        let cmp = compare_fingerprints(&earlier, &later);
        assert!((cmp.tightness_delta - 3.0).abs() < 1e-9);
        assert!((cmp.timing_consistency_delta - 10.0).abs() < 1e-9);
        assert!(cmp.improved);

        let flat = compare_fingerprints(&earlier, &earlier);
        assert!(!flat.improved);
    }

    #[test]
    fn test_select_window_half_open() {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let samples: Vec<SwingSample> = (0..5)
            .map(|i| {
                let mut s = sample(10.0, 0.0, 400.0);
                s.recorded_at = Some(t0 + Duration::days(i));
                s
            })
            .chain(std::iter::once(sample(0.0, 0.0, 400.0)))
            .collect();

        let window = select_window(&samples, t0 + Duration::days(1), t0 + Duration::days(3));
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].recorded_at, Some(t0 + Duration::days(1)));

        let fp = build_fingerprint(&window);
        assert_eq!(fp.window_start, Some(t0 + Duration::days(1)));
        assert_eq!(fp.window_end, Some(t0 + Duration::days(2)));
    }
}
