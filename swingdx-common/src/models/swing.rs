//! Pre-reduced per-swing scalars

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the ball met the bat, relative to the plate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactLocation {
    /// Inches; positive = inside half of the plate
    pub horizontal: f64,
    /// Inches in front of the plate's front edge; negative = deep
    pub depth: f64,
}

/// Swing-sensor triple used by the fingerprint aggregator
///
/// Angles in degrees. `attack_direction` is handedness-normalized:
/// negative values point to the pull side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingSample {
    pub attack_angle: f64,
    pub attack_direction: f64,
    pub time_to_contact_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_location: Option<ImpactLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl SwingSample {
    pub fn new(attack_angle: f64, attack_direction: f64, time_to_contact_ms: f64) -> Self {
        Self {
            attack_angle,
            attack_direction,
            time_to_contact_ms,
            impact_location: None,
            recorded_at: None,
        }
    }
}

/// Speed and timing metrics ranked by the percentile engine
///
/// Speeds in mph. `timing_cv` is the coefficient of variation of
/// time-to-contact across a session (lower is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingMetrics {
    pub bat_speed: f64,
    pub hand_speed: f64,
    /// Derived as `bat_speed / hand_speed` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_to_bat_ratio: Option<f64>,
    pub timing_cv: f64,
}

impl SwingMetrics {
    /// Supplied ratio, or bat/hand speed when hand speed is positive
    pub fn resolved_hand_to_bat_ratio(&self) -> Option<f64> {
        self.hand_to_bat_ratio.or_else(|| {
            if self.hand_speed > 0.0 && self.bat_speed.is_finite() {
                Some(self.bat_speed / self.hand_speed)
            } else {
                None
            }
        })
    }
}
