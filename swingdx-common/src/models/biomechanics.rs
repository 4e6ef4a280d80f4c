//! Aggregate biomechanics snapshot and motor-profile labels

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Characteristic swing-timing and pattern signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorProfile {
    /// Rotational, pulls the ball out front
    Spinner,
    /// Fast hands, quick and consistent tempo
    Whipper,
    /// Deep contact, stays through the middle of the field
    Slingshotter,
    /// Slow, powerful, tightly repeated pattern
    Titan,
    #[default]
    Unknown,
}

impl MotorProfile {
    pub fn display_name(&self) -> &'static str {
        match self {
            MotorProfile::Spinner => "Spinner",
            MotorProfile::Whipper => "Whipper",
            MotorProfile::Slingshotter => "Slingshotter",
            MotorProfile::Titan => "Titan",
            MotorProfile::Unknown => "Unknown",
        }
    }

    /// Parse from a stored label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "spinner" => Some(MotorProfile::Spinner),
            "whipper" => Some(MotorProfile::Whipper),
            "slingshotter" => Some(MotorProfile::Slingshotter),
            "titan" => Some(MotorProfile::Titan),
            "unknown" => Some(MotorProfile::Unknown),
            _ => None,
        }
    }
}

impl FromStr for MotorProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MotorProfile::parse(s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown motor profile '{}'", s)))
    }
}

impl std::fmt::Display for MotorProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Partial biomechanics snapshot feeding the ball-flight predictor
///
/// Every field is optional. Each formula that consumes a field states
/// what happens when it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiomechanicsInput {
    /// Peak kinetic energy delivered to the bat, joules
    #[serde(default)]
    pub kinetic_energy: Option<f64>,
    /// Segment-to-segment transfer efficiency, percent (0–100)
    #[serde(default)]
    pub transfer_efficiency: Option<f64>,
    /// Kinematic sequence score, 0–100
    #[serde(default)]
    pub sequence_score: Option<f64>,
    #[serde(default)]
    pub motor_profile: Option<MotorProfile>,
    /// Peak torso rotation rate, degrees/second
    #[serde(default)]
    pub torso_rotation_rate: Option<f64>,
    /// Hip–shoulder separation at foot plant, degrees
    #[serde(default)]
    pub separation_angle: Option<f64>,
    /// Bat speed at contact, mph
    #[serde(default)]
    pub bat_speed: Option<f64>,
}

impl BiomechanicsInput {
    /// Number of optional inputs that carry a usable value (0–7)
    ///
    /// Non-finite numbers count as absent.
    pub fn present_count(&self) -> usize {
        let numeric = [
            self.kinetic_energy,
            self.transfer_efficiency,
            self.sequence_score,
            self.torso_rotation_rate,
            self.separation_angle,
            self.bat_speed,
        ];
        let numeric_present = numeric
            .iter()
            .filter(|v| matches!(v, Some(x) if x.is_finite()))
            .count();
        numeric_present + usize::from(self.motor_profile.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_count() {
        assert_eq!(BiomechanicsInput::default().present_count(), 0);

        let input = BiomechanicsInput {
            kinetic_energy: Some(150.0),
            motor_profile: Some(MotorProfile::Titan),
            separation_angle: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(input.present_count(), 2);
    }

    #[test]
    fn test_profile_parse_round_trip() {
        for profile in [
            MotorProfile::Spinner,
            MotorProfile::Whipper,
            MotorProfile::Slingshotter,
            MotorProfile::Titan,
            MotorProfile::Unknown,
        ] {
            assert_eq!(MotorProfile::parse(profile.display_name()), Some(profile));
        }
        assert_eq!(MotorProfile::parse("slugger"), None);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(" TITAN ".parse::<MotorProfile>().unwrap(), MotorProfile::Titan);
        let err = "slugger".parse::<MotorProfile>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("slugger"));
    }
}
