//! Motor-profile rule cascade

use super::{KineticFingerprintData, TempoCategory, ZoneBias};
use swingdx_common::models::MotorProfile;

type ProfileRule = (fn(&KineticFingerprintData) -> bool, MotorProfile);

/// Checked in order; first match wins
static PROFILE_RULES: [ProfileRule; 4] = [
    (is_titan, MotorProfile::Titan),
    (is_whipper, MotorProfile::Whipper),
    (is_spinner, MotorProfile::Spinner),
    (is_slingshotter, MotorProfile::Slingshotter),
];

fn is_titan(fp: &KineticFingerprintData) -> bool {
    fp.tempo == TempoCategory::Deliberate && fp.tightness >= 70.0
}

fn is_whipper(fp: &KineticFingerprintData) -> bool {
    fp.tempo == TempoCategory::Quick && fp.timing_cv < 0.08
}

fn is_spinner(fp: &KineticFingerprintData) -> bool {
    fp.pull_bias >= 60.0 && fp.zone_bias == ZoneBias::OutFront
}

fn is_slingshotter(fp: &KineticFingerprintData) -> bool {
    fp.zone_bias == ZoneBias::Deep
        || (fp.tempo == TempoCategory::Moderate && fp.tightness >= 50.0 && fp.pull_bias < 40.0)
}

/// Label a fingerprint; `Unknown` when no rule matches or there are no swings
pub fn classify_motor_profile(fp: &KineticFingerprintData) -> MotorProfile {
    if fp.swing_count == 0 {
        return MotorProfile::Unknown;
    }
    PROFILE_RULES
        .iter()
        .find(|(predicate, _)| predicate(fp))
        .map(|(_, profile)| *profile)
        .unwrap_or(MotorProfile::Unknown)
}
