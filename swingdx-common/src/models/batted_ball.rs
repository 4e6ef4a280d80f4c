//! Raw batted-ball measurements

use serde::{Deserialize, Serialize};

/// One batted ball as reported by a tracking device
///
/// Exit velocity is in mph, angles in degrees. A non-positive or
/// non-finite exit velocity means "no contact".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattedBallEvent {
    pub exit_velocity: f64,
    pub launch_angle: f64,
    /// Carry distance in feet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Horizontal spray angle in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spray_angle: Option<f64>,
}

impl BattedBallEvent {
    pub fn new(exit_velocity: f64, launch_angle: f64) -> Self {
        Self {
            exit_velocity,
            launch_angle,
            distance: None,
            spray_angle: None,
        }
    }

    /// True when the measurement represents real contact
    pub fn has_contact(&self) -> bool {
        self.exit_velocity.is_finite() && self.exit_velocity > 0.0 && self.launch_angle.is_finite()
    }
}
