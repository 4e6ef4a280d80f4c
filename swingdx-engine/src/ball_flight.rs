//! Ball flight prediction from biomechanics
//!
//! Closed-form estimate, not a trajectory simulation:
//!
//! ```text
//! exit velocity = sqrt(2 × KE × e / m)          (m/s, reported in mph)
//! launch angle  = base + profile offset + torso term + separation term
//! ```
//!
//! `e` is the collision efficiency: the configured base, shifted by
//! transfer efficiency, clamped to the configured bounds, then raised
//! slightly for strong sequencing. The sequencing bonus is applied after
//! the clamp and may exceed the upper bound.
//!
//! Every input is optional. Missing kinetic energy yields no exit velocity
//! and no kinetic potential; other missing inputs drop their term.

use serde::{Deserialize, Serialize};
use swingdx_common::config::BallFlightConfig;
use swingdx_common::models::{BiomechanicsInput, MotorProfile};

const MPS_TO_MPH: f64 = 2.23694;

const TORSO_REFERENCE_DPS: f64 = 600.0;
const TORSO_DPS_PER_DEGREE: f64 = 100.0;
const TORSO_TERM_LIMIT: f64 = 2.0;
const SEPARATION_REFERENCE_DEG: f64 = 30.0;
const SEPARATION_GAIN: f64 = 0.1;
const SEPARATION_TERM_LIMIT: f64 = 3.0;

const KINETIC_POTENTIAL_MIN: f64 = 20.0;
const KINETIC_POTENTIAL_MAX: f64 = 80.0;

/// Kinetic-energy bands (lower bound in joules, score)
const KINETIC_BANDS: [(f64, f64); 6] = [
    (200.0, 80.0),
    (170.0, 70.0),
    (140.0, 60.0),
    (120.0, 50.0),
    (100.0, 40.0),
    (80.0, 30.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionConfidence {
    Low,
    Medium,
    High,
}

impl PredictionConfidence {
    /// By number of the seven optional inputs present
    pub fn from_present_count(present: usize) -> Self {
        if present >= 5 {
            PredictionConfidence::High
        } else if present >= 3 {
            PredictionConfidence::Medium
        } else {
            PredictionConfidence::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallFlightPrediction {
    /// mph; None without usable kinetic energy
    pub exit_velocity: Option<f64>,
    /// Degrees
    pub launch_angle: f64,
    /// 20–80 scouting scale; None without usable kinetic energy
    pub kinetic_potential: Option<u8>,
    pub collision_efficiency: f64,
    pub confidence: PredictionConfidence,
    pub inputs_present: usize,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Launch-angle offset by motor profile, degrees
pub fn profile_launch_offset(profile: MotorProfile) -> f64 {
    match profile {
        MotorProfile::Spinner => -2.0,
        MotorProfile::Whipper => 1.0,
        MotorProfile::Slingshotter => 3.0,
        MotorProfile::Titan => 2.0,
        MotorProfile::Unknown => 0.0,
    }
}

/// Predictor bound to one set of physical constants
#[derive(Debug, Clone, Default)]
pub struct BallFlightPredictor {
    config: BallFlightConfig,
}

impl BallFlightPredictor {
    pub fn new(config: BallFlightConfig) -> Self {
        Self { config }
    }

    /// Collision efficiency for a snapshot
    ///
    /// | Transfer efficiency | Adjustment |
    /// |---------------------|------------|
    /// | ≥ 85                | +0.06      |
    /// | ≥ 75                | +0.04      |
    /// | ≥ 60                | +0.02      |
    /// | < 40                | −0.04      |
    /// | < 50                | −0.02      |
    ///
    /// Clamped to `[min, max]`, then +0.02 for sequence score ≥ 90 or
    /// +0.01 for ≥ 75.
    pub fn collision_efficiency(&self, input: &BiomechanicsInput) -> f64 {
        let mut efficiency = self.config.base_collision_efficiency;

        if let Some(te) = finite(input.transfer_efficiency) {
            efficiency += if te >= 85.0 {
                0.06
            } else if te >= 75.0 {
                0.04
            } else if te >= 60.0 {
                0.02
            } else if te < 40.0 {
                -0.04
            } else if te < 50.0 {
                -0.02
            } else {
                0.0
            };
        }

        efficiency = efficiency.clamp(
            self.config.min_collision_efficiency,
            self.config.max_collision_efficiency,
        );

        if let Some(seq) = finite(input.sequence_score) {
            if seq >= 90.0 {
                efficiency += 0.02;
            } else if seq >= 75.0 {
                efficiency += 0.01;
            }
        }

        efficiency
    }

    /// Exit velocity in mph, or None without positive kinetic energy
    pub fn exit_velocity(&self, input: &BiomechanicsInput) -> Option<f64> {
        let ke = finite(input.kinetic_energy).filter(|ke| *ke > 0.0)?;
        let efficiency = self.collision_efficiency(input);
        let mps = (2.0 * ke * efficiency / self.config.ball_mass_kg).sqrt();
        Some(mps * MPS_TO_MPH)
    }

    pub fn launch_angle(&self, input: &BiomechanicsInput) -> f64 {
        let mut angle = self.config.base_launch_angle;

        if let Some(profile) = input.motor_profile {
            angle += profile_launch_offset(profile);
        }
        if let Some(rate) = finite(input.torso_rotation_rate) {
            angle += ((rate - TORSO_REFERENCE_DPS) / TORSO_DPS_PER_DEGREE)
                .clamp(-TORSO_TERM_LIMIT, TORSO_TERM_LIMIT);
        }
        if let Some(sep) = finite(input.separation_angle) {
            angle += ((sep - SEPARATION_REFERENCE_DEG) * SEPARATION_GAIN)
                .clamp(-SEPARATION_TERM_LIMIT, SEPARATION_TERM_LIMIT);
        }

        angle
    }

    /// 20–80 power grade from kinetic energy, nudged by transfer efficiency
    pub fn kinetic_potential(&self, input: &BiomechanicsInput) -> Option<u8> {
        let ke = finite(input.kinetic_energy).filter(|ke| *ke > 0.0)?;

        let mut score = KINETIC_BANDS
            .iter()
            .find(|(floor, _)| ke >= *floor)
            .map(|(_, score)| *score)
            .unwrap_or(KINETIC_POTENTIAL_MIN);

        if let Some(te) = finite(input.transfer_efficiency) {
            if te >= 80.0 {
                score += 5.0;
            } else if te < 50.0 {
                score -= 5.0;
            }
        }

        Some(score.clamp(KINETIC_POTENTIAL_MIN, KINETIC_POTENTIAL_MAX) as u8)
    }

    pub fn predict(&self, input: &BiomechanicsInput) -> BallFlightPrediction {
        let inputs_present = input.present_count();
        BallFlightPrediction {
            exit_velocity: self.exit_velocity(input),
            launch_angle: self.launch_angle(input),
            kinetic_potential: self.kinetic_potential(input),
            collision_efficiency: self.collision_efficiency(input),
            confidence: PredictionConfidence::from_present_count(inputs_present),
            inputs_present,
        }
    }
}
