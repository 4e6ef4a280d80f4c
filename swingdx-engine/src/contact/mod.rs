//! Batted-ball contact quality
//!
//! Zone thresholds follow the public StatCast definitions:
//!
//! | Flag       | Rule                                               |
//! |------------|----------------------------------------------------|
//! | Hard hit   | exit velocity ≥ 95 mph                             |
//! | Sweet spot | 8° ≤ launch angle ≤ 32°                            |
//! | Barrel     | exit velocity ≥ 98 mph and launch angle in window  |
//!
//! The barrel window is `[26°, 30°]` at 98 mph. Each mph above 98 lowers
//! the floor by 2° and raises the ceiling by 3°, saturating at `[8°, 50°]`
//! from 116 mph.

mod session;

pub use session::ContactQualitySessionStats;

use serde::{Deserialize, Serialize};
use swingdx_common::models::BattedBallEvent;

pub const HARD_HIT_MPH: f64 = 95.0;
pub const BARREL_MIN_MPH: f64 = 98.0;
pub const BARREL_SATURATION_MPH: f64 = 116.0;
pub const SWEET_SPOT_MIN_DEG: f64 = 8.0;
pub const SWEET_SPOT_MAX_DEG: f64 = 32.0;

const BASE_SCORE_MAX: f64 = 70.0;
const BASE_SCORE_MIN_MPH: f64 = 60.0;
const BASE_SCORE_MAX_MPH: f64 = 115.0;
const OPTIMAL_LA_LOW: f64 = 18.0;
const OPTIMAL_LA_HIGH: f64 = 22.0;
const HARD_HIT_BONUS: f64 = 10.0;
const SWEET_SPOT_BONUS: f64 = 10.0;
const BARREL_BONUS: f64 = 15.0;

/// Batted-ball trajectory category by launch angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattedBallType {
    /// Below 10°
    #[serde(rename = "GB")]
    GroundBall,
    /// 10° to 25°
    #[serde(rename = "LD")]
    LineDrive,
    /// 25° to 50°
    #[serde(rename = "FB")]
    FlyBall,
    /// 50° and above
    #[serde(rename = "PU")]
    PopUp,
}

impl BattedBallType {
    pub fn from_launch_angle(launch_angle: f64) -> Self {
        if launch_angle < 10.0 {
            BattedBallType::GroundBall
        } else if launch_angle < 25.0 {
            BattedBallType::LineDrive
        } else if launch_angle < 50.0 {
            BattedBallType::FlyBall
        } else {
            BattedBallType::PopUp
        }
    }

    /// Two-letter scoring abbreviation
    pub fn code(&self) -> &'static str {
        match self {
            BattedBallType::GroundBall => "GB",
            BattedBallType::LineDrive => "LD",
            BattedBallType::FlyBall => "FB",
            BattedBallType::PopUp => "PU",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BattedBallType::GroundBall => "Ground Ball",
            BattedBallType::LineDrive => "Line Drive",
            BattedBallType::FlyBall => "Fly Ball",
            BattedBallType::PopUp => "Pop Up",
        }
    }

    pub fn all() -> [BattedBallType; 4] {
        [
            BattedBallType::GroundBall,
            BattedBallType::LineDrive,
            BattedBallType::FlyBall,
            BattedBallType::PopUp,
        ]
    }
}

impl std::fmt::Display for BattedBallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additive parts of the contact score
///
/// `total` is the clamped, rounded sum of the other fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactScoreBreakdown {
    pub base_score: f64,
    pub launch_angle_bonus: f64,
    pub hard_hit_bonus: f64,
    pub sweet_spot_bonus: f64,
    pub barrel_bonus: f64,
    pub total: u8,
}

/// A batted ball with its zone flags and score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredBattedBallEvent {
    #[serde(flatten)]
    pub event: BattedBallEvent,
    pub is_hard_hit: bool,
    pub is_sweet_spot: bool,
    pub is_barrel: bool,
    /// None when there was no valid contact
    pub batted_ball_type: Option<BattedBallType>,
    pub contact_score: u8,
    pub breakdown: ContactScoreBreakdown,
}

impl ScoredBattedBallEvent {
    pub fn has_contact(&self) -> bool {
        self.event.has_contact()
    }
}

pub fn is_hard_hit(exit_velocity: f64) -> bool {
    exit_velocity >= HARD_HIT_MPH
}

pub fn is_sweet_spot(launch_angle: f64) -> bool {
    (SWEET_SPOT_MIN_DEG..=SWEET_SPOT_MAX_DEG).contains(&launch_angle)
}

/// Launch-angle window `(low, high)` for a barrel at this exit velocity
///
/// Returns `None` below 98 mph.
pub fn barrel_window(exit_velocity: f64) -> Option<(f64, f64)> {
    if !(exit_velocity >= BARREL_MIN_MPH) {
        return None;
    }
    let over = exit_velocity - BARREL_MIN_MPH;
    let low = (26.0 - 2.0 * over).max(8.0);
    let high = (30.0 + 3.0 * over).min(50.0);
    Some((low, high))
}

pub fn is_barrel(exit_velocity: f64, launch_angle: f64) -> bool {
    match barrel_window(exit_velocity) {
        Some((low, high)) => (low..=high).contains(&launch_angle),
        None => false,
    }
}

/// Linear 0–70 map of exit velocity over 60–115 mph
fn base_score(exit_velocity: f64) -> f64 {
    let span = BASE_SCORE_MAX_MPH - BASE_SCORE_MIN_MPH;
    (BASE_SCORE_MAX * (exit_velocity - BASE_SCORE_MIN_MPH) / span).clamp(0.0, BASE_SCORE_MAX)
}

/// Tiered bonus by distance from the 18–22° optimum
///
/// | Distance | Bonus |
/// |----------|-------|
/// | 0        | +15   |
/// | ≤ 5°     | +10   |
/// | ≤ 10°    | +5    |
/// | ≤ 15°    | 0     |
/// | ≤ 25°    | −8    |
/// | beyond   | −15   |
pub fn launch_angle_bonus(launch_angle: f64) -> f64 {
    let distance = if launch_angle < OPTIMAL_LA_LOW {
        OPTIMAL_LA_LOW - launch_angle
    } else if launch_angle > OPTIMAL_LA_HIGH {
        launch_angle - OPTIMAL_LA_HIGH
    } else {
        0.0
    };

    match distance {
        d if d <= 0.0 => 15.0,
        d if d <= 5.0 => 10.0,
        d if d <= 10.0 => 5.0,
        d if d <= 15.0 => 0.0,
        d if d <= 25.0 => -8.0,
        _ => -15.0,
    }
}

/// Contact score breakdown for one (exit velocity, launch angle) pair
///
/// Non-contact input (exit velocity ≤ 0 or either value non-finite)
/// yields an all-zero breakdown.
pub fn calculate_contact_score(exit_velocity: f64, launch_angle: f64) -> ContactScoreBreakdown {
    let event = BattedBallEvent::new(exit_velocity, launch_angle);
    if !event.has_contact() {
        return ContactScoreBreakdown::default();
    }

    let barrel = is_barrel(exit_velocity, launch_angle);
    let base_score = base_score(exit_velocity);
    let launch_angle_bonus = launch_angle_bonus(launch_angle);
    let hard_hit_bonus = if is_hard_hit(exit_velocity) { HARD_HIT_BONUS } else { 0.0 };
    // A barrel already rewards the launch window
    let sweet_spot_bonus = if is_sweet_spot(launch_angle) && !barrel {
        SWEET_SPOT_BONUS
    } else {
        0.0
    };
    let barrel_bonus = if barrel { BARREL_BONUS } else { 0.0 };

    let sum = base_score + launch_angle_bonus + hard_hit_bonus + sweet_spot_bonus + barrel_bonus;

    ContactScoreBreakdown {
        base_score,
        launch_angle_bonus,
        hard_hit_bonus,
        sweet_spot_bonus,
        barrel_bonus,
        total: sum.clamp(0.0, 100.0).round() as u8,
    }
}

/// Classify and score one batted ball
pub fn score_batted_ball(event: &BattedBallEvent) -> ScoredBattedBallEvent {
    let breakdown = calculate_contact_score(event.exit_velocity, event.launch_angle);

    if !event.has_contact() {
        return ScoredBattedBallEvent {
            event: *event,
            is_hard_hit: false,
            is_sweet_spot: false,
            is_barrel: false,
            batted_ball_type: None,
            contact_score: 0,
            breakdown,
        };
    }

    ScoredBattedBallEvent {
        event: *event,
        is_hard_hit: is_hard_hit(event.exit_velocity),
        is_sweet_spot: is_sweet_spot(event.launch_angle),
        is_barrel: is_barrel(event.exit_velocity, event.launch_angle),
        batted_ball_type: Some(BattedBallType::from_launch_angle(event.launch_angle)),
        contact_score: breakdown.total,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barrel_window_endpoints() {
        assert_eq!(barrel_window(98.0), Some((26.0, 30.0)));
        assert_eq!(barrel_window(116.0), Some((8.0, 50.0)));
        assert_eq!(barrel_window(125.0), Some((8.0, 50.0)));
        assert_eq!(barrel_window(97.9), None);
        assert_eq!(barrel_window(f64::NAN), None);
    }

    #[test]
    fn test_barrel_window_widens() {
        let (low, high) = barrel_window(102.0).unwrap();
        assert_eq!(low, 18.0);
        assert_eq!(high, 42.0);
    }

    #[test]
    fn test_102_mph_at_20_degrees_is_barrel() {
        let (low, high) = barrel_window(102.0).unwrap();
        assert!(low <= 20.0 && 20.0 <= high);
        assert!(is_barrel(102.0, 20.0));
    }

    #[test]
    fn test_barrel_requires_98() {
        assert!(!is_barrel(97.0, 28.0));
        assert!(is_barrel(98.0, 28.0));
        assert!(!is_barrel(98.0, 31.0));
    }

    #[test]
    fn test_batted_ball_types() {
        assert_eq!(BattedBallType::from_launch_angle(-5.0), BattedBallType::GroundBall);
        assert_eq!(BattedBallType::from_launch_angle(10.0), BattedBallType::LineDrive);
        assert_eq!(BattedBallType::from_launch_angle(25.0), BattedBallType::FlyBall);
        assert_eq!(BattedBallType::from_launch_angle(50.0), BattedBallType::PopUp);
    }

    #[test]
    fn test_launch_angle_tiers() {
        assert_eq!(launch_angle_bonus(20.0), 15.0);
        assert_eq!(launch_angle_bonus(13.0), 10.0);
        assert_eq!(launch_angle_bonus(32.0), 5.0);
        assert_eq!(launch_angle_bonus(5.0), 0.0);
        assert_eq!(launch_angle_bonus(-5.0), -8.0);
        assert_eq!(launch_angle_bonus(60.0), -15.0);
    }

    #[test]
    fn test_barrel_scenario() {
        let scored = score_batted_ball(&BattedBallEvent::new(102.0, 20.0));
        assert!(scored.is_hard_hit);
        assert!(scored.is_sweet_spot);
        assert!(scored.is_barrel);
        assert_eq!(scored.breakdown.sweet_spot_bonus, 0.0);
        assert_eq!(scored.breakdown.barrel_bonus, 15.0);
        assert!(scored.contact_score >= 85);
    }

    #[test]
    fn test_weak_grounder_scenario() {
        let scored = score_batted_ball(&BattedBallEvent::new(70.0, 5.0));
        assert!(!scored.is_hard_hit);
        assert!(!scored.is_sweet_spot);
        assert_eq!(scored.batted_ball_type, Some(BattedBallType::GroundBall));
        assert!(scored.contact_score < 40);
    }

    #[test]
    fn test_no_contact_is_all_zero() {
        for ev in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let scored = score_batted_ball(&BattedBallEvent::new(ev, 20.0));
            assert_eq!(scored.contact_score, 0);
            assert_eq!(scored.breakdown, ContactScoreBreakdown::default());
            assert_eq!(scored.batted_ball_type, None);
            assert!(!scored.is_barrel);
        }
    }

    #[test]
    fn test_nan_launch_angle_is_no_contact() {
        let scored = score_batted_ball(&BattedBallEvent::new(100.0, f64::NAN));
        assert_eq!(scored.contact_score, 0);
        assert!(!scored.is_hard_hit);
    }

    #[test]
    fn test_score_capped_at_100() {
        let b = calculate_contact_score(120.0, 20.0);
        assert_eq!(b.total, 100);
    }

    #[test]
    fn test_json_uses_type_codes() {
        let scored = score_batted_ball(&BattedBallEvent::new(95.0, 15.0));
        let json = serde_json::to_value(scored).unwrap();
        assert_eq!(json["battedBallType"], "LD");
        assert_eq!(json["exitVelocity"], 95.0);
        assert_eq!(json["isHardHit"], true);
    }
}
