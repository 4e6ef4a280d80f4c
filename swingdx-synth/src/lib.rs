//! # SwingDx Synth
//!
//! Seeded generator for synthetic swing data. Used by tests, benches and
//! the `swingdx synth` command; never by the scoring path.
//!
//! All randomness flows through the generator's own `Rng`, so a fixed
//! seed reproduces the same data on every run.
//!
//! # Examples
//!
//! ```rust
//! use swingdx_synth::SwingGenerator;
//!
//! let mut a = SwingGenerator::from_seed(7);
//! let mut b = SwingGenerator::from_seed(7);
//! assert_eq!(a.batted_ball(), b.batted_ball());
//! ```

pub mod pose;

pub use pose::PoseSpec;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use swingdx_common::models::{
    BattedBallEvent, BiomechanicsInput, BodySegment, ImpactLocation, Joint, MotorProfile,
    SwingMetrics, SwingPoseSequence, SwingSample,
};
use swingdx_common::signal::moving_average;
use tracing::debug;
use uuid::Uuid;

/// Window used to smooth positional jitter, in frames
const JITTER_SMOOTHING_WINDOW: usize = 5;

/// Chance a generated batted ball is a swing and miss
const WHIFF_RATE: f64 = 0.1;

/// Chance each optional biomechanics field is present
const FIELD_PRESENT_RATE: f64 = 0.8;

/// Center and half-width of each swing-sample measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPattern {
    pub attack_angle: (f64, f64),
    pub attack_direction: (f64, f64),
    pub time_to_contact_ms: (f64, f64),
    /// Impact depth in inches; `None` leaves impact location unset
    pub impact_depth: Option<(f64, f64)>,
}

impl Default for SwingPattern {
    fn default() -> Self {
        Self {
            attack_angle: (10.0, 6.0),
            attack_direction: (-3.0, 10.0),
            time_to_contact_ms: (400.0, 60.0),
            impact_depth: Some((0.0, 6.0)),
        }
    }
}

impl SwingPattern {
    /// Quick, repeatable, pull-side pattern
    pub fn tight_quick() -> Self {
        Self {
            attack_angle: (8.0, 1.5),
            attack_direction: (-6.0, 2.0),
            time_to_contact_ms: (300.0, 10.0),
            impact_depth: Some((5.0, 1.0)),
        }
    }

    /// Slow, scattered pattern
    pub fn loose_slow() -> Self {
        Self {
            attack_angle: (12.0, 15.0),
            attack_direction: (0.0, 20.0),
            time_to_contact_ms: (480.0, 120.0),
            impact_depth: None,
        }
    }
}

/// Deterministic synthetic data source
#[derive(Debug, Clone)]
pub struct SwingGenerator<R: Rng> {
    rng: R,
}

impl SwingGenerator<StdRng> {
    /// Generator seeded for reproducible output
    pub fn from_seed(seed: u64) -> Self {
        debug!("Synthetic generator seeded with {}", seed);
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SwingGenerator<R> {
    /// Wrap any random source
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn around(&mut self, (center, half_width): (f64, f64)) -> f64 {
        if half_width <= 0.0 {
            return center;
        }
        self.rng.gen_range(center - half_width..=center + half_width)
    }

    fn maybe(&mut self, value: f64) -> Option<f64> {
        self.rng.gen_bool(FIELD_PRESENT_RATE).then_some(value)
    }

    /// Reproducible swing id drawn from this generator
    pub fn swing_id(&mut self) -> Uuid {
        Uuid::from_u128(self.rng.gen())
    }

    /// Smoothed noise track of `len` samples within ±`amplitude`
    fn jitter(&mut self, len: usize, amplitude: f64) -> Vec<f64> {
        if amplitude <= 0.0 {
            return vec![0.0; len];
        }
        let raw: Vec<f64> = (0..len)
            .map(|_| self.rng.gen_range(-amplitude..=amplitude))
            .collect();
        moving_average(&raw, JITTER_SMOOTHING_WINDOW)
    }

    /// Pose sequence whose segments peak at the times requested in `spec`
    ///
    /// Peak speeds vary ±10% around `pose::default_peak_speed`.
    pub fn pose_sequence(&mut self, spec: &PoseSpec) -> SwingPoseSequence {
        let peak_speeds: BTreeMap<BodySegment, f64> = BodySegment::IDEAL_ORDER
            .iter()
            .map(|&s| {
                let scale = self.rng.gen_range(0.9..=1.1);
                (s, pose::default_peak_speed(s) * scale)
            })
            .collect();

        let (times, travel) = pose::integrate(spec, &peak_speeds);

        let noise: BTreeMap<Joint, (Vec<f64>, Vec<f64>)> = Joint::all()
            .iter()
            .map(|&joint| {
                let nx = self.jitter(times.len(), spec.jitter_px);
                let ny = self.jitter(times.len(), spec.jitter_px);
                (joint, (nx, ny))
            })
            .collect();

        let mut sequence = pose::assemble(spec, &times, &travel, &noise);
        sequence.swing_id = Some(self.swing_id());
        sequence
    }

    /// Clean proximal-to-distal swing
    pub fn ideal_pose_sequence(&mut self) -> SwingPoseSequence {
        self.pose_sequence(&PoseSpec::ideal())
    }

    /// Swing with a random firing order; returns the order used
    pub fn shuffled_pose_sequence(&mut self) -> (Vec<BodySegment>, SwingPoseSequence) {
        let mut order = BodySegment::IDEAL_ORDER.to_vec();
        order.shuffle(&mut self.rng);
        let spec = PoseSpec::with_order(&order, 100.0, 40.0);
        (order, self.pose_sequence(&spec))
    }

    /// One batted ball; about one in ten is a miss (exit velocity 0)
    pub fn batted_ball(&mut self) -> BattedBallEvent {
        if self.rng.gen_bool(WHIFF_RATE) {
            return BattedBallEvent::new(0.0, 0.0);
        }
        let exit_velocity = self.rng.gen_range(55.0..=112.0);
        let launch_angle = self.rng.gen_range(-20.0..=60.0);
        let mut event = BattedBallEvent::new(exit_velocity, launch_angle);
        event.spray_angle = Some(self.rng.gen_range(-45.0..=45.0));
        event
    }

    pub fn batted_balls(&mut self, count: usize) -> Vec<BattedBallEvent> {
        (0..count).map(|_| self.batted_ball()).collect()
    }

    pub fn swing_sample(&mut self, pattern: &SwingPattern) -> SwingSample {
        let mut sample = SwingSample::new(
            self.around(pattern.attack_angle),
            self.around(pattern.attack_direction),
            self.around(pattern.time_to_contact_ms),
        );
        if let Some(depth) = pattern.impact_depth {
            sample.impact_location = Some(ImpactLocation {
                horizontal: self.rng.gen_range(-8.0..=8.0),
                depth: self.around(depth),
            });
        }
        sample
    }

    /// `count` swings, one every `spacing` starting at `start`
    pub fn swing_session(
        &mut self,
        pattern: &SwingPattern,
        count: usize,
        start: DateTime<Utc>,
        spacing: Duration,
    ) -> Vec<SwingSample> {
        let mut at = start;
        (0..count)
            .map(|_| {
                let mut sample = self.swing_sample(pattern);
                sample.recorded_at = Some(at);
                at += spacing;
                sample
            })
            .collect()
    }

    pub fn swing_metrics(&mut self) -> SwingMetrics {
        let hand_speed = self.rng.gen_range(15.0..=26.0);
        let ratio = self.rng.gen_range(2.7..=3.5);
        SwingMetrics {
            bat_speed: hand_speed * ratio,
            hand_speed,
            hand_to_bat_ratio: None,
            timing_cv: self.rng.gen_range(0.03..=0.25),
        }
    }

    /// Biomechanics snapshot; each field present about 80% of the time
    pub fn biomechanics(&mut self) -> BiomechanicsInput {
        let profiles = [
            MotorProfile::Spinner,
            MotorProfile::Whipper,
            MotorProfile::Slingshotter,
            MotorProfile::Titan,
        ];
        let kinetic_energy = self.rng.gen_range(60.0..=260.0);
        let transfer_efficiency = self.rng.gen_range(30.0..=95.0);
        let sequence_score = self.rng.gen_range(20.0..=100.0);
        let torso_rotation_rate = self.rng.gen_range(400.0..=950.0);
        let separation_angle = self.rng.gen_range(10.0..=55.0);
        let bat_speed = self.rng.gen_range(50.0..=85.0);
        let profile = profiles.choose(&mut self.rng).copied();

        BiomechanicsInput {
            kinetic_energy: self.maybe(kinetic_energy),
            transfer_efficiency: self.maybe(transfer_efficiency),
            sequence_score: self.maybe(sequence_score),
            motor_profile: profile.filter(|_| self.rng.gen_bool(FIELD_PRESENT_RATE)),
            torso_rotation_rate: self.maybe(torso_rotation_rate),
            separation_angle: self.maybe(separation_angle),
            bat_speed: self.maybe(bat_speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_same_seed_same_data() {
        let mut a = SwingGenerator::from_seed(42);
        let mut b = SwingGenerator::from_seed(42);
        assert_eq!(a.batted_balls(20), b.batted_balls(20));
        assert_eq!(a.biomechanics(), b.biomechanics());
        assert_eq!(a.ideal_pose_sequence(), b.ideal_pose_sequence());
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = SwingGenerator::from_seed(1);
        let mut b = SwingGenerator::from_seed(2);
        assert_ne!(a.batted_balls(10), b.batted_balls(10));
    }

    #[test]
    fn test_batted_ball_ranges() {
        let mut generator = SwingGenerator::from_seed(9);
        for event in generator.batted_balls(200) {
            if event.exit_velocity == 0.0 {
                continue;
            }
            assert!((55.0..=112.0).contains(&event.exit_velocity));
            assert!((-20.0..=60.0).contains(&event.launch_angle));
        }
    }

    #[test]
    fn test_swing_session_timestamps() {
        let mut generator = SwingGenerator::from_seed(3);
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
        let swings = generator.swing_session(
            &SwingPattern::default(),
            4,
            start,
            Duration::minutes(1),
        );
        assert_eq!(swings.len(), 4);
        assert_eq!(swings[0].recorded_at, Some(start));
        assert_eq!(swings[3].recorded_at, Some(start + Duration::minutes(3)));
    }

    #[test]
    fn test_pattern_bounds_respected() {
        let mut generator = SwingGenerator::from_seed(5);
        let pattern = SwingPattern::tight_quick();
        for _ in 0..100 {
            let s = generator.swing_sample(&pattern);
            assert!((6.5..=9.5).contains(&s.attack_angle));
            assert!((290.0..=310.0).contains(&s.time_to_contact_ms));
            assert!(s.impact_location.is_some());
        }
    }

    #[test]
    fn test_shuffled_sequence_reports_order() {
        let mut generator = SwingGenerator::from_seed(11);
        let (order, sequence) = generator.shuffled_pose_sequence();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, BodySegment::IDEAL_ORDER.to_vec());
        assert!(sequence.swing_id.is_some());
        assert!(sequence.frames.len() > 50);
    }

    #[test]
    fn test_swing_metrics_ratio_consistent() {
        let mut generator = SwingGenerator::from_seed(8);
        let m = generator.swing_metrics();
        let ratio = m.resolved_hand_to_bat_ratio().unwrap();
        assert!((2.7..=3.5 + 1e-9).contains(&ratio));
    }
}
