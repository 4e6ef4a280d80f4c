//! Segment momentum extraction
//!
//! Converts a swing's pose frames into one smoothed speed curve per body
//! segment and locates each curve's peak.
//!
//! # Segment definitions
//!
//! | Segment    | Source                                                     | Unit  |
//! |------------|------------------------------------------------------------|-------|
//! | Rear leg   | mean speed of rear knee and rear ankle                     | px/s  |
//! | Lead leg   | mean speed of lead knee and lead ankle                     | px/s  |
//! | Torso      | angular speed of shoulder midpoint about pelvis midpoint   | deg/s |
//! | Bottom arm | mean speed of lead elbow and lead wrist                    | px/s  |
//! | Top arm    | mean speed of rear elbow and rear wrist                    | px/s  |
//! | Bat        | bat-end speed, else wrist-midpoint speed × multiplier      | px/s  |
//!
//! The wrist-midpoint fallback is an approximation: the bat tip travels a
//! longer arc than the hands, so hand speed is scaled up by a configured
//! factor rather than derived from bat geometry.
//!
//! Each sample is computed from a consecutive frame pair and stamped with
//! the later frame's time. Pairs with a zero or negative time delta are
//! skipped so no NaN or infinity reaches the curves.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use swingdx_common::config::ExtractorConfig;
use swingdx_common::models::{BodySegment, FramePose, Joint, Side, SwingPoseSequence};
use swingdx_common::signal::{find_peak_index, moving_average};
use tracing::debug;

/// Smoothed speed curve and peak for one body segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMomentumData {
    pub segment: BodySegment,
    /// Smoothed speed per sample (px/s, or deg/s for the torso)
    pub velocities: Vec<f64>,
    /// Sample times, ms (same length as `velocities`)
    pub timestamps_ms: Vec<f64>,
    pub peak_index: usize,
    pub peak_time_ms: f64,
    pub peak_value: f64,
}

impl SegmentMomentumData {
    /// Zero-filled entry for a segment with no usable samples
    pub fn empty(segment: BodySegment) -> Self {
        Self {
            segment,
            velocities: Vec::new(),
            timestamps_ms: Vec::new(),
            peak_index: 0,
            peak_time_ms: 0.0,
            peak_value: 0.0,
        }
    }

    /// Entry carrying only a peak, for pre-reduced sensor data
    pub fn from_peak(segment: BodySegment, peak_time_ms: f64, peak_value: f64) -> Self {
        Self {
            segment,
            velocities: vec![peak_value],
            timestamps_ms: vec![peak_time_ms],
            peak_index: 0,
            peak_time_ms,
            peak_value,
        }
    }

    /// Smooth a raw curve and locate its peak
    ///
    /// Samples past the shorter of `raw` and `times_ms` are ignored.
    pub fn from_curve(segment: BodySegment, raw: &[f64], times_ms: &[f64], window: usize) -> Self {
        let len = raw.len().min(times_ms.len());
        if len != raw.len() || len != times_ms.len() {
            debug!(
                "{} curve has {} samples but {} timestamps, truncating to {}",
                segment,
                raw.len(),
                times_ms.len(),
                len
            );
        }
        let times_ms = &times_ms[..len];
        let velocities = moving_average(&raw[..len], window);
        match find_peak_index(&velocities) {
            Some(peak_index) => Self {
                segment,
                peak_time_ms: times_ms[peak_index],
                peak_value: velocities[peak_index],
                peak_index,
                timestamps_ms: times_ms.to_vec(),
                velocities,
            },
            None => Self::empty(segment),
        }
    }
}

/// Pose-sequence → per-segment momentum curves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumExtractor {
    smoothing_window: usize,
    bat_speed_multiplier: f64,
}

impl Default for MomentumExtractor {
    fn default() -> Self {
        Self::new(&ExtractorConfig::default())
    }
}

/// Raw, unsmoothed curves accumulated while walking frame pairs
#[derive(Default)]
struct RawCurves {
    times_ms: Vec<f64>,
    rear_leg: Vec<f64>,
    lead_leg: Vec<f64>,
    torso: Vec<f64>,
    bottom_arm: Vec<f64>,
    top_arm: Vec<f64>,
    bat: Vec<f64>,
}

impl MomentumExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            smoothing_window: config.smoothing_window,
            bat_speed_multiplier: config.bat_speed_multiplier,
        }
    }

    /// Extract the six segment curves, in ideal firing order
    ///
    /// Never fails. Fewer than two frames (or no pair with a positive time
    /// delta) yields zero-filled entries.
    pub fn extract(&self, sequence: &SwingPoseSequence) -> Vec<SegmentMomentumData> {
        let raw = self.raw_curves(sequence);

        if raw.times_ms.is_empty() {
            debug!(
                "No usable frame pairs in sequence of {} frames, returning zero-filled momentum",
                sequence.frames.len()
            );
            return BodySegment::IDEAL_ORDER
                .iter()
                .map(|&segment| SegmentMomentumData::empty(segment))
                .collect();
        }

        let curve = |segment: BodySegment, values: &[f64]| {
            SegmentMomentumData::from_curve(segment, values, &raw.times_ms, self.smoothing_window)
        };

        vec![
            curve(BodySegment::RearLeg, &raw.rear_leg),
            curve(BodySegment::LeadLeg, &raw.lead_leg),
            curve(BodySegment::Torso, &raw.torso),
            curve(BodySegment::BottomArm, &raw.bottom_arm),
            curve(BodySegment::TopArm, &raw.top_arm),
            curve(BodySegment::Bat, &raw.bat),
        ]
    }

    fn raw_curves(&self, sequence: &SwingPoseSequence) -> RawCurves {
        let hand = sequence.handedness;
        let mut raw = RawCurves::default();

        for (i, pair) in sequence.frames.windows(2).enumerate() {
            let (prev, cur) = (&pair[0], &pair[1]);
            let dt_s = (cur.timestamp_ms - prev.timestamp_ms) / 1000.0;
            if !(dt_s.is_finite() && dt_s > 0.0) {
                debug!(
                    "Skipping frame pair {}-{}: non-positive time delta ({} ms)",
                    i,
                    i + 1,
                    cur.timestamp_ms - prev.timestamp_ms
                );
                continue;
            }

            raw.times_ms.push(cur.timestamp_ms);
            raw.rear_leg.push(pair_speed(
                prev,
                cur,
                dt_s,
                [hand.knee(Side::Rear), hand.ankle(Side::Rear)],
            ));
            raw.lead_leg.push(pair_speed(
                prev,
                cur,
                dt_s,
                [hand.knee(Side::Lead), hand.ankle(Side::Lead)],
            ));
            raw.torso.push(torso_angular_speed(prev, cur, dt_s));
            raw.bottom_arm.push(pair_speed(
                prev,
                cur,
                dt_s,
                [hand.elbow(Side::Lead), hand.wrist(Side::Lead)],
            ));
            raw.top_arm.push(pair_speed(
                prev,
                cur,
                dt_s,
                [hand.elbow(Side::Rear), hand.wrist(Side::Rear)],
            ));
            raw.bat.push(self.bat_speed(prev, cur, dt_s));
        }

        raw
    }

    fn bat_speed(&self, prev: &FramePose, cur: &FramePose, dt_s: f64) -> f64 {
        if let Some(speed) = joint_speed(prev, cur, dt_s, Joint::BatEnd) {
            return speed;
        }

        let wrist_mid = |frame: &FramePose| {
            Some(frame.joint(Joint::LeftWrist)?.midpoint(frame.joint(Joint::RightWrist)?))
        };
        match (wrist_mid(prev), wrist_mid(cur)) {
            (Some(a), Some(b)) => finite_or_zero(a.distance_to(&b) / dt_s * self.bat_speed_multiplier),
            _ => 0.0,
        }
    }
}

/// Linear speed of one joint across a frame pair (px/s)
fn joint_speed(prev: &FramePose, cur: &FramePose, dt_s: f64, joint: Joint) -> Option<f64> {
    let a = prev.joint(joint)?;
    let b = cur.joint(joint)?;
    let speed = a.distance_to(b) / dt_s;
    speed.is_finite().then_some(speed)
}

/// Mean speed of the joints present in both frames; 0.0 if none are
fn pair_speed(prev: &FramePose, cur: &FramePose, dt_s: f64, joints: [Joint; 2]) -> f64 {
    let speeds: Vec<f64> = joints
        .iter()
        .filter_map(|&j| joint_speed(prev, cur, dt_s, j))
        .collect();

    if speeds.is_empty() {
        debug!("Joints {:?} missing at t={} ms, recording zero", joints, cur.timestamp_ms);
        return 0.0;
    }
    speeds.iter().sum::<f64>() / speeds.len() as f64
}

/// Angle of the shoulder midpoint around the pelvis midpoint, radians
fn trunk_angle(frame: &FramePose) -> Option<f64> {
    let pelvis = frame
        .joint(Joint::LeftHip)?
        .midpoint(frame.joint(Joint::RightHip)?);
    let shoulders = frame
        .joint(Joint::LeftShoulder)?
        .midpoint(frame.joint(Joint::RightShoulder)?);
    let angle = (shoulders.y - pelvis.y).atan2(shoulders.x - pelvis.x);
    angle.is_finite().then_some(angle)
}

/// Wrap an angle difference into [-π, π)
pub(crate) fn normalize_angle(radians: f64) -> f64 {
    (radians + PI).rem_euclid(TAU) - PI
}

/// Absolute torso angular speed across a frame pair (deg/s)
fn torso_angular_speed(prev: &FramePose, cur: &FramePose, dt_s: f64) -> f64 {
    match (trunk_angle(prev), trunk_angle(cur)) {
        (Some(a), Some(b)) => finite_or_zero(normalize_angle(b - a).to_degrees().abs() / dt_s),
        _ => 0.0,
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
