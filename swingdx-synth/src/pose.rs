//! Synthetic pose sequences with controlled segment peaks
//!
//! Each segment's joints are driven by a Gaussian speed bump centred on the
//! requested peak time, integrated frame by frame into positions. Linear
//! segments translate along x; the torso rotates the shoulder midpoint
//! about a fixed pelvis. Extracting momentum from the result recovers the
//! requested firing order.

use std::collections::BTreeMap;
use swingdx_common::models::{
    BodySegment, FramePose, Handedness, Joint, JointPosition, Side, SwingPoseSequence,
};

pub const DEFAULT_FRAME_RATE: f64 = 240.0;
pub const DEFAULT_PEAK_WIDTH_MS: f64 = 25.0;
pub const DEFAULT_JITTER_PX: f64 = 0.25;

/// Typical peak speed per segment (px/s; deg/s for the torso)
pub fn default_peak_speed(segment: BodySegment) -> f64 {
    match segment {
        BodySegment::RearLeg => 800.0,
        BodySegment::LeadLeg => 1000.0,
        BodySegment::Torso => 700.0,
        BodySegment::BottomArm => 1800.0,
        BodySegment::TopArm => 2000.0,
        BodySegment::Bat => 3500.0,
    }
}

/// What to generate
#[derive(Debug, Clone, PartialEq)]
pub struct PoseSpec {
    pub handedness: Handedness,
    pub frame_rate: f64,
    /// Peak time per segment, ms from capture start
    pub peak_times_ms: BTreeMap<BodySegment, f64>,
    /// Standard deviation of each speed bump, ms
    pub peak_width_ms: f64,
    /// Amplitude of smoothed positional noise, px
    pub jitter_px: f64,
    /// Track the bat tip; otherwise bat speed falls back to the wrists
    pub include_bat_end: bool,
}

impl PoseSpec {
    /// Segments peak in `order`, `spacing_ms` apart, starting at `first_peak_ms`
    pub fn with_order(order: &[BodySegment], first_peak_ms: f64, spacing_ms: f64) -> Self {
        let peak_times_ms = order
            .iter()
            .enumerate()
            .map(|(i, &segment)| (segment, first_peak_ms + spacing_ms * i as f64))
            .collect();
        Self {
            handedness: Handedness::Right,
            frame_rate: DEFAULT_FRAME_RATE,
            peak_times_ms,
            peak_width_ms: DEFAULT_PEAK_WIDTH_MS,
            jitter_px: DEFAULT_JITTER_PX,
            include_bat_end: true,
        }
    }

    /// Clean proximal-to-distal chain, peaks 40 ms apart
    pub fn ideal() -> Self {
        Self::with_order(&BodySegment::IDEAL_ORDER, 100.0, 40.0)
    }

    /// Capture length covering every bump
    pub fn duration_ms(&self) -> f64 {
        let last_peak = self.peak_times_ms.values().copied().fold(0.0, f64::max);
        last_peak + 4.0 * self.peak_width_ms
    }

    pub fn frame_count(&self) -> usize {
        (self.duration_ms() * self.frame_rate / 1000.0).ceil() as usize + 1
    }

    fn speed_at(&self, segment: BodySegment, peak_speed: f64, t_ms: f64) -> f64 {
        match self.peak_times_ms.get(&segment) {
            Some(&peak) => {
                let z = (t_ms - peak) / self.peak_width_ms;
                peak_speed * (-0.5 * z * z).exp()
            }
            None => 0.0,
        }
    }
}

const PELVIS: (f64, f64) = (300.0, 400.0);
const TRUNK_LENGTH: f64 = 120.0;
const SHOULDER_HALF_WIDTH: f64 = 40.0;

/// Resting position of every linearly driven joint (right-handed layout)
fn rest_position(joint: Joint) -> (f64, f64) {
    match joint {
        Joint::LeftHip => (310.0, 400.0),
        Joint::RightHip => (290.0, 400.0),
        Joint::LeftKnee => (320.0, 500.0),
        Joint::RightKnee => (280.0, 500.0),
        Joint::LeftAnkle => (325.0, 600.0),
        Joint::RightAnkle => (275.0, 600.0),
        Joint::LeftElbow => (340.0, 300.0),
        Joint::RightElbow => (260.0, 300.0),
        Joint::LeftWrist => (310.0, 280.0),
        Joint::RightWrist => (300.0, 280.0),
        Joint::BatEnd => (380.0, 220.0),
        // Shoulders are placed by trunk rotation
        Joint::LeftShoulder => (340.0, 280.0),
        Joint::RightShoulder => (260.0, 280.0),
    }
}

/// Joints moved by each linear segment
fn driven_joints(segment: BodySegment, hand: Handedness) -> Vec<Joint> {
    match segment {
        BodySegment::RearLeg => vec![hand.knee(Side::Rear), hand.ankle(Side::Rear)],
        BodySegment::LeadLeg => vec![hand.knee(Side::Lead), hand.ankle(Side::Lead)],
        BodySegment::BottomArm => vec![hand.elbow(Side::Lead), hand.wrist(Side::Lead)],
        BodySegment::TopArm => vec![hand.elbow(Side::Rear), hand.wrist(Side::Rear)],
        BodySegment::Bat => vec![Joint::BatEnd],
        BodySegment::Torso => Vec::new(),
    }
}

/// Integrated displacement (px) or rotation (deg) per segment at each frame
pub(crate) fn integrate(
    spec: &PoseSpec,
    peak_speeds: &BTreeMap<BodySegment, f64>,
) -> (Vec<f64>, BTreeMap<BodySegment, Vec<f64>>) {
    let n = spec.frame_count();
    let dt_ms = 1000.0 / spec.frame_rate;
    let times: Vec<f64> = (0..n).map(|i| i as f64 * dt_ms).collect();

    let mut travel = BTreeMap::new();
    for segment in BodySegment::IDEAL_ORDER {
        let peak_speed = peak_speeds.get(&segment).copied().unwrap_or(0.0);
        let mut total = 0.0;
        let mut curve = Vec::with_capacity(n);
        curve.push(0.0);
        for i in 1..n {
            let mid = (times[i - 1] + times[i]) / 2.0;
            total += spec.speed_at(segment, peak_speed, mid) * dt_ms / 1000.0;
            curve.push(total);
        }
        travel.insert(segment, curve);
    }
    (times, travel)
}

/// Build frames from integrated travel plus per-joint noise
///
/// `noise` maps each joint to (x, y) offsets per frame.
pub(crate) fn assemble(
    spec: &PoseSpec,
    times: &[f64],
    travel: &BTreeMap<BodySegment, Vec<f64>>,
    noise: &BTreeMap<Joint, (Vec<f64>, Vec<f64>)>,
) -> SwingPoseSequence {
    let hand = spec.handedness;
    let offset = |joint: Joint, i: usize| {
        noise
            .get(&joint)
            .map(|(nx, ny)| (nx[i], ny[i]))
            .unwrap_or((0.0, 0.0))
    };

    let frames = times
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let mut frame = FramePose::new(t);

            for joint in [Joint::LeftHip, Joint::RightHip] {
                let (x, y) = rest_position(joint);
                let (nx, ny) = offset(joint, i);
                frame.joints.insert(joint, JointPosition::new(x + nx, y + ny));
            }

            for segment in BodySegment::IDEAL_ORDER {
                let shift = travel[&segment][i];
                for joint in driven_joints(segment, hand) {
                    if joint == Joint::BatEnd && !spec.include_bat_end {
                        continue;
                    }
                    let (x, y) = rest_position(joint);
                    let (nx, ny) = offset(joint, i);
                    frame
                        .joints
                        .insert(joint, JointPosition::new(x + shift + nx, y + ny));
                }
            }

            // Trunk starts pointing straight up (negative y in image space)
            let theta = (-90.0 + travel[&BodySegment::Torso][i]).to_radians();
            let (cx, cy) = (
                PELVIS.0 + TRUNK_LENGTH * theta.cos(),
                PELVIS.1 + TRUNK_LENGTH * theta.sin(),
            );
            let (px, py) = (-theta.sin() * SHOULDER_HALF_WIDTH, theta.cos() * SHOULDER_HALF_WIDTH);
            frame
                .joints
                .insert(Joint::LeftShoulder, JointPosition::new(cx + px, cy + py));
            frame
                .joints
                .insert(Joint::RightShoulder, JointPosition::new(cx - px, cy - py));

            frame
        })
        .collect();

    SwingPoseSequence::new(hand, frames)
}
