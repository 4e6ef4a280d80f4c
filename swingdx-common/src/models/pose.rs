//! Pose frames, joints, and body segments
//!
//! Joint coordinates arrive from an external pose pipeline in image space
//! (pixels); timestamps are milliseconds from the start of the capture.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Named joints tracked per frame
///
/// Ordered so that `BTreeMap<Joint, _>` iterates deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    /// Tracked bat tip; optional in every frame
    BatEnd,
}

impl Joint {
    /// All joints, in declaration order
    pub fn all() -> &'static [Joint] {
        &[
            Joint::LeftHip,
            Joint::RightHip,
            Joint::LeftKnee,
            Joint::RightKnee,
            Joint::LeftAnkle,
            Joint::RightAnkle,
            Joint::LeftShoulder,
            Joint::RightShoulder,
            Joint::LeftElbow,
            Joint::RightElbow,
            Joint::LeftWrist,
            Joint::RightWrist,
            Joint::BatEnd,
        ]
    }
}

/// 2D joint position with optional detector confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPosition {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl JointPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, confidence: None }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &JointPosition) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between two positions (confidence is dropped)
    pub fn midpoint(&self, other: &JointPosition) -> JointPosition {
        JointPosition::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// One captured frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePose {
    /// Milliseconds since capture start
    pub timestamp_ms: f64,
    pub joints: BTreeMap<Joint, JointPosition>,
}

impl FramePose {
    pub fn new(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            joints: BTreeMap::new(),
        }
    }

    /// Builder-style joint insertion
    pub fn with_joint(mut self, joint: Joint, position: JointPosition) -> Self {
        self.joints.insert(joint, position);
        self
    }

    pub fn joint(&self, joint: Joint) -> Option<&JointPosition> {
        self.joints.get(&joint)
    }
}

/// Batter handedness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    #[default]
    Right,
    Left,
}

/// Which side of the body a joint pair belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Back side (away from the pitcher)
    Rear,
    /// Front side (toward the pitcher)
    Lead,
}

impl Handedness {
    /// Resolve a rear/lead joint for this batter.
    ///
    /// A right-handed batter's rear side is the right side of the body.
    pub fn knee(&self, side: Side) -> Joint {
        self.pick(side, Joint::RightKnee, Joint::LeftKnee)
    }

    pub fn ankle(&self, side: Side) -> Joint {
        self.pick(side, Joint::RightAnkle, Joint::LeftAnkle)
    }

    pub fn elbow(&self, side: Side) -> Joint {
        self.pick(side, Joint::RightElbow, Joint::LeftElbow)
    }

    pub fn wrist(&self, side: Side) -> Joint {
        self.pick(side, Joint::RightWrist, Joint::LeftWrist)
    }

    fn pick(&self, side: Side, right: Joint, left: Joint) -> Joint {
        match (self, side) {
            (Handedness::Right, Side::Rear) | (Handedness::Left, Side::Lead) => right,
            (Handedness::Right, Side::Lead) | (Handedness::Left, Side::Rear) => left,
        }
    }
}

/// Optional named frame indices within a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMarkers {
    #[serde(default)]
    pub load: Option<usize>,
    #[serde(default)]
    pub contact: Option<usize>,
    #[serde(default)]
    pub finish: Option<usize>,
}

/// Ordered, time-stamped frames for one swing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingPoseSequence {
    #[serde(default)]
    pub swing_id: Option<Uuid>,
    #[serde(default)]
    pub handedness: Handedness,
    pub frames: Vec<FramePose>,
    #[serde(default)]
    pub markers: FrameMarkers,
}

impl SwingPoseSequence {
    pub fn new(handedness: Handedness, frames: Vec<FramePose>) -> Self {
        Self {
            swing_id: None,
            handedness,
            frames,
            markers: FrameMarkers::default(),
        }
    }
}

/// The six body segments of the kinematic chain
///
/// Declaration order is the ideal firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySegment {
    RearLeg,
    LeadLeg,
    Torso,
    BottomArm,
    TopArm,
    Bat,
}

impl BodySegment {
    /// Ideal proximal-to-distal firing order
    pub const IDEAL_ORDER: [BodySegment; 6] = [
        BodySegment::RearLeg,
        BodySegment::LeadLeg,
        BodySegment::Torso,
        BodySegment::BottomArm,
        BodySegment::TopArm,
        BodySegment::Bat,
    ];

    /// Zero-based position of this segment in the ideal order
    pub fn ideal_position(&self) -> usize {
        match self {
            BodySegment::RearLeg => 0,
            BodySegment::LeadLeg => 1,
            BodySegment::Torso => 2,
            BodySegment::BottomArm => 3,
            BodySegment::TopArm => 4,
            BodySegment::Bat => 5,
        }
    }

    /// Human-readable name used in summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            BodySegment::RearLeg => "rear leg",
            BodySegment::LeadLeg => "lead leg",
            BodySegment::Torso => "torso",
            BodySegment::BottomArm => "bottom arm",
            BodySegment::TopArm => "top arm",
            BodySegment::Bat => "bat",
        }
    }
}

impl std::fmt::Display for BodySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
