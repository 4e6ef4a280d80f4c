//! Input data model
//!
//! JSON-shaped records supplied by collaborators (pose pipeline, sensor
//! sync, UI). All types are plain values: cloned freely, never mutated by
//! the scoring engine.

pub mod batted_ball;
pub mod biomechanics;
pub mod pose;
pub mod swing;

pub use batted_ball::BattedBallEvent;
pub use biomechanics::{BiomechanicsInput, MotorProfile};
pub use pose::{
    BodySegment, FrameMarkers, FramePose, Handedness, Joint, JointPosition, Side,
    SwingPoseSequence,
};
pub use swing::{ImpactLocation, SwingMetrics, SwingSample};
