//! # SwingDx Engine
//!
//! Pure scoring and diagnostics for baseball swings: kinematic sequencing,
//! contact quality, population percentiles, kinetic fingerprints and ball
//! flight prediction.
//!
//! Every function here is synchronous and deterministic. No I/O, no shared
//! mutable state; callers may score any number of swings concurrently.

pub mod ball_flight;
pub mod contact;
pub mod fingerprint;
pub mod momentum;
pub mod percentile;
pub mod sequence;

pub use ball_flight::{BallFlightPrediction, BallFlightPredictor, PredictionConfidence};
pub use contact::{
    score_batted_ball, BattedBallType, ContactQualitySessionStats, ContactScoreBreakdown,
    ScoredBattedBallEvent,
};
pub use fingerprint::{build_fingerprint, compare_fingerprints, KineticFingerprintData};
pub use momentum::{MomentumExtractor, SegmentMomentumData};
pub use percentile::{PercentileEngine, PercentileReport};
pub use sequence::{analyze_sequence, detect_energy_leak, EnergyLeak, SwingSequenceAnalysis};

use serde::{Deserialize, Serialize};
use swingdx_common::models::{BattedBallEvent, BiomechanicsInput, SwingMetrics, SwingPoseSequence, SwingSample};
use swingdx_common::{EngineConfig, Result};
use tracing::debug;

/// Sequence analysis plus the primary energy leak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceDiagnosis {
    #[serde(flatten)]
    pub analysis: SwingSequenceAnalysis,
    pub energy_leak: EnergyLeak,
}

/// All engine components, configured once
#[derive(Debug, Clone)]
pub struct SwingEngine {
    extractor: MomentumExtractor,
    percentile: PercentileEngine,
    ball_flight: BallFlightPredictor,
}

impl Default for SwingEngine {
    fn default() -> Self {
        Self {
            extractor: MomentumExtractor::default(),
            percentile: PercentileEngine::default(),
            ball_flight: BallFlightPredictor::default(),
        }
    }
}

impl SwingEngine {
    /// Build from configuration
    ///
    /// Fails only if the configured baseline table is invalid.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let percentile = PercentileEngine::from_config(config)?;
        debug!(
            "Swing engine ready (default level '{}')",
            percentile.table().default_level()
        );
        Ok(Self {
            extractor: MomentumExtractor::new(&config.extractor),
            percentile,
            ball_flight: BallFlightPredictor::new(config.ball_flight.clone()),
        })
    }

    /// Extract segment curves from a pose sequence and diagnose sequencing
    pub fn analyze_pose_sequence(&self, sequence: &SwingPoseSequence) -> SequenceDiagnosis {
        let segments = self.extractor.extract(sequence);
        let analysis = analyze_sequence(&segments).with_swing_id(sequence.swing_id);
        let energy_leak = detect_energy_leak(&analysis);
        SequenceDiagnosis {
            analysis,
            energy_leak,
        }
    }

    pub fn score_batted_ball(&self, event: &BattedBallEvent) -> ScoredBattedBallEvent {
        score_batted_ball(event)
    }

    /// Score every event and aggregate the session
    pub fn score_session(&self, events: &[BattedBallEvent]) -> ContactQualitySessionStats {
        let scored: Vec<ScoredBattedBallEvent> = events.iter().map(score_batted_ball).collect();
        ContactQualitySessionStats::from_events(&scored)
    }

    pub fn percentile_report(&self, metrics: &SwingMetrics, level: &str) -> PercentileReport {
        self.percentile.report(metrics, level)
    }

    pub fn fingerprint(&self, samples: &[SwingSample]) -> KineticFingerprintData {
        build_fingerprint(samples)
    }

    pub fn predict_ball_flight(&self, input: &BiomechanicsInput) -> BallFlightPrediction {
        self.ball_flight.predict(input)
    }
}
