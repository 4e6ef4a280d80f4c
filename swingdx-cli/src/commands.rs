//! Subcommand implementations

use crate::SynthKind;
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use swingdx_common::models::{
    BattedBallEvent, BiomechanicsInput, MotorProfile, SwingMetrics, SwingPoseSequence, SwingSample,
};
use swingdx_common::EngineConfig;
use swingdx_engine::fingerprint::{compare_fingerprints, select_window};
use swingdx_engine::{ScoredBattedBallEvent, SwingEngine};
use swingdx_synth::{SwingGenerator, SwingPattern};
use tracing::{info, warn};
use uuid::Uuid;

/// Read and parse a JSON document; `-` reads stdin
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn sequence(engine: &SwingEngine, input: &Path, assign_id: bool) -> Result<()> {
    let mut sequence: SwingPoseSequence = read_json(input)?;
    if assign_id && sequence.swing_id.is_none() {
        sequence.swing_id = Some(Uuid::new_v4());
    }
    if sequence.frames.len() < 2 {
        warn!(
            "Pose sequence has {} frame(s); result will be unscored",
            sequence.frames.len()
        );
    }
    let diagnosis = engine.analyze_pose_sequence(&sequence);
    info!(
        "Sequence score {}: {} leak. {}",
        diagnosis.analysis.sequence_score,
        diagnosis.energy_leak,
        diagnosis.energy_leak.description()
    );
    print_json(&diagnosis)
}

pub fn contact(engine: &SwingEngine, exit_velocity: f64, launch_angle: f64) -> Result<()> {
    let event = BattedBallEvent::new(exit_velocity, launch_angle);
    let scored = engine.score_batted_ball(&event);
    match scored.batted_ball_type {
        Some(kind) => info!(
            "{} at {:.1} mph, contact score {}",
            kind.display_name(),
            exit_velocity,
            scored.contact_score
        ),
        None => info!("No contact recorded"),
    }
    print_json(&scored)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionOutput {
    stats: swingdx_engine::ContactQualitySessionStats,
    events: Vec<ScoredBattedBallEvent>,
}

pub fn session(engine: &SwingEngine, input: &Path, with_events: bool) -> Result<()> {
    let events: Vec<BattedBallEvent> = read_json(input)?;
    info!("Scoring {} batted balls", events.len());
    let stats = engine.score_session(&events);
    if with_events {
        let scored = events.iter().map(|e| engine.score_batted_ball(e)).collect();
        print_json(&SessionOutput {
            stats,
            events: scored,
        })
    } else {
        print_json(&stats)
    }
}

pub fn percentile(
    engine: &SwingEngine,
    level: &str,
    bat_speed: f64,
    hand_speed: f64,
    ratio: Option<f64>,
    timing_cv: f64,
) -> Result<()> {
    let metrics = SwingMetrics {
        bat_speed,
        hand_speed,
        hand_to_bat_ratio: ratio,
        timing_cv,
    };
    print_json(&engine.percentile_report(&metrics, level))
}

fn windowed(
    samples: Vec<SwingSample>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Vec<SwingSample> {
    if from.is_none() && to.is_none() {
        return samples;
    }
    let start = from.unwrap_or(DateTime::<Utc>::MIN_UTC);
    let end = to.unwrap_or(DateTime::<Utc>::MAX_UTC);
    select_window(&samples, start, end)
}

pub fn fingerprint(
    engine: &SwingEngine,
    input: &Path,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<()> {
    let samples: Vec<SwingSample> = read_json(input)?;
    let total = samples.len();
    let samples = windowed(samples, from, to);
    info!("Fingerprinting {} of {} swings", samples.len(), total);
    print_json(&engine.fingerprint(&samples))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareOutput {
    earlier: swingdx_engine::KineticFingerprintData,
    later: swingdx_engine::KineticFingerprintData,
    comparison: swingdx_engine::fingerprint::FingerprintComparison,
}

pub fn compare(engine: &SwingEngine, earlier: &Path, later: &Path) -> Result<()> {
    let earlier_samples: Vec<SwingSample> = read_json(earlier)?;
    let later_samples: Vec<SwingSample> = read_json(later)?;
    let earlier = engine.fingerprint(&earlier_samples);
    let later = engine.fingerprint(&later_samples);
    let comparison = compare_fingerprints(&earlier, &later);
    print_json(&CompareOutput {
        earlier,
        later,
        comparison,
    })
}

pub fn flight(
    engine: &SwingEngine,
    input: &Path,
    motor_profile: Option<MotorProfile>,
) -> Result<()> {
    let mut snapshot: BiomechanicsInput = read_json(input)?;
    if let Some(profile) = motor_profile {
        snapshot.motor_profile = Some(profile);
    }
    print_json(&engine.predict_ball_flight(&snapshot))
}

pub fn synth(seed: u64, count: usize, kind: SynthKind) -> Result<()> {
    let mut generator = SwingGenerator::from_seed(seed);
    match kind {
        SynthKind::Pose => print_json(&generator.ideal_pose_sequence()),
        SynthKind::ShuffledPose => {
            let (order, sequence) = generator.shuffled_pose_sequence();
            info!("Firing order: {:?}", order);
            print_json(&sequence)
        }
        SynthKind::BattedBalls => print_json(&generator.batted_balls(count)),
        SynthKind::Swings => {
            let start = Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .context("Invalid synthetic session start")?;
            let swings = generator.swing_session(
                &SwingPattern::default(),
                count,
                start,
                chrono::Duration::minutes(1),
            );
            print_json(&swings)
        }
        SynthKind::Biomechanics => print_json(&generator.biomechanics()),
    }
}

pub fn params(config: &EngineConfig) -> Result<()> {
    println!(
        "{:<34} {:<8} {:<30} {}",
        "KEY", "TYPE", "DEFAULT", "RANGE"
    );
    for meta in EngineConfig::metadata() {
        let status = match (meta.validator)(config) {
            Ok(()) => String::new(),
            Err(e) => format!("  [invalid: {}]", e),
        };
        println!(
            "{:<34} {:<8} {:<30} {}{}",
            meta.key, meta.data_type, meta.default_value, meta.validation_range, status
        );
        println!("    {}", meta.description);
    }
    Ok(())
}
