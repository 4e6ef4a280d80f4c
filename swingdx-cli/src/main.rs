//! swingdx - developer front end for the swing scoring engine
//!
//! Reads JSON inputs, runs one engine component, and prints the result as
//! pretty JSON on stdout. Logs go to stderr.
//!
//! **Usage:**
//! ```bash
//! swingdx sequence swing.json
//! swingdx contact --exit-velocity 102 --launch-angle 20
//! swingdx percentile --level hs --bat-speed 70 --hand-speed 22 --timing-cv 0.08
//! swingdx synth --seed 7 pose | swingdx sequence -
//! ```

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use swingdx_common::models::MotorProfile;
use swingdx_common::EngineConfig;
use swingdx_engine::SwingEngine;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for swingdx
#[derive(Parser, Debug)]
#[command(name = "swingdx")]
#[command(about = "Score and diagnose baseball swings from JSON data")]
#[command(version)]
struct Args {
    /// Engine configuration file (TOML); otherwise SWINGDX_CONFIG or the
    /// platform config dir is tried
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Kinematic sequence diagnosis from a pose sequence
    Sequence {
        /// Pose sequence JSON (`-` for stdin)
        input: PathBuf,
        /// Give the swing a fresh id if it has none
        #[arg(long)]
        assign_id: bool,
    },

    /// Contact quality of one batted ball
    Contact {
        /// Exit velocity, mph
        #[arg(long, allow_hyphen_values = true)]
        exit_velocity: f64,
        /// Launch angle, degrees
        #[arg(long, allow_hyphen_values = true)]
        launch_angle: f64,
    },

    /// Session statistics over a list of batted balls
    Session {
        /// Batted-ball events JSON array (`-` for stdin)
        input: PathBuf,
        /// Also print every scored event
        #[arg(long)]
        events: bool,
    },

    /// Percentile report against population baselines
    Percentile {
        /// Age or skill level (e.g. high_school, hs, college, pro)
        #[arg(long, default_value = "high_school")]
        level: String,
        #[arg(long)]
        bat_speed: f64,
        #[arg(long)]
        hand_speed: f64,
        /// Defaults to bat speed / hand speed
        #[arg(long)]
        ratio: Option<f64>,
        #[arg(long)]
        timing_cv: f64,
    },

    /// Kinetic fingerprint over a list of swing samples
    Fingerprint {
        /// Swing samples JSON array (`-` for stdin)
        input: PathBuf,
        /// Only swings recorded at or after this time (RFC 3339)
        #[arg(long)]
        from: Option<chrono::DateTime<chrono::Utc>>,
        /// Only swings recorded before this time (RFC 3339)
        #[arg(long)]
        to: Option<chrono::DateTime<chrono::Utc>>,
    },

    /// Compare fingerprints of two swing sets
    Compare {
        /// Earlier swing samples JSON array
        earlier: PathBuf,
        /// Later swing samples JSON array
        later: PathBuf,
    },

    /// Ball flight prediction from a biomechanics snapshot
    Flight {
        /// Biomechanics JSON object (`-` for stdin)
        input: PathBuf,
        /// Override the snapshot's motor profile (spinner, whipper, slingshotter, titan)
        #[arg(long)]
        motor_profile: Option<MotorProfile>,
    },

    /// Generate seeded synthetic input data
    Synth {
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Number of records for list outputs
        #[arg(long, default_value = "20")]
        count: usize,
        #[arg(value_enum)]
        kind: SynthKind,
    },

    /// List validated configuration parameters
    Params,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SynthKind {
    /// One ideal pose sequence
    Pose,
    /// One pose sequence with a shuffled firing order
    ShuffledPose,
    BattedBalls,
    Swings,
    Biomechanics,
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = EngineConfig::resolve(args.config.as_deref())
        .context("Failed to load engine configuration")?;

    init_tracing(&config.logging.level);
    debug!("Configuration: {:?}", config);

    let engine = SwingEngine::new(&config).context("Failed to initialize swing engine")?;

    match args.command {
        Command::Sequence { input, assign_id } => commands::sequence(&engine, &input, assign_id),
        Command::Contact {
            exit_velocity,
            launch_angle,
        } => commands::contact(&engine, exit_velocity, launch_angle),
        Command::Session { input, events } => commands::session(&engine, &input, events),
        Command::Percentile {
            level,
            bat_speed,
            hand_speed,
            ratio,
            timing_cv,
        } => commands::percentile(&engine, &level, bat_speed, hand_speed, ratio, timing_cv),
        Command::Fingerprint { input, from, to } => commands::fingerprint(&engine, &input, from, to),
        Command::Compare { earlier, later } => commands::compare(&engine, &earlier, &later),
        Command::Flight {
            input,
            motor_profile,
        } => commands::flight(&engine, &input, motor_profile),
        Command::Synth { seed, count, kind } => commands::synth(seed, count, kind),
        Command::Params => commands::params(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_motor_profile_parses() {
        let args = Args::try_parse_from([
            "swingdx",
            "flight",
            "snapshot.json",
            "--motor-profile",
            "Titan",
        ])
        .unwrap();
        match args.command {
            Command::Flight { motor_profile, .. } => {
                assert_eq!(motor_profile, Some(MotorProfile::Titan))
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_motor_profile_rejected() {
        let result = Args::try_parse_from([
            "swingdx",
            "flight",
            "snapshot.json",
            "--motor-profile",
            "slugger",
        ]);
        assert!(result.is_err());
    }
}
