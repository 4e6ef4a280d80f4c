//! End-to-end runs over seeded synthetic data
//!
//! Synthetic pose sequences place each segment's speed peak at a known
//! time, so the extractor and analyzer must recover the generated order.

use chrono::{Duration, TimeZone, Utc};
use swingdx_common::models::BodySegment;
use swingdx_common::EngineConfig;
use swingdx_engine::fingerprint::{build_fingerprint, compare_fingerprints, select_window};
use swingdx_engine::{EnergyLeak, MomentumExtractor, SwingEngine};
use swingdx_synth::pose::PoseSpec;
use swingdx_synth::{SwingGenerator, SwingPattern};

#[test]
fn test_ideal_synthetic_swing_scores_perfectly() {
    let engine = SwingEngine::default();
    for seed in 0..10 {
        let mut generator = SwingGenerator::from_seed(seed);
        let sequence = generator.ideal_pose_sequence();
        let diagnosis = engine.analyze_pose_sequence(&sequence);

        assert!(diagnosis.analysis.sequence_match, "seed {}: {}", seed, diagnosis.analysis.summary);
        assert_eq!(diagnosis.energy_leak, EnergyLeak::None);
        assert!(diagnosis.analysis.sequence_score >= 90);
        assert_eq!(diagnosis.analysis.swing_id, sequence.swing_id);
    }
}

#[test]
fn test_shuffled_orders_are_recovered() {
    let extractor = MomentumExtractor::default();
    for seed in 100..130 {
        let mut generator = SwingGenerator::from_seed(seed);
        let (order, sequence) = generator.shuffled_pose_sequence();
        let segments = extractor.extract(&sequence);
        let analysis = swingdx_engine::analyze_sequence(&segments);

        assert!(!analysis.degenerate);
        assert_eq!(analysis.actual_order, order, "seed {}", seed);
    }
}

#[test]
fn test_extracted_peaks_near_requested_times() {
    let mut generator = SwingGenerator::from_seed(7);
    let spec = PoseSpec::ideal();
    let sequence = generator.pose_sequence(&spec);
    let segments = MomentumExtractor::default().extract(&sequence);

    for data in &segments {
        let requested = spec.peak_times_ms[&data.segment];
        // Within two frames at 240 fps
        assert!(
            (data.peak_time_ms - requested).abs() <= 9.0,
            "{} peaked at {} (requested {})",
            data.segment,
            data.peak_time_ms,
            requested
        );
    }
}

#[test]
fn test_torso_first_leak_detected() {
    let order = [
        BodySegment::Torso,
        BodySegment::RearLeg,
        BodySegment::LeadLeg,
        BodySegment::BottomArm,
        BodySegment::TopArm,
        BodySegment::Bat,
    ];
    let mut generator = SwingGenerator::from_seed(21);
    let sequence = generator.pose_sequence(&PoseSpec::with_order(&order, 100.0, 40.0));
    let diagnosis = SwingEngine::default().analyze_pose_sequence(&sequence);
    assert_eq!(diagnosis.energy_leak, EnergyLeak::TorsoBeforeLegs);
    assert!(!diagnosis.analysis.sequence_match);
}

#[test]
fn test_synthetic_session_aggregates() {
    let mut generator = SwingGenerator::from_seed(3);
    let events = generator.batted_balls(100);
    let stats = SwingEngine::default().score_session(&events);

    assert_eq!(stats.total_events, 100);
    assert!(stats.contact_events <= 100);
    assert!(stats.hard_hit_count <= stats.contact_events);
    let type_total: usize = stats.batted_ball_type_counts.values().sum();
    assert_eq!(type_total, stats.contact_events);
    assert!(stats.contact_score.max <= 100.0);
}

#[test]
fn test_fingerprint_windows_show_improvement() {
    let mut generator = SwingGenerator::from_seed(55);
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 17, 0, 0).unwrap();
    let mut swings = generator.swing_session(
        &SwingPattern::loose_slow(),
        40,
        start,
        Duration::minutes(5),
    );
    let later_start = start + Duration::days(30);
    swings.extend(generator.swing_session(
        &SwingPattern::tight_quick(),
        40,
        later_start,
        Duration::minutes(5),
    ));

    let earlier = build_fingerprint(&select_window(&swings, start, start + Duration::days(1)));
    let later = build_fingerprint(&select_window(
        &swings,
        later_start,
        later_start + Duration::days(1),
    ));

    assert_eq!(earlier.swing_count, 40);
    assert_eq!(later.swing_count, 40);
    assert!(later.tightness > earlier.tightness);
    assert!(compare_fingerprints(&earlier, &later).improved);
    assert!(!compare_fingerprints(&later, &earlier).improved);
}

#[test]
fn test_engine_from_config_uses_configured_level() {
    let mut config = EngineConfig::default();
    config.percentile.default_level = "college".to_string();
    let engine = SwingEngine::new(&config).unwrap();

    let mut generator = SwingGenerator::from_seed(4);
    let report = engine.percentile_report(&generator.swing_metrics(), "unheard of");
    assert!(report.used_fallback);
    assert_eq!(report.level, "college");
    assert!((1..=99).contains(&report.composite));
}

#[test]
fn test_biomechanics_predictions_never_panic() {
    let engine = SwingEngine::default();
    let mut generator = SwingGenerator::from_seed(77);
    for _ in 0..200 {
        let input = generator.biomechanics();
        let prediction = engine.predict_ball_flight(&input);
        assert_eq!(prediction.exit_velocity.is_some(), input.kinetic_energy.is_some());
        if let Some(kp) = prediction.kinetic_potential {
            assert!((20..=80).contains(&kp));
        }
        assert!(prediction.launch_angle.is_finite());
    }
}
