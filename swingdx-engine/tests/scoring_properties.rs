//! Invariants of the scoring functions, checked over deterministic grids

use swingdx_common::models::{BattedBallEvent, BodySegment};
use swingdx_common::{BaselineTable, PercentileRange};
use swingdx_engine::contact::{barrel_window, calculate_contact_score, is_barrel};
use swingdx_engine::percentile::calculate_percentile;
use swingdx_engine::sequence::{analyze_sequence, order_score};
use swingdx_engine::{score_batted_ball, BattedBallType, SegmentMomentumData};

/// Every ordering of the six segments
fn permutations() -> Vec<Vec<BodySegment>> {
    fn permute(current: &mut Vec<BodySegment>, k: usize, out: &mut Vec<Vec<BodySegment>>) {
        if k == current.len() {
            out.push(current.clone());
            return;
        }
        for i in k..current.len() {
            current.swap(k, i);
            permute(current, k + 1, out);
            current.swap(k, i);
        }
    }
    let mut out = Vec::new();
    permute(&mut BodySegment::IDEAL_ORDER.to_vec(), 0, &mut out);
    out
}

fn segments(order: &[BodySegment], times: &[f64]) -> Vec<SegmentMomentumData> {
    order
        .iter()
        .zip(times)
        .map(|(&s, &t)| SegmentMomentumData::from_peak(s, t, 50.0))
        .collect()
}

#[test]
fn test_order_score_100_iff_ideal() {
    let all = permutations();
    assert_eq!(all.len(), 720);
    for order in &all {
        let score = order_score(order);
        let ideal = order.as_slice() == BodySegment::IDEAL_ORDER;
        assert_eq!(score == 100.0, ideal, "order {:?} scored {}", order, score);
        assert!((0.0..=100.0).contains(&score));
    }
}

#[test]
fn test_actual_order_is_always_a_permutation() {
    let times_sets = [
        [0.0, 100.0, 200.0, 300.0, 400.0, 500.0],
        [0.0, 5.0, 200.0, 201.0, 450.0, 451.0],
        [10.0, 10.0, 10.0, 10.0, 10.0, 10.0],
        [300.0, 20.0, 150.0, 150.0, 90.0, 0.0],
    ];
    for order in permutations().iter().step_by(7) {
        for times in &times_sets {
            let analysis = analyze_sequence(&segments(order, times));
            let mut sorted = analysis.actual_order.clone();
            sorted.sort();
            assert_eq!(sorted, BodySegment::IDEAL_ORDER.to_vec());
            assert!(analysis.sequence_score <= 100);
            assert_eq!(
                analysis.sequence_match,
                !analysis.degenerate && analysis.errors.is_empty()
            );
        }
    }
}

#[test]
fn test_ideal_scenario() {
    let analysis = analyze_sequence(&segments(
        &BodySegment::IDEAL_ORDER,
        &[0.0, 100.0, 200.0, 300.0, 400.0, 500.0],
    ));
    assert!(analysis.sequence_match);
    assert_eq!(analysis.sequence_score, 100);
}

#[test]
fn test_analysis_is_deterministic() {
    let order = [
        BodySegment::LeadLeg,
        BodySegment::RearLeg,
        BodySegment::Torso,
        BodySegment::TopArm,
        BodySegment::BottomArm,
        BodySegment::Bat,
    ];
    let segs = segments(&order, &[0.0, 30.0, 90.0, 100.0, 180.0, 260.0]);
    let first = serde_json::to_string(&analyze_sequence(&segs)).unwrap();
    let second = serde_json::to_string(&analyze_sequence(&segs)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_barrel_implies_98_mph() {
    let mut ev = 80.0;
    while ev <= 125.0 {
        let mut la = -30.0;
        while la <= 80.0 {
            if is_barrel(ev, la) {
                assert!(ev >= 98.0, "barrel at {} mph", ev);
            }
            let scored = score_batted_ball(&BattedBallEvent::new(ev, la));
            assert_eq!(scored.is_barrel, is_barrel(ev, la));
            la += 0.5;
        }
        ev += 0.25;
    }
}

#[test]
fn test_barrel_window_saturates() {
    assert_eq!(barrel_window(98.0), Some((26.0, 30.0)));
    for ev in [116.0, 117.5, 130.0] {
        assert_eq!(barrel_window(ev), Some((8.0, 50.0)));
    }
}

#[test]
fn test_contact_score_monotonic_in_exit_velocity() {
    let mut la = -20.0;
    while la <= 70.0 {
        let mut previous = 0u8;
        let mut ev = 60.0;
        while ev <= 115.0 {
            let total = calculate_contact_score(ev, la).total;
            assert!(
                total >= previous,
                "score dropped at ev={} la={} ({} < {})",
                ev,
                la,
                total,
                previous
            );
            previous = total;
            ev += 0.5;
        }
        la += 1.0;
    }
}

#[test]
fn test_scoring_is_idempotent() {
    for (ev, la) in [(102.0, 20.0), (70.0, 5.0), (0.0, 10.0), (99.5, 27.0)] {
        let event = BattedBallEvent::new(ev, la);
        assert_eq!(score_batted_ball(&event), score_batted_ball(&event));
    }
}

#[test]
fn test_contact_scenarios() {
    let barrel = score_batted_ball(&BattedBallEvent::new(102.0, 20.0));
    assert!(barrel.is_hard_hit && barrel.is_sweet_spot && barrel.is_barrel);
    assert_eq!(barrel.breakdown.sweet_spot_bonus, 0.0);
    assert!(barrel.contact_score >= 85);

    let grounder = score_batted_ball(&BattedBallEvent::new(70.0, 5.0));
    assert!(!grounder.is_hard_hit && !grounder.is_sweet_spot);
    assert_eq!(grounder.batted_ball_type, Some(BattedBallType::GroundBall));
    assert_eq!(grounder.batted_ball_type.map(|t| t.code()), Some("GB"));
    assert!(grounder.contact_score < 40);
}

#[test]
fn test_percentile_p50_and_clamp_for_builtin_tables() {
    let table = BaselineTable::builtin();
    for level in table.levels() {
        let baseline = table.get(level).unwrap();
        let ranges: [&PercentileRange; 4] = [
            &baseline.bat_speed,
            &baseline.hand_speed,
            &baseline.hand_to_bat_ratio,
            &baseline.timing_cv,
        ];
        for range in ranges {
            assert_eq!(calculate_percentile(range.p50, range, false), 50.0);
            for v in [-10.0, 0.0, range.p10 * 0.5, range.p90 * 3.0, 1e9] {
                for inverted in [false, true] {
                    let p = calculate_percentile(v, range, inverted);
                    assert!((1.0..=99.0).contains(&p), "{} → {}", v, p);
                }
            }
        }
    }
}
