//! Session-level contact aggregation

use super::{BattedBallType, ScoredBattedBallEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean, min and max of one measurement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl RangeSummary {
    fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            mean: sum / count as f64,
            min,
            max,
        }
    }
}

/// Counts and percentages over a session of batted balls
///
/// Percentages use every event (including no-contact swings) as the
/// denominator. Exit velocity, launch angle and score summaries use only
/// contact events.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQualitySessionStats {
    pub total_events: usize,
    pub contact_events: usize,
    pub hard_hit_count: usize,
    pub sweet_spot_count: usize,
    pub barrel_count: usize,
    pub hard_hit_pct: f64,
    pub sweet_spot_pct: f64,
    pub barrel_pct: f64,
    /// Keyed by two-letter type code
    pub batted_ball_type_counts: BTreeMap<String, usize>,
    pub batted_ball_type_pct: BTreeMap<String, f64>,
    pub exit_velocity: RangeSummary,
    pub launch_angle: RangeSummary,
    pub contact_score: RangeSummary,
}

fn pct(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

impl ContactQualitySessionStats {
    /// Aggregate a session; an empty slice gives the all-zero result
    pub fn from_events(events: &[ScoredBattedBallEvent]) -> Self {
        let total = events.len();
        if total == 0 {
            return Self::default();
        }

        let contacts: Vec<&ScoredBattedBallEvent> =
            events.iter().filter(|e| e.has_contact()).collect();

        let hard_hit_count = events.iter().filter(|e| e.is_hard_hit).count();
        let sweet_spot_count = events.iter().filter(|e| e.is_sweet_spot).count();
        let barrel_count = events.iter().filter(|e| e.is_barrel).count();

        let mut type_counts = BTreeMap::new();
        for kind in BattedBallType::all() {
            let n = events
                .iter()
                .filter(|e| e.batted_ball_type == Some(kind))
                .count();
            type_counts.insert(kind.code().to_string(), n);
        }
        let type_pct = type_counts
            .iter()
            .map(|(code, &n)| (code.clone(), pct(n, total)))
            .collect();

        Self {
            total_events: total,
            contact_events: contacts.len(),
            hard_hit_count,
            sweet_spot_count,
            barrel_count,
            hard_hit_pct: pct(hard_hit_count, total),
            sweet_spot_pct: pct(sweet_spot_count, total),
            barrel_pct: pct(barrel_count, total),
            batted_ball_type_counts: type_counts,
            batted_ball_type_pct: type_pct,
            exit_velocity: RangeSummary::from_values(contacts.iter().map(|e| e.event.exit_velocity)),
            launch_angle: RangeSummary::from_values(contacts.iter().map(|e| e.event.launch_angle)),
            contact_score: RangeSummary::from_values(
                contacts.iter().map(|e| e.contact_score as f64),
            ),
        }
    }
}
