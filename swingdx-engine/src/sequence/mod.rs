//! Kinematic sequence analysis
//!
//! Orders the six segment peaks in time, compares that firing order with
//! the ideal proximal-to-distal chain, and scores the result:
//!
//! ```text
//! score       = round(0.7 × order_score + 0.3 × timing_score), in [0, 100]
//! order_score = 100 × (1 − inversions / (n(n−1)/2))
//! timing_score = max(0, 100 − 50 × CV(inter-peak intervals))
//! ```
//!
//! `inversions` is the number of segment pairs whose relative order is
//! flipped relative to the ideal order (Kendall tau distance). Two segments
//! that peak at the same instant count as half an inversion, and each of
//! them is reported as an error.
//!
//! Analysis never fails. Inputs that cannot be ordered (a segment missing
//! or repeated, a non-finite peak time, no motion at all, or every segment
//! peaking at once) produce a zero score with an explanatory summary.

mod leaks;
mod summary;

pub use leaks::{detect_energy_leak, EnergyLeak};

use crate::momentum::SegmentMomentumData;
use serde::{Deserialize, Serialize};
use swingdx_common::models::BodySegment;
use swingdx_common::stats::coefficient_of_variation;
use tracing::debug;
use uuid::Uuid;

/// Weight of the order component in the final score
pub const ORDER_WEIGHT: f64 = 0.7;

/// Weight of the timing component in the final score
pub const TIMING_WEIGHT: f64 = 0.3;

/// Timing penalty per unit of interval coefficient of variation
const TIMING_CV_PENALTY: f64 = 50.0;

/// Direction of a sequencing mistake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTiming {
    #[serde(rename = "fired_early")]
    Early,
    #[serde(rename = "fired_late")]
    Late,
    /// In its ideal slot but peaked together with another segment
    #[serde(rename = "fired_together")]
    Simultaneous,
}

impl ErrorTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorTiming::Early => "fired early",
            ErrorTiming::Late => "fired late",
            ErrorTiming::Simultaneous => "fired together",
        }
    }
}

/// One segment that peaked out of its ideal slot
///
/// Positions are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceError {
    pub segment: BodySegment,
    pub expected_position: usize,
    pub actual_position: usize,
    pub timing: ErrorTiming,
}

/// Complete sequencing diagnosis for one swing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingSequenceAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swing_id: Option<Uuid>,
    pub segments: Vec<SegmentMomentumData>,
    /// Always a permutation of the six segments
    pub actual_order: Vec<BodySegment>,
    pub ideal_order: Vec<BodySegment>,
    pub errors: Vec<SequenceError>,
    pub sequence_match: bool,
    pub order_score: f64,
    pub timing_score: f64,
    /// 0–100
    pub sequence_score: u8,
    /// True when the input could not be ordered and was scored 0
    pub degenerate: bool,
    pub summary: String,
}

impl SwingSequenceAnalysis {
    /// Peak time of a segment, if it was analyzed
    pub fn peak_time_ms(&self, segment: BodySegment) -> Option<f64> {
        self.segments
            .iter()
            .find(|d| d.segment == segment)
            .map(|d| d.peak_time_ms)
    }

    /// True when `a` peaked before `b` or at the same instant
    pub fn fired_no_later(&self, a: BodySegment, b: BodySegment) -> bool {
        match (self.peak_time_ms(a), self.peak_time_ms(b)) {
            (Some(ta), Some(tb)) => ta <= tb,
            _ => false,
        }
    }

    pub fn with_swing_id(mut self, swing_id: Option<Uuid>) -> Self {
        self.swing_id = swing_id;
        self
    }
}

/// Normalized Kendall-tau order score in [0, 100]
///
/// 100 exactly when `actual` is in ideal order.
pub fn order_score(actual: &[BodySegment]) -> f64 {
    let n = actual.len();
    let max_inversions = n * n.saturating_sub(1) / 2;
    if max_inversions == 0 {
        return 100.0;
    }

    let mut inversions = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if actual[i].ideal_position() > actual[j].ideal_position() {
                inversions += 1;
            }
        }
    }

    100.0 * (1.0 - inversions as f64 / max_inversions as f64)
}

/// Order score over segments in firing order, with simultaneous peaks
/// counted as half an inversion
///
/// Equals `order_score` when no two peak times coincide.
fn tied_order_score(ordered: &[&SegmentMomentumData]) -> f64 {
    let n = ordered.len();
    let max_inversions = n * n.saturating_sub(1) / 2;
    if max_inversions == 0 {
        return 100.0;
    }

    let mut inversions = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            if ordered[i].peak_time_ms == ordered[j].peak_time_ms {
                inversions += 0.5;
            } else if ordered[i].segment.ideal_position() > ordered[j].segment.ideal_position() {
                inversions += 1.0;
            }
        }
    }

    100.0 * (1.0 - inversions / max_inversions as f64)
}

/// Evenness of inter-peak spacing in [0, 100]
///
/// `peak_times_ms` must be in firing order. With fewer than two intervals
/// no timing penalty is possible and `order_score` is returned. If every
/// peak lands at the same instant there is no sequence to speak of and
/// the timing score is 0.
pub fn timing_score(peak_times_ms: &[f64], order_score: f64) -> f64 {
    let intervals: Vec<f64> = peak_times_ms.windows(2).map(|w| w[1] - w[0]).collect();
    if intervals.len() < 2 {
        return order_score;
    }

    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }

    let cv = coefficient_of_variation(&intervals);
    (100.0 - TIMING_CV_PENALTY * cv).max(0.0)
}

/// Combine component scores into the rounded 0–100 sequence score
pub fn combine_scores(order_score: f64, timing_score: f64) -> u8 {
    let score = ORDER_WEIGHT * order_score + TIMING_WEIGHT * timing_score;
    if score.is_finite() {
        score.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

/// Why an input could not be ordered
#[derive(Debug, Clone, PartialEq)]
enum Degenerate {
    Missing(Vec<BodySegment>),
    Duplicated(BodySegment),
    NonFinite(BodySegment),
    NoMotion,
    Simultaneous,
}

fn check_degenerate(segments: &[SegmentMomentumData]) -> Option<Degenerate> {
    for (i, data) in segments.iter().enumerate() {
        if segments[..i].iter().any(|d| d.segment == data.segment) {
            return Some(Degenerate::Duplicated(data.segment));
        }
    }

    let missing: Vec<BodySegment> = BodySegment::IDEAL_ORDER
        .iter()
        .copied()
        .filter(|s| !segments.iter().any(|d| d.segment == *s))
        .collect();
    if !missing.is_empty() {
        return Some(Degenerate::Missing(missing));
    }

    if let Some(bad) = segments.iter().find(|d| !d.peak_time_ms.is_finite()) {
        return Some(Degenerate::NonFinite(bad.segment));
    }

    if segments.iter().all(|d| !(d.peak_value > 0.0)) {
        return Some(Degenerate::NoMotion);
    }

    if segments
        .iter()
        .all(|d| d.peak_time_ms == segments[0].peak_time_ms)
    {
        return Some(Degenerate::Simultaneous);
    }

    None
}

/// Sort segments by peak time
///
/// Ties are laid out in ideal order so the result is deterministic; they
/// are still scored and reported as ties.
fn firing_order(segments: &[SegmentMomentumData]) -> Vec<&SegmentMomentumData> {
    let mut ordered: Vec<&SegmentMomentumData> = segments.iter().collect();
    ordered.sort_by(|a, b| {
        a.peak_time_ms
            .total_cmp(&b.peak_time_ms)
            .then(a.segment.ideal_position().cmp(&b.segment.ideal_position()))
    });
    ordered
}

/// Analyze the six segment curves of one swing
pub fn analyze_sequence(segments: &[SegmentMomentumData]) -> SwingSequenceAnalysis {
    let ideal_order = BodySegment::IDEAL_ORDER.to_vec();

    if let Some(reason) = check_degenerate(segments) {
        debug!("Sequence input is degenerate: {:?}", reason);
        return degenerate_analysis(segments, reason);
    }

    let ordered = firing_order(segments);
    let actual_order: Vec<BodySegment> = ordered.iter().map(|d| d.segment).collect();
    let peak_times: Vec<f64> = ordered.iter().map(|d| d.peak_time_ms).collect();

    let tied = |segment: BodySegment| {
        let time = ordered
            .iter()
            .find(|d| d.segment == segment)
            .map(|d| d.peak_time_ms);
        ordered
            .iter()
            .any(|d| d.segment != segment && Some(d.peak_time_ms) == time)
    };

    let errors: Vec<SequenceError> = ideal_order
        .iter()
        .enumerate()
        .filter_map(|(expected, &segment)| {
            let actual = actual_order.iter().position(|&s| s == segment)?;
            let timing = if actual < expected {
                ErrorTiming::Early
            } else if actual > expected {
                ErrorTiming::Late
            } else if tied(segment) {
                ErrorTiming::Simultaneous
            } else {
                return None;
            };
            Some(SequenceError {
                segment,
                expected_position: expected + 1,
                actual_position: actual + 1,
                timing,
            })
        })
        .collect();

    let sequence_match = errors.is_empty();
    let order = tied_order_score(&ordered);
    let timing = timing_score(&peak_times, order);
    let sequence_score = combine_scores(order, timing);
    let summary = summary::describe(sequence_match, sequence_score, &errors);

    SwingSequenceAnalysis {
        swing_id: None,
        segments: segments.to_vec(),
        actual_order,
        ideal_order,
        errors,
        sequence_match,
        order_score: order,
        timing_score: timing,
        sequence_score,
        degenerate: false,
        summary,
    }
}

fn degenerate_analysis(segments: &[SegmentMomentumData], reason: Degenerate) -> SwingSequenceAnalysis {
    // Present segments in firing order (first occurrence wins), then the
    // missing ones in ideal order, so the result is still a permutation.
    let mut actual_order: Vec<BodySegment> = Vec::with_capacity(6);
    for data in firing_order(segments) {
        if !actual_order.contains(&data.segment) {
            actual_order.push(data.segment);
        }
    }
    for segment in BodySegment::IDEAL_ORDER {
        if !actual_order.contains(&segment) {
            actual_order.push(segment);
        }
    }

    let summary = match reason {
        Degenerate::Missing(missing) => summary::describe_missing(&missing),
        Degenerate::Duplicated(segment) => summary::describe_duplicate(segment),
        Degenerate::NonFinite(segment) => summary::describe_non_finite(segment),
        Degenerate::NoMotion => summary::describe_no_motion(),
        Degenerate::Simultaneous => summary::describe_simultaneous(),
    };

    SwingSequenceAnalysis {
        swing_id: None,
        segments: segments.to_vec(),
        actual_order,
        ideal_order: BodySegment::IDEAL_ORDER.to_vec(),
        errors: Vec::new(),
        sequence_match: false,
        order_score: 0.0,
        timing_score: 0.0,
        sequence_score: 0,
        degenerate: true,
        summary,
    }
}
