//! Population percentile engine
//!
//! Ranks swing metrics against p10/p50/p90 benchmarks for an age or skill
//! group. Interpolation is piecewise linear through the anchors
//! `(p10, 10)`, `(p50, 50)` and `(p90, 90)`:
//!
//! - below p10: `10 × (value / p10)`
//! - between anchors: linear between the bounding anchors
//! - above p90: continue the p50→p90 slope, capped at 99
//!
//! Results are clamped to `[1, 99]`. Metrics where lower is better
//! (timing variability) report `100 − raw`.

use serde::{Deserialize, Serialize};
use swingdx_common::config::RegressionCoefficients;
use swingdx_common::models::SwingMetrics;
use swingdx_common::{BaselineTable, EngineConfig, PercentileRange, PopulationBaseline, Result};
use tracing::debug;

pub const MIN_PERCENTILE: f64 = 1.0;
pub const MAX_PERCENTILE: f64 = 99.0;

/// Composite weights, in `Metric::all()` order. Sum to 1.0.
pub const COMPOSITE_WEIGHTS: [f64; 4] = [0.40, 0.20, 0.25, 0.15];

/// A ranked swing metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    BatSpeed,
    HandSpeed,
    HandToBatRatio,
    TimingCv,
}

impl Metric {
    pub fn all() -> [Metric; 4] {
        [
            Metric::BatSpeed,
            Metric::HandSpeed,
            Metric::HandToBatRatio,
            Metric::TimingCv,
        ]
    }

    /// Lower values rank higher
    pub fn is_inverted(&self) -> bool {
        matches!(self, Metric::TimingCv)
    }

    pub fn range<'a>(&self, baseline: &'a PopulationBaseline) -> &'a PercentileRange {
        match self {
            Metric::BatSpeed => &baseline.bat_speed,
            Metric::HandSpeed => &baseline.hand_speed,
            Metric::HandToBatRatio => &baseline.hand_to_bat_ratio,
            Metric::TimingCv => &baseline.timing_cv,
        }
    }

    fn weight(&self) -> f64 {
        match self {
            Metric::BatSpeed => COMPOSITE_WEIGHTS[0],
            Metric::HandSpeed => COMPOSITE_WEIGHTS[1],
            Metric::HandToBatRatio => COMPOSITE_WEIGHTS[2],
            Metric::TimingCv => COMPOSITE_WEIGHTS[3],
        }
    }

    fn coefficient(&self, regression: &RegressionCoefficients) -> f64 {
        match self {
            Metric::BatSpeed => regression.bat_speed,
            Metric::HandSpeed => regression.hand_speed,
            Metric::HandToBatRatio => regression.hand_to_bat_ratio,
            Metric::TimingCv => regression.timing,
        }
    }
}

/// Percentile of `value` within `range`
///
/// # Arguments
/// * `value` - Raw measurement
/// * `range` - Benchmark anchors (must be strictly increasing)
/// * `inverted` - True when a lower value is better
///
/// # Returns
/// Percentile in `[1, 99]`. Non-finite input ranks at the bottom.
pub fn calculate_percentile(value: f64, range: &PercentileRange, inverted: bool) -> f64 {
    if !value.is_finite() {
        return MIN_PERCENTILE;
    }

    let raw = if value <= range.p10 {
        if range.p10 > 0.0 {
            10.0 * (value / range.p10)
        } else {
            0.0
        }
    } else if value <= range.p50 {
        10.0 + 40.0 * (value - range.p10) / (range.p50 - range.p10)
    } else if value <= range.p90 {
        50.0 + 40.0 * (value - range.p50) / (range.p90 - range.p50)
    } else {
        (90.0 + 40.0 * (value - range.p90) / (range.p90 - range.p50)).min(MAX_PERCENTILE)
    };

    let oriented = if inverted { 100.0 - raw } else { raw };
    oriented.clamp(MIN_PERCENTILE, MAX_PERCENTILE)
}

/// Sub-percentiles keyed by metric; `None` when a metric was unavailable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPercentiles {
    pub bat_speed: f64,
    pub hand_speed: f64,
    pub hand_to_bat_ratio: Option<f64>,
    pub timing: f64,
}

impl SubPercentiles {
    fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::BatSpeed => Some(self.bat_speed),
            Metric::HandSpeed => Some(self.hand_speed),
            Metric::HandToBatRatio => self.hand_to_bat_ratio,
            Metric::TimingCv => Some(self.timing),
        }
    }
}

/// Bat speed the player's sub-percentiles predict, and the shortfall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanicalLoss {
    pub expected_bat_speed: f64,
    pub actual_bat_speed: f64,
    /// `max(0, expected − actual)`, mph
    pub loss_mph: f64,
}

/// Full ranking of one player's swing metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileReport {
    /// Canonical level the baselines were taken from
    pub level: String,
    pub used_fallback: bool,
    pub percentiles: SubPercentiles,
    /// Weighted composite, 1–99
    pub composite: u8,
    pub mechanical_loss: MechanicalLoss,
}

/// Weighted composite of available sub-percentiles
///
/// A missing metric drops out and the remaining weights are rescaled.
pub fn composite_percentile(percentiles: &SubPercentiles) -> u8 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for metric in Metric::all() {
        if let Some(p) = percentiles.get(metric) {
            weighted += metric.weight() * p;
            total_weight += metric.weight();
        }
    }
    if total_weight <= 0.0 {
        return MIN_PERCENTILE as u8;
    }
    (weighted / total_weight)
        .round()
        .clamp(MIN_PERCENTILE, MAX_PERCENTILE) as u8
}

/// Regression estimate of lost bat speed
///
/// Missing sub-percentiles contribute no term.
pub fn mechanical_loss(
    percentiles: &SubPercentiles,
    actual_bat_speed: f64,
    regression: &RegressionCoefficients,
) -> MechanicalLoss {
    let expected = Metric::all()
        .iter()
        .filter_map(|m| percentiles.get(*m).map(|p| m.coefficient(regression) * p))
        .fold(regression.intercept, |acc, term| acc + term);

    let loss = if actual_bat_speed.is_finite() {
        (expected - actual_bat_speed).max(0.0)
    } else {
        0.0
    };

    MechanicalLoss {
        expected_bat_speed: expected,
        actual_bat_speed,
        loss_mph: loss,
    }
}

/// Percentile engine over an injected baseline table
#[derive(Debug, Clone)]
pub struct PercentileEngine {
    table: BaselineTable,
    regression: RegressionCoefficients,
}

impl Default for PercentileEngine {
    fn default() -> Self {
        Self::new(BaselineTable::builtin().clone(), RegressionCoefficients::default())
    }
}

impl PercentileEngine {
    pub fn new(table: BaselineTable, regression: RegressionCoefficients) -> Self {
        Self { table, regression }
    }

    /// Build from configured baselines and regression coefficients
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(config.baseline_table()?, config.percentile.regression))
    }

    pub fn table(&self) -> &BaselineTable {
        &self.table
    }

    /// Percentile of one metric for a level (unknown levels fall back)
    pub fn percentile(&self, metric: Metric, value: f64, level: &str) -> f64 {
        let resolved = self.table.resolve(level);
        calculate_percentile(value, metric.range(resolved.baseline), metric.is_inverted())
    }

    /// Rank every metric, combine, and estimate mechanical loss
    pub fn report(&self, metrics: &SwingMetrics, level: &str) -> PercentileReport {
        let resolved = self.table.resolve(level);
        let baseline = resolved.baseline;
        let rank = |metric: Metric, value: f64| {
            calculate_percentile(value, metric.range(baseline), metric.is_inverted())
        };

        let ratio = metrics.resolved_hand_to_bat_ratio();
        if ratio.is_none() {
            debug!("Hand-to-bat ratio unavailable; excluded from composite");
        }

        let percentiles = SubPercentiles {
            bat_speed: rank(Metric::BatSpeed, metrics.bat_speed),
            hand_speed: rank(Metric::HandSpeed, metrics.hand_speed),
            hand_to_bat_ratio: ratio.map(|r| rank(Metric::HandToBatRatio, r)),
            timing: rank(Metric::TimingCv, metrics.timing_cv),
        };

        PercentileReport {
            level: baseline.level.clone(),
            used_fallback: resolved.used_fallback,
            composite: composite_percentile(&percentiles),
            mechanical_loss: mechanical_loss(&percentiles, metrics.bat_speed, &self.regression),
            percentiles,
        }
    }
}
