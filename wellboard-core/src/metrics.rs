//! Display metric derivation
//!
//! Pure functions from one record to normalized 0-100 values.
//!
//! Transforms:
//! - pass-through: HRV proxy, sleep efficiency (already 0-100)
//! - x10: 0-10 scores (recovery, clarity, energy, anabolic, circadian)
//! - inverted: stress `100 - level*10`, cognitive capacity `(10 - load)*10`
//!
//! No clamping is applied; out-of-range inputs produce out-of-range outputs.

use crate::record::WellnessRecord;
use serde::Serialize;

/// X-axis labels of the forecast
pub const FORECAST_DAYS: [&str; 4] = ["Today", "Day 1", "Day 2", "Day 3"];

/// A labelled normalized value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: &'static str,
    pub value: f64,
}

fn labeled(label: &'static str, value: f64) -> LabeledValue {
    LabeledValue { label, value }
}

fn scale_ten(score: f64) -> f64 {
    score * 10.0
}

/// Biometric bar values in display order
pub fn biometric_bars(record: &WellnessRecord) -> Vec<LabeledValue> {
    vec![
        labeled("HRV Proxy", record.hrv_proxy),
        labeled("Sleep Efficiency", record.sleep_efficiency),
        labeled("Stress (inv)", 100.0 - scale_ten(record.stress_level as f64)),
        labeled("Recovery", scale_ten(record.recovery_score as f64)),
        labeled("Mental Clarity", scale_ten(record.mental_clarity as f64)),
        labeled("Energy", scale_ten(record.energy_level as f64)),
    ]
}

/// The six radar axes in display order
pub fn radar_axes(record: &WellnessRecord) -> Vec<LabeledValue> {
    vec![
        labeled("Anabolic Index", scale_ten(record.anabolic_index)),
        labeled("Circadian Score", scale_ten(record.circadian_score)),
        labeled("Cognitive Capacity", scale_ten(10.0 - record.cognitive_load)),
        labeled("Recovery", scale_ten(record.recovery_score as f64)),
        labeled("HRV", record.hrv_proxy),
        labeled("Sleep Quality", record.sleep_efficiency),
    ]
}

/// Readiness projections for today plus three days
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub optimistic: [f64; 4],
    pub baseline: [f64; 4],
    pub pessimistic: [f64; 4],
}

/// Build the three forecast paths
///
/// The pessimistic path diverges only on day 1 and then follows the baseline.
pub fn forecast(record: &WellnessRecord) -> Forecast {
    let today = record.readiness_score;
    let f = &record.forecast;
    Forecast {
        optimistic: [today, f.day1_optimistic, f.day2_optimistic, f.day3_optimistic],
        baseline: [today, f.day1_baseline, f.day2_baseline, f.day3_baseline],
        pessimistic: [today, f.day1_pessimistic, f.day2_baseline, f.day3_baseline],
    }
}

/// Remaining cognitive capacity on the 0-10 scale
pub fn cognitive_capacity(record: &WellnessRecord) -> f64 {
    10.0 - record.cognitive_load
}
