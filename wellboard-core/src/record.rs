//! Wellness record data model
//!
//! One record per user per report date. Scales are fixed per field:
//! - 0-100: readiness, HRV proxy, sleep efficiency, training load, forecast days
//! - 0-10 integers: stress, mental clarity, recovery, energy
//! - 0-10 floats: anabolic index, circadian score, cognitive load

use serde::Serialize;
use std::collections::BTreeMap;

/// Columns that must be present in every dataset header
pub const REQUIRED_COLUMNS: &[&str] = &[
    "full_name",
    "date",
    "readiness_score",
    "hrv_proxy",
    "sleep_efficiency",
    "stress_level",
    "mental_clarity",
    "recovery_score",
    "energy_level",
    "training_load",
    "anabolic_index",
    "circadian_score",
    "cognitive_load",
    "day1_optimistic",
    "day1_baseline",
    "day1_pessimistic",
    "day2_optimistic",
    "day2_baseline",
    "day3_optimistic",
    "day3_baseline",
];

/// Free-text columns that default to empty when absent
pub const OPTIONAL_COLUMNS: &[&str] = &[
    "wellness_goals",
    "pain_point",
    "insight_1_type",
    "insight_1_category",
    "insight_1_title",
    "insight_1_message",
    "insight_1_action",
    "insight_2_type",
    "insight_2_category",
    "insight_2_title",
    "insight_2_message",
    "insight_3_type",
    "insight_3_category",
    "insight_3_title",
    "insight_3_message",
];

/// Returns true if the column is part of the record schema
pub fn is_known_column(name: &str) -> bool {
    REQUIRED_COLUMNS.contains(&name) || OPTIONAL_COLUMNS.contains(&name)
}

/// One user's wellness snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellnessRecord {
    pub full_name: String,
    pub date: String,
    pub readiness_score: f64,
    pub hrv_proxy: f64,
    pub sleep_efficiency: f64,
    pub stress_level: i64,
    pub mental_clarity: i64,
    pub recovery_score: i64,
    pub energy_level: i64,
    pub training_load: f64,
    pub anabolic_index: f64,
    pub circadian_score: f64,
    pub cognitive_load: f64,
    pub forecast: ForecastFields,
    pub wellness_goals: String,
    pub pain_point: String,
    pub insights: [Insight; 3],
    /// Columns outside the schema, kept verbatim
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Projected readiness values for the next three days
///
/// There are no day 2/3 pessimistic columns; the pessimistic path reuses the
/// baseline values after day 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastFields {
    pub day1_optimistic: f64,
    pub day1_baseline: f64,
    pub day1_pessimistic: f64,
    pub day2_optimistic: f64,
    pub day2_baseline: f64,
    pub day3_optimistic: f64,
    pub day3_baseline: f64,
}

/// A personalized insight group
///
/// Only the first group of a record ever carries an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
}

impl Insight {
    /// An insight without a title is not displayed
    pub fn is_present(&self) -> bool {
        !self.title.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_record(name: &str) -> WellnessRecord {
    WellnessRecord {
        full_name: name.to_string(),
        date: "2025-01-15".to_string(),
        readiness_score: 78.0,
        hrv_proxy: 62.0,
        sleep_efficiency: 88.0,
        stress_level: 3,
        mental_clarity: 7,
        recovery_score: 8,
        energy_level: 6,
        training_load: 54.0,
        anabolic_index: 6.5,
        circadian_score: 7.2,
        cognitive_load: 4.0,
        forecast: ForecastFields {
            day1_optimistic: 82.0,
            day1_baseline: 77.0,
            day1_pessimistic: 71.0,
            day2_optimistic: 85.0,
            day2_baseline: 76.0,
            day3_optimistic: 87.0,
            day3_baseline: 75.0,
        },
        wellness_goals: "Better sleep".to_string(),
        pain_point: "Afternoon energy dips".to_string(),
        insights: [
            Insight {
                kind: "warning".to_string(),
                category: "Recovery".to_string(),
                title: "Elevated load".to_string(),
                message: "Training load is trending up.".to_string(),
                action: "Take a rest day".to_string(),
            },
            Insight {
                kind: "positive".to_string(),
                category: "Sleep".to_string(),
                title: "Consistent bedtime".to_string(),
                message: "Sleep timing is stable.".to_string(),
                action: String::new(),
            },
            Insight::default(),
        ],
        extra: BTreeMap::new(),
    }
}
