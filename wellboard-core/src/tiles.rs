//! Metric tiles
//!
//! Rounding: zero decimals for 0-100 scores and percentages, one decimal for
//! 0-10 index fields.

use crate::metrics::cognitive_capacity;
use crate::record::WellnessRecord;
use serde::Serialize;

/// A labelled value with optional help text and delta
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

impl Tile {
    fn new(label: &'static str, value: String) -> Self {
        Tile {
            label,
            value,
            help: None,
            delta: None,
        }
    }

    fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    fn with_delta(mut self, delta: String) -> Self {
        self.delta = Some(delta);
        self
    }
}

/// Readiness, HRV and sleep summary tiles
pub fn quick_stat_tiles(record: &WellnessRecord) -> Vec<Tile> {
    vec![
        Tile::new("Readiness", format!("{:.0}/100", record.readiness_score)),
        Tile::new("HRV Proxy", format!("{:.0}/100", record.hrv_proxy)),
        Tile::new("Sleep Efficiency", format!("{:.0}%", record.sleep_efficiency)),
    ]
}

/// Detailed biometric tiles
pub fn detail_tiles(record: &WellnessRecord) -> Vec<Tile> {
    vec![
        Tile::new("Anabolic Index", format!("{:.1}/10", record.anabolic_index))
            .with_help("Building vs. breaking down state"),
        Tile::new("Circadian Score", format!("{:.1}/10", record.circadian_score))
            .with_help("Sleep-wake rhythm health"),
        Tile::new("Cognitive Load", format!("{:.1}/10", record.cognitive_load))
            .with_help("Mental processing demand")
            .with_delta(format!("{:.1} capacity", cognitive_capacity(record))),
        Tile::new("Training Load", format!("{:.0}", record.training_load))
            .with_help("Current training stress"),
    ]
}
