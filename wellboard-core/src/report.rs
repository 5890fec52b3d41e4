//! Report composition
//!
//! Global invariants enforced:
//! - Section order is fixed per profile
//! - A stale or missing selection falls back to the first record
//! - An empty dataset yields chrome only (no tiles, no charts)

use crate::charts::{self, ChartSpec};
use crate::metrics;
use crate::record::{Insight, WellnessRecord};
use crate::status::{ReadinessBreakpoints, StatusThresholds};
use crate::tiles::{self, Tile};
use serde::{Deserialize, Serialize};

pub const REPORT_TITLE: &str = "Wellness Intelligence";
pub const EMPTY_STATE_MESSAGE: &str = "No wellness records found in the data source.";
pub const DEFAULT_MODEL_LABEL: &str = "v2.0";

/// Which subset of sections to compose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Every section
    #[default]
    Full,
    /// Header, quick stats, gauge + forecast, insights, footer
    Compact,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Full => "full",
            Profile::Compact => "compact",
        }
    }
}

/// Knobs for composing a report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub profile: Profile,
    pub bar_thresholds: StatusThresholds,
    pub readiness_breakpoints: ReadinessBreakpoints,
    pub model_label: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            profile: Profile::Full,
            bar_thresholds: StatusThresholds::default(),
            readiness_breakpoints: ReadinessBreakpoints::default(),
            model_label: DEFAULT_MODEL_LABEL.to_string(),
        }
    }
}

/// A composed report, ready for a rendering surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: &'static str,
    pub profile: Profile,
    pub selector: Selector,
    pub sections: Vec<Section>,
}

/// Single-select control over the loaded display names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selector {
    pub options: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum Section {
    Header {
        name: String,
        subtitle: &'static str,
        tagline: &'static str,
    },
    QuickStats {
        tiles: Vec<Tile>,
        captions: Vec<String>,
    },
    ChartRow {
        charts: Vec<TitledChart>,
    },
    DetailedBiometrics {
        title: &'static str,
        tiles: Vec<Tile>,
    },
    Insights {
        title: &'static str,
        panels: Vec<InsightPanel>,
    },
    Context {
        title: &'static str,
        entries: Vec<ContextEntry>,
    },
    EmptyState {
        message: &'static str,
    },
    Footer {
        brand: &'static str,
        tagline: &'static str,
        strapline: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitledChart {
    pub title: &'static str,
    pub chart: ChartSpec,
}

/// Collapsible insight panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightPanel {
    pub heading: String,
    pub expanded: bool,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextEntry {
    pub label: &'static str,
    pub text: String,
}

/// Pick the record to display
///
/// `None` selects the first record; an unknown name also falls back to the
/// first record. Returns `None` only for an empty dataset.
pub fn resolve_selection<'a>(
    records: &'a [WellnessRecord],
    selection: Option<&str>,
) -> Option<&'a WellnessRecord> {
    let first = records.first()?;
    let Some(name) = selection else {
        return Some(first);
    };
    match records.iter().find(|r| r.full_name == name) {
        Some(record) => Some(record),
        None => {
            tracing::warn!(
                selection = name,
                fallback = %first.full_name,
                "selected user not found, showing first record"
            );
            Some(first)
        }
    }
}

/// Compose the report for the selected user
pub fn compose(
    records: &[WellnessRecord],
    selection: Option<&str>,
    options: &ReportOptions,
) -> Report {
    let options_list: Vec<String> = records.iter().map(|r| r.full_name.clone()).collect();

    let Some(record) = resolve_selection(records, selection) else {
        return Report {
            title: REPORT_TITLE,
            profile: options.profile,
            selector: Selector {
                options: options_list,
                selected: None,
            },
            sections: vec![Section::EmptyState {
                message: EMPTY_STATE_MESSAGE,
            }],
        };
    };

    let sections = match options.profile {
        Profile::Full => vec![
            header_section(record),
            quick_stats_section(record, options),
            Section::ChartRow {
                charts: vec![gauge_chart(record, options), bars_chart(record, options)],
            },
            Section::ChartRow {
                charts: vec![radar_chart(record), forecast_chart(record)],
            },
            Section::DetailedBiometrics {
                title: "Detailed Biometrics",
                tiles: tiles::detail_tiles(record),
            },
            insights_section(record),
            context_section(record),
            footer_section(),
        ],
        Profile::Compact => vec![
            header_section(record),
            quick_stats_section(record, options),
            Section::ChartRow {
                charts: vec![gauge_chart(record, options), forecast_chart(record)],
            },
            insights_section(record),
            footer_section(),
        ],
    };

    Report {
        title: REPORT_TITLE,
        profile: options.profile,
        selector: Selector {
            options: options_list,
            selected: Some(record.full_name.clone()),
        },
        sections,
    }
}

fn header_section(record: &WellnessRecord) -> Section {
    Section::Header {
        name: record.full_name.clone(),
        subtitle: "Wellness Intelligence Report",
        tagline: "Predictive by Nature. Personal by Design.",
    }
}

fn quick_stats_section(record: &WellnessRecord, options: &ReportOptions) -> Section {
    Section::QuickStats {
        tiles: tiles::quick_stat_tiles(record),
        captions: vec![
            format!("Report Date: {}", record.date),
            format!("Model: {}", options.model_label),
        ],
    }
}

fn gauge_chart(record: &WellnessRecord, options: &ReportOptions) -> TitledChart {
    TitledChart {
        title: "System Readiness",
        chart: ChartSpec::Gauge(charts::readiness_gauge(
            record.readiness_score,
            &options.readiness_breakpoints,
        )),
    }
}

fn bars_chart(record: &WellnessRecord, options: &ReportOptions) -> TitledChart {
    TitledChart {
        title: "Biometric Profile",
        chart: ChartSpec::HorizontalBar(charts::biometric_bar_chart(
            &metrics::biometric_bars(record),
            &options.bar_thresholds,
        )),
    }
}

fn radar_chart(record: &WellnessRecord) -> TitledChart {
    TitledChart {
        title: "Advanced Metrics Profile",
        chart: ChartSpec::Radar(charts::radar_chart(&metrics::radar_axes(record))),
    }
}

fn forecast_chart(record: &WellnessRecord) -> TitledChart {
    TitledChart {
        title: "3-Day Readiness Forecast",
        chart: ChartSpec::Line(charts::forecast_chart(&metrics::forecast(record))),
    }
}

/// Icon shown in front of an insight heading
pub fn insight_icon(kind: &str) -> &'static str {
    match kind {
        "critical" => "🚨",
        "warning" => "⚠️",
        "action" => "🎯",
        "positive" => "✅",
        "strength" => "💪",
        "intelligence" => "🧬",
        "system_state" => "📊",
        _ => "•",
    }
}

fn insight_panel(idx: usize, insight: &Insight) -> InsightPanel {
    // Only the first group may carry an action
    let action = (idx == 0 && !insight.action.is_empty()).then(|| insight.action.clone());
    InsightPanel {
        heading: format!(
            "{} {}: {}",
            insight_icon(&insight.kind),
            insight.category,
            insight.title
        ),
        expanded: idx == 0,
        title: insight.title.clone(),
        message: insight.message.clone(),
        action,
    }
}

fn insights_section(record: &WellnessRecord) -> Section {
    let panels = record
        .insights
        .iter()
        .enumerate()
        .filter(|(_, insight)| insight.is_present())
        .map(|(idx, insight)| insight_panel(idx, insight))
        .collect();
    Section::Insights {
        title: "Personalized Insights",
        panels,
    }
}

fn context_section(record: &WellnessRecord) -> Section {
    let entries = [
        ("Primary Wellness Goals:", &record.wellness_goals),
        ("Key Challenge:", &record.pain_point),
    ]
    .into_iter()
    .filter(|(_, text)| !text.is_empty())
    .map(|(label, text)| ContextEntry {
        label,
        text: text.clone(),
    })
    .collect();
    Section::Context {
        title: "User Context",
        entries,
    }
}

fn footer_section() -> Section {
    Section::Footer {
        brand: "WELLBOARD",
        tagline: "The Human Algorithm",
        strapline: "Wellness Intelligence • Powered by Advanced Biometric Modeling",
    }
}
