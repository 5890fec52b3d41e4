//! Report output
//!
//! Global invariants enforced:
//! - Deterministic output for identical reports
//! - Renderers never reorder or drop sections

use crate::charts::{ChartSpec, LineDash};
use crate::report::{Report, Section, TitledChart};
use crate::tiles::Tile;

const LABEL_WIDTH: usize = 20;
const METER_WIDTH: usize = 30;
// Fits "Without Changes (- -)" without truncation
const SERIES_LABEL_WIDTH: usize = LABEL_WIDTH + 6;

/// Render a report as JSON for an external rendering surface
pub fn render_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// Render a report for a terminal
pub fn render_text(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", report.title));
    if !report.selector.options.is_empty() {
        let users = report
            .selector
            .options
            .iter()
            .map(|name| {
                if report.selector.selected.as_deref() == Some(name.as_str()) {
                    format!("[{}]", name)
                } else {
                    name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("Users: {}\n", users));
    }
    output.push_str(&rule());

    for section in &report.sections {
        render_section(&mut output, section);
    }

    output
}

fn render_section(output: &mut String, section: &Section) {
    match section {
        Section::Header {
            name,
            subtitle,
            tagline,
        } => {
            output.push_str(&format!("\n{}\n{}\n{}\n", name, subtitle, tagline));
        }
        Section::QuickStats { tiles, captions } => {
            heading(output, "Quick Stats");
            render_tiles(output, tiles);
            for caption in captions {
                output.push_str(&format!("  {}\n", caption));
            }
        }
        Section::ChartRow { charts } => {
            for chart in charts {
                render_chart(output, chart);
            }
        }
        Section::DetailedBiometrics { title, tiles } => {
            heading(output, title);
            render_tiles(output, tiles);
        }
        Section::Insights { title, panels } => {
            heading(output, title);
            if panels.is_empty() {
                output.push_str("  -\n");
            }
            for panel in panels {
                let marker = if panel.expanded { "v" } else { ">" };
                output.push_str(&format!("  {} {}\n", marker, panel.heading));
                output.push_str(&format!("      {}\n", panel.title));
                output.push_str(&format!("      {}\n", panel.message));
                if let Some(action) = &panel.action {
                    output.push_str(&format!("      Recommended Action: {}\n", action));
                }
            }
        }
        Section::Context { title, entries } => {
            heading(output, title);
            for entry in entries {
                output.push_str(&format!("  {} {}\n", entry.label, entry.text));
            }
        }
        Section::EmptyState { message } => {
            output.push_str(&format!("\n{}\n", message));
        }
        Section::Footer {
            brand,
            tagline,
            strapline,
        } => {
            output.push('\n');
            output.push_str(&rule());
            output.push_str(&format!("{} • {}\n{}\n", brand, tagline, strapline));
        }
    }
}

fn render_chart(output: &mut String, titled: &TitledChart) {
    heading(output, titled.title);
    match &titled.chart {
        ChartSpec::Gauge(gauge) => {
            output.push_str(&format!(
                "  {} {:.0}/100 {}\n",
                pad(gauge.title, LABEL_WIDTH - 1),
                gauge.value,
                meter(gauge.value)
            ));
        }
        ChartSpec::HorizontalBar(chart) => {
            for bar in &chart.bars {
                output.push_str(&format!(
                    "  {} {} {:>4} ({})\n",
                    pad(bar.label, LABEL_WIDTH - 1),
                    meter(bar.value),
                    bar.text,
                    bar.severity.as_str()
                ));
            }
        }
        ChartSpec::Radar(radar) => {
            for axis in &radar.axes {
                output.push_str(&format!(
                    "  {} {} {:>4.0}\n",
                    pad(axis.label, LABEL_WIDTH - 1),
                    meter(axis.value),
                    axis.value
                ));
            }
        }
        ChartSpec::Line(chart) => {
            output.push_str(&format!("  {}", pad("", SERIES_LABEL_WIDTH)));
            for x in &chart.x {
                output.push_str(&format!("{:>7}", x));
            }
            output.push('\n');
            for series in &chart.series {
                let name = match series.dash {
                    LineDash::Solid => series.name.to_string(),
                    LineDash::Dashed => format!("{} (- -)", series.name),
                };
                output.push_str(&format!("  {}", pad(&name, SERIES_LABEL_WIDTH)));
                for value in &series.values {
                    output.push_str(&format!("{:>7.0}", value));
                }
                output.push('\n');
            }
        }
    }
}

fn render_tiles(output: &mut String, tiles: &[Tile]) {
    for tile in tiles {
        let mut line = format!("  {} {}", pad(tile.label, LABEL_WIDTH - 1), tile.value);
        if let Some(delta) = &tile.delta {
            line.push_str(&format!("  ({})", delta));
        }
        if let Some(help) = tile.help {
            line.push_str(&format!("  - {}", help));
        }
        output.push_str(&line);
        output.push('\n');
    }
}

fn heading(output: &mut String, title: &str) {
    output.push_str(&format!("\n{}\n", title.to_uppercase()));
}

fn rule() -> String {
    format!("{}\n", "=".repeat(LABEL_WIDTH + METER_WIDTH + 10))
}

/// Fixed-width ASCII meter for a 0-100 value; out-of-range values are drawn clipped
fn meter(value: f64) -> String {
    let clipped = value.clamp(0.0, 100.0);
    let filled = ((clipped / 100.0) * METER_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(METER_WIDTH - filled)
    )
}

/// Truncate or pad string to fixed width
fn pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let truncated: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_record;
    use crate::report::{compose, ReportOptions};

    #[test]
    fn test_meter_bounds() {
        assert_eq!(meter(0.0), format!("[{}]", ".".repeat(METER_WIDTH)));
        assert_eq!(meter(100.0), format!("[{}]", "#".repeat(METER_WIDTH)));
        assert_eq!(meter(150.0), meter(100.0));
        assert_eq!(meter(-20.0), meter(0.0));
        assert_eq!(meter(50.0).matches('#').count(), METER_WIDTH / 2);
    }

    #[test]
    fn test_pad_truncates_long_labels() {
        assert_eq!(pad("abc", 5), "abc  ");
        assert_eq!(pad("abcdefgh", 6), "abc...");
    }

    #[test]
    fn test_text_report_contains_sections() {
        let records = vec![sample_record("Ada Lovelace"), sample_record("Grace Hopper")];
        let text = render_text(&compose(&records, None, &ReportOptions::default()));
        assert!(text.contains("Users: [Ada Lovelace], Grace Hopper"));
        assert!(text.contains("SYSTEM READINESS"));
        assert!(text.contains("High Capacity"));
        assert!(text.contains("Without Changes (- -)"));
        assert!(text.contains("Recommended Action: Take a rest day"));
        assert!(text.contains("Key Challenge: Afternoon energy dips"));
    }

    #[test]
    fn test_forecast_lines_keep_dash_marker() {
        let records = vec![sample_record("Ada Lovelace")];
        let text = render_text(&compose(&records, None, &ReportOptions::default()));
        let line = text
            .lines()
            .find(|l| l.trim_start().starts_with("Without Changes"))
            .unwrap();
        assert_eq!(
            line,
            format!(
                "  {}{:>7}{:>7}{:>7}{:>7}",
                pad("Without Changes (- -)", SERIES_LABEL_WIDTH),
                "78",
                "71",
                "76",
                "75"
            )
        );
        assert!(!line.contains("..."));
        let header = text
            .lines()
            .find(|l| l.trim_start().starts_with("Today"))
            .unwrap();
        assert_eq!(header.len(), line.len());
    }

    #[test]
    fn test_footer_lines() {
        let records = vec![sample_record("Ada Lovelace")];
        let text = render_text(&compose(&records, None, &ReportOptions::default()));
        assert!(text.contains("WELLBOARD • The Human Algorithm\n"));
        assert!(text.ends_with("Powered by Advanced Biometric Modeling\n"));
    }

    #[test]
    fn test_text_report_is_deterministic() {
        let records = vec![sample_record("Ada Lovelace")];
        let report = compose(&records, None, &ReportOptions::default());
        assert_eq!(render_text(&report), render_text(&report));
    }

    #[test]
    fn test_json_report_shape() {
        let records = vec![sample_record("Ada Lovelace")];
        let json = render_json(&compose(&records, None, &ReportOptions::default()));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["profile"], "full");
        assert_eq!(value["sections"][0]["section"], "header");
        assert_eq!(value["sections"][2]["charts"][0]["chart"]["kind"], "gauge");
        assert_eq!(
            value["sections"][3]["charts"][1]["chart"]["series"][2]["dash"],
            "dashed"
        );
    }

    #[test]
    fn test_empty_report_text() {
        let text = render_text(&compose(&[], None, &ReportOptions::default()));
        assert!(text.contains(crate::report::EMPTY_STATE_MESSAGE));
        assert!(!text.contains("Users:"));
    }
}
