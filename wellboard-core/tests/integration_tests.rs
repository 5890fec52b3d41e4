//! Integration tests for loading fixtures and composing reports

use std::path::PathBuf;
use wellboard_core::charts::ChartSpec;
use wellboard_core::report::Section;
use wellboard_core::status::ReadinessBand;
use wellboard_core::{
    build_report, load_records, render_json, render_text, DataError, Profile, Report,
    ReportOptions, ReportSession,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn quick_stat_values(report: &Report) -> Vec<String> {
    report
        .sections
        .iter()
        .find_map(|s| match s {
            Section::QuickStats { tiles, .. } => {
                Some(tiles.iter().map(|t| t.value.clone()).collect())
            }
            _ => None,
        })
        .expect("quick stats section")
}

fn leading_number(value: &str) -> f64 {
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    value[..end].parse().unwrap()
}

#[test]
fn test_load_fixture_preserves_order() {
    let records = load_records(&fixture_path("wellness.csv")).unwrap();
    let names: Vec<_> = records.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, vec!["Maya Chen", "Jordan Alvarez", "Priya Natarajan"]);
}

#[test]
fn test_load_fixture_types_and_extras() {
    let records = load_records(&fixture_path("wellness.csv")).unwrap();
    let maya = &records[0];
    assert_eq!(maya.readiness_score, 88.4);
    assert_eq!(maya.stress_level, 2);
    assert_eq!(maya.cognitive_load, 3.2);
    assert_eq!(
        maya.wellness_goals,
        "Sustain peak performance, improve deep sleep"
    );
    assert_eq!(maya.insights[0].action, "Keep the current training block");
    assert_eq!(maya.extra.get("cohort").map(String::as_str), Some("pilot-a"));
}

#[test]
fn test_optional_columns_default_to_empty() {
    let records = load_records(&fixture_path("minimal_columns.csv")).unwrap();
    assert_eq!(records.len(), 1);
    let sam = &records[0];
    assert!(sam.wellness_goals.is_empty());
    assert!(sam.pain_point.is_empty());
    assert!(sam.insights.iter().all(|i| !i.is_present()));

    let report = build_report(
        &fixture_path("minimal_columns.csv"),
        None,
        &ReportOptions::default(),
    )
    .unwrap();
    for section in &report.sections {
        match section {
            Section::Insights { panels, .. } => assert!(panels.is_empty()),
            Section::Context { entries, .. } => assert!(entries.is_empty()),
            _ => {}
        }
    }
}

#[test]
fn test_rows_without_trailing_optional_cells() {
    let path = fixture_path("short_rows.csv");
    let records = load_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].wellness_goals.is_empty());
    assert_eq!(records[1].wellness_goals, "Build consistency");
    assert_eq!(records[1].pain_point, "Travel weeks");
    assert!(records
        .iter()
        .all(|r| r.insights.iter().all(|i| !i.is_present())));

    let report = build_report(&path, Some("Omar Haddad"), &ReportOptions::default()).unwrap();
    let text = render_text(&report);
    assert!(text.contains("Primary Wellness Goals: Build consistency"));
    assert!(text.contains("Key Challenge: Travel weeks"));
}

#[test]
fn test_invalid_numeric_names_file_row_and_field() {
    let path = fixture_path("invalid_numeric.csv");
    let err = load_records(&path).unwrap_err();
    match &err {
        DataError::InvalidField {
            path: err_path,
            row,
            field,
            ..
        } => {
            assert_eq!(err_path, &path);
            assert_eq!(*row, 2);
            assert_eq!(*field, "stress_level");
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("invalid_numeric.csv"));
    assert!(message.contains("stress_level"));
}

#[test]
fn test_missing_column_is_rejected() {
    let err = load_records(&fixture_path("missing_column.csv")).unwrap_err();
    assert!(matches!(
        err,
        DataError::MissingColumn {
            column: "cognitive_load",
            ..
        }
    ));
}

#[test]
fn test_missing_file_is_not_found() {
    let err = load_records(&fixture_path("does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));
}

#[test]
fn test_header_only_renders_empty_state() {
    let report = build_report(
        &fixture_path("header_only.csv"),
        None,
        &ReportOptions::default(),
    )
    .unwrap();
    assert_eq!(report.sections.len(), 1);
    assert!(matches!(report.sections[0], Section::EmptyState { .. }));
    let text = render_text(&report);
    assert!(!text.contains("QUICK STATS"));
}

#[test]
fn test_selected_user_tiles_round_trip() {
    let path = fixture_path("wellness.csv");
    let records = load_records(&path).unwrap();
    for record in records.iter() {
        let report = build_report(&path, Some(&record.full_name), &ReportOptions::default())
            .unwrap();
        assert_eq!(report.selector.selected.as_deref(), Some(record.full_name.as_str()));
        let values = quick_stat_values(&report);
        let raw = [
            record.readiness_score,
            record.hrv_proxy,
            record.sleep_efficiency,
        ];
        for (tile, original) in values.iter().zip(raw) {
            assert!(
                (leading_number(tile) - original).abs() <= 0.5,
                "{} does not round-trip to {}",
                tile,
                original
            );
        }
    }
}

#[test]
fn test_absent_user_falls_back_to_first() {
    let report = build_report(
        &fixture_path("wellness.csv"),
        Some("Nobody Here"),
        &ReportOptions::default(),
    )
    .unwrap();
    assert_eq!(report.selector.selected.as_deref(), Some("Maya Chen"));
}

#[test]
fn test_gauge_band_per_user() {
    let path = fixture_path("wellness.csv");
    let expected = [
        ("Maya Chen", ReadinessBand::PeakState),
        ("Jordan Alvarez", ReadinessBand::Suboptimal),
        ("Priya Natarajan", ReadinessBand::Moderate),
    ];
    for (name, band) in expected {
        let report = build_report(&path, Some(name), &ReportOptions::default()).unwrap();
        let gauge = report
            .sections
            .iter()
            .find_map(|s| match s {
                Section::ChartRow { charts } => charts.iter().find_map(|c| match &c.chart {
                    ChartSpec::Gauge(g) => Some(g.clone()),
                    _ => None,
                }),
                _ => None,
            })
            .unwrap();
        assert_eq!(gauge.band, band, "{}", name);
    }
}

#[test]
fn test_insight_panels_per_user() {
    let path = fixture_path("wellness.csv");

    let jordan = build_report(&path, Some("Jordan Alvarez"), &ReportOptions::default()).unwrap();
    let text = render_text(&jordan);
    assert!(text.contains("🚨 Stress: High allostatic load"));
    assert!(text.contains("⚠️ Training: Load spike"));
    assert!(!text.contains("Recommended Action"));

    let priya = build_report(&path, Some("Priya Natarajan"), &ReportOptions::default()).unwrap();
    let text = render_text(&priya);
    assert!(text.contains("Recommended Action: Add a post-workout meal"));
    assert!(!text.contains("Primary Wellness Goals:"));
    assert!(!text.contains("Key Challenge:"));
}

#[test]
fn test_forecast_fold_in_json() {
    let report = build_report(
        &fixture_path("wellness.csv"),
        Some("Jordan Alvarez"),
        &ReportOptions::default(),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&render_json(&report)).unwrap();
    let series = &value["sections"][3]["charts"][1]["chart"]["series"];
    assert_eq!(series[2]["name"], "Without Changes");
    assert_eq!(series[2]["values"][1], 52.0);
    assert_eq!(series[2]["values"][2], series[1]["values"][2]);
    assert_eq!(series[2]["values"][3], series[1]["values"][3]);
}

#[test]
fn test_compact_profile_from_session() {
    let mut session = ReportSession::new(fixture_path("wellness.csv"));
    let options = ReportOptions {
        profile: Profile::Compact,
        ..ReportOptions::default()
    };
    let report = session.report(Some("Priya Natarajan"), &options).unwrap();
    assert_eq!(report.profile, Profile::Compact);
    assert!(!report
        .sections
        .iter()
        .any(|s| matches!(s, Section::DetailedBiometrics { .. } | Section::Context { .. })));
    assert!(session.is_loaded());
}

#[test]
fn test_output_is_deterministic() {
    let path = fixture_path("wellness.csv");
    let a = build_report(&path, None, &ReportOptions::default()).unwrap();
    let b = build_report(&path, None, &ReportOptions::default()).unwrap();
    assert_eq!(render_json(&a), render_json(&b));
    assert_eq!(render_text(&a), render_text(&b));
}
