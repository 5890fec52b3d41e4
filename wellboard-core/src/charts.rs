//! Declarative chart specifications
//!
//! Backend-agnostic descriptions consumed by a rendering surface. Builders are
//! pure: derived values plus fixed style constants in, spec out.

use crate::metrics::{Forecast, LabeledValue, FORECAST_DAYS};
use crate::status::{
    classify, classify_readiness, palette, ReadinessBand, ReadinessBreakpoints, Severity,
    StatusThresholds,
};
use serde::Serialize;

const FULL_RANGE: [f64; 2] = [0.0, 100.0];
const RADAR_FILL: &str = "rgba(212, 175, 55, 0.2)";

/// Any chart the report can contain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Gauge(GaugeSpec),
    HorizontalBar(BarChartSpec),
    Radar(RadarSpec),
    Line(LineChartSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSpec {
    pub value: f64,
    pub range: [f64; 2],
    pub color: &'static str,
    pub title: &'static str,
    pub band: ReadinessBand,
    pub threshold: ThresholdMarker,
    pub steps: Vec<GaugeStep>,
    pub height: u32,
}

/// Vertical marker drawn across the gauge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdMarker {
    pub value: f64,
    pub color: &'static str,
    pub width: u32,
}

/// Shaded background segment of the gauge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeStep {
    pub range: [f64; 2],
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub bars: Vec<Bar>,
    pub x_range: [f64; 2],
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
    pub severity: Severity,
    pub color: &'static str,
    /// Label printed at the end of the bar
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSpec {
    pub axes: Vec<LabeledValue>,
    pub closed: bool,
    pub filled: bool,
    pub line_color: &'static str,
    pub fill_color: &'static str,
    pub line_width: u32,
    pub marker_size: u32,
    pub radial_range: [f64; 2],
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartSpec {
    pub x: Vec<&'static str>,
    pub series: Vec<LineSeries>,
    pub y_range: [f64; 2],
    pub y_title: &'static str,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
    pub color: &'static str,
    pub width: u32,
    pub dash: LineDash,
    pub marker_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    Solid,
    Dashed,
}

/// Readiness gauge, colored and titled by its band
pub fn readiness_gauge(readiness: f64, breakpoints: &ReadinessBreakpoints) -> GaugeSpec {
    let band = classify_readiness(readiness, breakpoints);
    GaugeSpec {
        value: readiness,
        range: FULL_RANGE,
        color: band.color(),
        title: band.descriptor(),
        band,
        threshold: ThresholdMarker {
            value: readiness,
            color: palette::ACCENT,
            width: 4,
        },
        steps: vec![
            GaugeStep {
                range: [0.0, 50.0],
                color: "#1A1A1A",
            },
            GaugeStep {
                range: [50.0, 75.0],
                color: "#141414",
            },
            GaugeStep {
                range: [75.0, 100.0],
                color: "#0F0F0F",
            },
        ],
        height: 350,
    }
}

/// One horizontal bar per biometric, each colored by its own value
pub fn biometric_bar_chart(bars: &[LabeledValue], thresholds: &StatusThresholds) -> BarChartSpec {
    let bars = bars
        .iter()
        .map(|metric| {
            let severity = classify(metric.value, thresholds);
            Bar {
                label: metric.label,
                value: metric.value,
                severity,
                color: severity.color(),
                text: format!("{:.0}", metric.value),
            }
        })
        .collect();

    BarChartSpec {
        bars,
        x_range: FULL_RANGE,
        height: 300,
    }
}

/// Single filled polygon over the radar axes
pub fn radar_chart(axes: &[LabeledValue]) -> RadarSpec {
    RadarSpec {
        axes: axes.to_vec(),
        closed: true,
        filled: true,
        line_color: palette::ACCENT,
        fill_color: RADAR_FILL,
        line_width: 2,
        marker_size: 8,
        radial_range: FULL_RANGE,
        height: 350,
    }
}

/// Three forecast paths; the pessimistic one is dashed
pub fn forecast_chart(forecast: &Forecast) -> LineChartSpec {
    let series = |name: &'static str, values: [f64; 4], color: &'static str, dash| LineSeries {
        name,
        values: values.to_vec(),
        color,
        width: 3,
        dash,
        marker_size: 10,
    };

    LineChartSpec {
        x: FORECAST_DAYS.to_vec(),
        series: vec![
            series(
                "With Adherence",
                forecast.optimistic,
                palette::SUCCESS,
                LineDash::Solid,
            ),
            series(
                "Current Path",
                forecast.baseline,
                palette::INFO,
                LineDash::Solid,
            ),
            series(
                "Without Changes",
                forecast.pessimistic,
                palette::CRITICAL,
                LineDash::Dashed,
            ),
        ],
        y_range: FULL_RANGE,
        y_title: "Readiness Score",
        height: 300,
    }
}
