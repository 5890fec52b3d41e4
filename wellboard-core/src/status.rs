//! Threshold classification
//!
//! Two independent tables:
//! - `Severity`: generic 4-tier status used for biometric bars
//! - `ReadinessBand`: 5-band descriptor used by the readiness gauge
//!
//! Global invariants enforced:
//! - Classification is monotonic in the value
//! - A value equal to a threshold belongs to that threshold's tier

use serde::Serialize;

/// Display colors shared by both tables
pub mod palette {
    pub const SUCCESS: &str = "#10B981";
    pub const INFO: &str = "#3B82F6";
    pub const WARNING: &str = "#F59E0B";
    pub const CRITICAL: &str = "#DC2626";
    pub const ACCENT: &str = "#D4AF37";
}

/// Generic status severity, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Excellent,
    Good,
    Moderate,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Excellent => "excellent",
            Severity::Good => "good",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Excellent => palette::SUCCESS,
            Severity::Good => palette::INFO,
            Severity::Moderate => palette::WARNING,
            Severity::Critical => palette::CRITICAL,
        }
    }
}

/// Lower bounds for the top three severities; anything below `moderate` is critical
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusThresholds {
    pub excellent: f64,
    pub good: f64,
    pub moderate: f64,
}

impl Default for StatusThresholds {
    /// Thresholds used for the biometric bars
    fn default() -> Self {
        StatusThresholds {
            excellent: 75.0,
            good: 60.0,
            moderate: 40.0,
        }
    }
}

/// Classify a value against a 3-threshold set
pub fn classify(value: f64, thresholds: &StatusThresholds) -> Severity {
    if value >= thresholds.excellent {
        Severity::Excellent
    } else if value >= thresholds.good {
        Severity::Good
    } else if value >= thresholds.moderate {
        Severity::Moderate
    } else {
        Severity::Critical
    }
}

/// Readiness gauge descriptor band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBand {
    PeakState,
    HighCapacity,
    Moderate,
    Suboptimal,
    RecoveryNeeded,
}

impl ReadinessBand {
    pub fn descriptor(&self) -> &'static str {
        match self {
            ReadinessBand::PeakState => "Peak State",
            ReadinessBand::HighCapacity => "High Capacity",
            ReadinessBand::Moderate => "Moderate",
            ReadinessBand::Suboptimal => "Suboptimal",
            ReadinessBand::RecoveryNeeded => "Recovery Needed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ReadinessBand::PeakState => palette::SUCCESS,
            ReadinessBand::HighCapacity | ReadinessBand::Moderate => palette::INFO,
            ReadinessBand::Suboptimal => palette::WARNING,
            ReadinessBand::RecoveryNeeded => palette::CRITICAL,
        }
    }
}

/// Gauge breakpoints; anything below `suboptimal` needs recovery
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadinessBreakpoints {
    pub peak: f64,
    pub high: f64,
    pub moderate: f64,
    pub suboptimal: f64,
}

impl Default for ReadinessBreakpoints {
    fn default() -> Self {
        ReadinessBreakpoints {
            peak: 85.0,
            high: 75.0,
            moderate: 65.0,
            suboptimal: 50.0,
        }
    }
}

/// Assign the readiness gauge band
pub fn classify_readiness(readiness: f64, breakpoints: &ReadinessBreakpoints) -> ReadinessBand {
    if readiness >= breakpoints.peak {
        ReadinessBand::PeakState
    } else if readiness >= breakpoints.high {
        ReadinessBand::HighCapacity
    } else if readiness >= breakpoints.moderate {
        ReadinessBand::Moderate
    } else if readiness >= breakpoints.suboptimal {
        ReadinessBand::Suboptimal
    } else {
        ReadinessBand::RecoveryNeeded
    }
}
