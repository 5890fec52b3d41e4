//! Configuration file support for Wellboard
//!
//! Loads report configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.wellboardrc.json` in the working directory
//! 3. `wellboard.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::report::{Profile, ReportOptions, DEFAULT_MODEL_LABEL};
use crate::status::{ReadinessBreakpoints, StatusThresholds};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Data file used when neither the CLI nor the config names one
pub const DEFAULT_DATA_FILE: &str = "wellness.csv";

const CONFIG_FILE_NAMES: &[&str] = &[".wellboardrc.json", "wellboard.config.json"];

/// Wellboard configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WellboardConfig {
    /// Data file path, relative paths resolve against the config file's directory
    #[serde(default)]
    pub data: Option<PathBuf>,

    /// Composition profile (default: full)
    #[serde(default)]
    pub profile: Option<Profile>,

    /// Model label shown in the quick stats captions
    #[serde(default)]
    pub model_label: Option<String>,

    /// Status thresholds for the biometric bars
    #[serde(default)]
    pub bar_thresholds: Option<BarThresholdConfig>,

    /// Readiness gauge breakpoints
    #[serde(default)]
    pub readiness_bands: Option<ReadinessBandConfig>,
}

/// Custom bar status thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BarThresholdConfig {
    /// Lower bound for excellent (default: 75)
    pub excellent: Option<f64>,
    /// Lower bound for good (default: 60)
    pub good: Option<f64>,
    /// Lower bound for moderate (default: 40)
    pub moderate: Option<f64>,
}

/// Custom readiness gauge breakpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadinessBandConfig {
    /// Lower bound for Peak State (default: 85)
    pub peak: Option<f64>,
    /// Lower bound for High Capacity (default: 75)
    pub high: Option<f64>,
    /// Lower bound for Moderate (default: 65)
    pub moderate: Option<f64>,
    /// Lower bound for Suboptimal (default: 50)
    pub suboptimal: Option<f64>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub data_path: PathBuf,
    pub profile: Profile,
    pub model_label: String,
    pub bar_thresholds: StatusThresholds,
    pub readiness_breakpoints: ReadinessBreakpoints,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl BarThresholdConfig {
    fn merged(&self) -> StatusThresholds {
        let d = StatusThresholds::default();
        StatusThresholds {
            excellent: self.excellent.unwrap_or(d.excellent),
            good: self.good.unwrap_or(d.good),
            moderate: self.moderate.unwrap_or(d.moderate),
        }
    }
}

impl ReadinessBandConfig {
    fn merged(&self) -> ReadinessBreakpoints {
        let d = ReadinessBreakpoints::default();
        ReadinessBreakpoints {
            peak: self.peak.unwrap_or(d.peak),
            high: self.high.unwrap_or(d.high),
            moderate: self.moderate.unwrap_or(d.moderate),
            suboptimal: self.suboptimal.unwrap_or(d.suboptimal),
        }
    }
}

/// Check that every value is in [0, 100] and strictly descending
fn validate_descending(group: &str, values: &[(&str, f64)]) -> Result<()> {
    for (name, value) in values {
        if !(0.0..=100.0).contains(value) {
            anyhow::bail!("{}.{} must be within 0-100 (got {})", group, name, value);
        }
    }
    for pair in values.windows(2) {
        let (upper_name, upper) = pair[0];
        let (lower_name, lower) = pair[1];
        if upper <= lower {
            anyhow::bail!(
                "{}.{} ({}) must be greater than {}.{} ({})",
                group,
                upper_name,
                upper,
                group,
                lower_name,
                lower
            );
        }
    }
    Ok(())
}

impl WellboardConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref t) = self.bar_thresholds {
            let t = t.merged();
            validate_descending(
                "bar_thresholds",
                &[
                    ("excellent", t.excellent),
                    ("good", t.good),
                    ("moderate", t.moderate),
                ],
            )?;
        }

        if let Some(ref b) = self.readiness_bands {
            let b = b.merged();
            validate_descending(
                "readiness_bands",
                &[
                    ("peak", b.peak),
                    ("high", b.high),
                    ("moderate", b.moderate),
                    ("suboptimal", b.suboptimal),
                ],
            )?;
        }

        if let Some(ref label) = self.model_label {
            if label.trim().is_empty() {
                anyhow::bail!("model_label must not be empty");
            }
        }

        if let Some(ref data) = self.data {
            if data.as_os_str().is_empty() {
                anyhow::bail!("data must not be an empty path");
            }
        }

        Ok(())
    }

    /// Resolve into a `ResolvedConfig`; `base_dir` anchors a relative data path
    pub fn resolve(&self, base_dir: &Path) -> Result<ResolvedConfig> {
        self.validate()?;

        let data_path = match &self.data {
            Some(p) if p.is_relative() => base_dir.join(p),
            Some(p) => p.clone(),
            None => base_dir.join(DEFAULT_DATA_FILE),
        };

        Ok(ResolvedConfig {
            data_path,
            profile: self.profile.unwrap_or_default(),
            model_label: self
                .model_label
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_LABEL.to_string()),
            bar_thresholds: self
                .bar_thresholds
                .as_ref()
                .map(BarThresholdConfig::merged)
                .unwrap_or_default(),
            readiness_breakpoints: self
                .readiness_bands
                .as_ref()
                .map(ReadinessBandConfig::merged)
                .unwrap_or_default(),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Create a default resolved config anchored at `base_dir`
    pub fn defaults(base_dir: &Path) -> Result<Self> {
        WellboardConfig::default().resolve(base_dir)
    }

    /// Report options carried by this config
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            profile: self.profile,
            bar_thresholds: self.bar_thresholds,
            readiness_breakpoints: self.readiness_breakpoints,
            model_label: self.model_label.clone(),
        }
    }
}

/// Discover a config file in the given directory
///
/// Returns the parsed config and the path it was loaded from, or None.
pub fn discover_config(dir: &Path) -> Result<Option<(WellboardConfig, PathBuf)>> {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from a specific file path
pub fn load_config_file(path: &Path) -> Result<WellboardConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: WellboardConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(config)
}

/// Load and resolve configuration
///
/// If `config_path` is provided, loads from that path.
/// Otherwise, searches `dir`. Falls back to defaults if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let found = match config_path {
        Some(path) => Some((load_config_file(path)?, path.to_path_buf())),
        None => discover_config(dir)?,
    };

    match found {
        Some((config, path)) => {
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            let mut resolved = config.resolve(&base_dir)?;
            resolved.config_path = Some(path);
            Ok(resolved)
        }
        None => ResolvedConfig::defaults(dir),
    }
}
