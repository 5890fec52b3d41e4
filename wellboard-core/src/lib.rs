//! Wellboard core library - per-user wellness reports from tabular data

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Input data is read-only; records are never mutated after load
// - Derivation and chart building are pure functions
// - No global mutable state; caching is owned by `ReportSession`
// - Identical input yields byte-for-byte identical output

pub mod charts;
pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod record;
pub mod render;
pub mod report;
pub mod session;
pub mod status;
pub mod tiles;

pub use config::ResolvedConfig;
pub use error::DataError;
pub use loader::{load_records, parse_records};
pub use record::WellnessRecord;
pub use render::{render_json, render_text};
pub use report::{compose, Profile, Report, ReportOptions};
pub use session::ReportSession;

/// Load a data file and compose the report for one user
pub fn build_report(
    path: &std::path::Path,
    selection: Option<&str>,
    options: &ReportOptions,
) -> Result<Report, DataError> {
    let records = load_records(path)?;
    Ok(compose(&records, selection, options))
}
