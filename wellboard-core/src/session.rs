//! Report session
//!
//! Owns one data source and its cached load. Records are read once and shared
//! until the session is invalidated or the file's modification time or length
//! changes.

use crate::error::DataError;
use crate::loader::load_records;
use crate::record::WellnessRecord;
use crate::report::{compose, Report, ReportOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

struct CachedLoad {
    records: Arc<Vec<WellnessRecord>>,
    stamp: Option<FileStamp>,
}

/// Change-detection key of the backing file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

/// Lifecycle-scoped cache over one data file
pub struct ReportSession {
    path: PathBuf,
    cache: Option<CachedLoad>,
}

impl ReportSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ReportSession {
            path: path.into(),
            cache: None,
        }
    }

    /// Whether a load is currently cached
    pub fn is_loaded(&self) -> bool {
        self.cache.is_some()
    }

    /// Records of the data source, loading them on first use
    pub fn records(&mut self) -> Result<Arc<Vec<WellnessRecord>>, DataError> {
        if let Some(cache) = &self.cache {
            tracing::debug!(path = %self.path.display(), "using cached wellness data");
            return Ok(Arc::clone(&cache.records));
        }
        self.load()
    }

    /// Drop the cached load; the next `records()` re-reads the file
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            tracing::debug!(path = %self.path.display(), "invalidated cached wellness data");
        }
    }

    /// Reload if the file changed since it was cached
    ///
    /// Returns true when a reload happened. A session that has not loaded yet
    /// loads now and reports true.
    pub fn refresh_if_changed(&mut self) -> Result<bool, DataError> {
        let Some(cache) = &self.cache else {
            self.load()?;
            return Ok(true);
        };
        let current = file_stamp(&self.path);
        if current.is_some() && current == cache.stamp {
            return Ok(false);
        }
        tracing::debug!(path = %self.path.display(), "data source changed, reloading");
        self.cache = None;
        self.load()?;
        Ok(true)
    }

    /// Compose a report over the cached records
    pub fn report(
        &mut self,
        selection: Option<&str>,
        options: &ReportOptions,
    ) -> Result<Report, DataError> {
        let records = self.records()?;
        Ok(compose(&records, selection, options))
    }

    fn load(&mut self) -> Result<Arc<Vec<WellnessRecord>>, DataError> {
        let stamp = file_stamp(&self.path);
        let records = Arc::new(load_records(&self.path)?);
        self.cache = Some(CachedLoad {
            records: Arc::clone(&records),
            stamp,
        });
        Ok(records)
    }
}

fn file_stamp(path: &Path) -> Option<FileStamp> {
    let meta = std::fs::metadata(path).ok()?;
    Some(FileStamp {
        modified: meta.modified().ok()?,
        len: meta.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    const HEADER: &str = "full_name,date,readiness_score,hrv_proxy,sleep_efficiency,stress_level,mental_clarity,recovery_score,energy_level,training_load,anabolic_index,circadian_score,cognitive_load,day1_optimistic,day1_baseline,day1_pessimistic,day2_optimistic,day2_baseline,day3_optimistic,day3_baseline";

    fn row(name: &str) -> String {
        format!("{name},2025-01-15,78,62,88,3,7,8,6,54,6.5,7.2,4,82,77,71,85,76,87,75")
    }

    fn write_data(path: &Path, names: &[&str], mtime_secs: u64) {
        let mut text = format!("{HEADER}\n");
        for name in names {
            text.push_str(&row(name));
            text.push('\n');
        }
        fs::write(path, text).unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
            .unwrap();
    }

    #[test]
    fn test_records_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellness.csv");
        write_data(&path, &["Ada Lovelace"], 1_000);

        let mut session = ReportSession::new(&path);
        assert!(!session.is_loaded());
        let first = session.records().unwrap();
        let second = session.records().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_survives_file_edits_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellness.csv");
        write_data(&path, &["Ada Lovelace"], 1_000);

        let mut session = ReportSession::new(&path);
        assert_eq!(session.records().unwrap().len(), 1);

        write_data(&path, &["Ada Lovelace", "Grace Hopper"], 2_000);
        assert_eq!(session.records().unwrap().len(), 1);

        session.invalidate();
        assert!(!session.is_loaded());
        assert_eq!(session.records().unwrap().len(), 2);
    }

    #[test]
    fn test_refresh_if_changed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellness.csv");
        write_data(&path, &["Ada Lovelace"], 1_000);

        let mut session = ReportSession::new(&path);
        assert!(session.refresh_if_changed().unwrap());
        let before = session.records().unwrap();
        assert!(!session.refresh_if_changed().unwrap());
        assert!(Arc::ptr_eq(&before, &session.records().unwrap()));

        write_data(&path, &["Ada Lovelace", "Grace Hopper"], 2_000);
        assert!(session.refresh_if_changed().unwrap());
        assert_eq!(session.records().unwrap().len(), 2);
    }

    #[test]
    fn test_refresh_detects_rewrite_with_same_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellness.csv");
        write_data(&path, &["Ada Lovelace"], 1_000);

        let mut session = ReportSession::new(&path);
        assert_eq!(session.records().unwrap().len(), 1);

        write_data(&path, &["Ada Lovelace", "Grace Hopper"], 1_000);
        assert!(session.refresh_if_changed().unwrap());
        assert_eq!(session.records().unwrap().len(), 2);
        assert!(!session.refresh_if_changed().unwrap());
    }

    #[test]
    fn test_missing_file_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let mut session = ReportSession::new(&path);
        assert!(matches!(
            session.records(),
            Err(DataError::NotFound { .. })
        ));
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_report_uses_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wellness.csv");
        write_data(&path, &["Ada Lovelace", "Grace Hopper"], 1_000);

        let mut session = ReportSession::new(&path);
        let report = session
            .report(Some("Grace Hopper"), &ReportOptions::default())
            .unwrap();
        assert_eq!(report.selector.selected.as_deref(), Some("Grace Hopper"));
        let stale = session
            .report(Some("Removed User"), &ReportOptions::default())
            .unwrap();
        assert_eq!(stale.selector.selected.as_deref(), Some("Ada Lovelace"));
    }
}
