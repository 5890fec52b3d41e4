//! Data errors raised while loading a wellness dataset
//!
//! Every variant is fatal for the load that produced it: a report is never
//! composed from a partially valid dataset.

use std::path::PathBuf;

/// Failure to turn a data file into valid records
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("data source not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: required column `{column}` is missing from the header", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}: row {row}: field `{field}` = {value:?} is not a valid {expected}", path.display())]
    InvalidField {
        path: PathBuf,
        row: usize,
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{}: row {row}: required field `{field}` is missing", path.display())]
    MissingField {
        path: PathBuf,
        row: usize,
        field: &'static str,
    },

    #[error("{}: row {row}: found {found} fields, header has {expected}", path.display())]
    TooManyFields {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}: row {row}: malformed record: {source}", path.display())]
    Malformed {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },
}

impl DataError {
    /// Path of the data source the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            DataError::NotFound { path }
            | DataError::Io { path, .. }
            | DataError::MissingColumn { path, .. }
            | DataError::InvalidField { path, .. }
            | DataError::MissingField { path, .. }
            | DataError::TooManyFields { path, .. }
            | DataError::Malformed { path, .. } => path,
        }
    }
}
