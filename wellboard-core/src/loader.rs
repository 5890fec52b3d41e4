//! Record loader
//!
//! Reads a comma-delimited file with a header row into `WellnessRecord`s.
//!
//! Invariants:
//! - Row order of the file is preserved
//! - Every declared numeric field parses or the whole load fails
//! - Unknown columns pass through into `WellnessRecord::extra`
//! - Rows may stop early; only required cells must be present

use crate::error::DataError;
use crate::record::{
    is_known_column, ForecastFields, Insight, WellnessRecord, REQUIRED_COLUMNS,
};
use csv::StringRecord;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

/// Load all records from a data file
pub fn load_records(path: &Path) -> Result<Vec<WellnessRecord>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DataError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let records = parse_records(file, path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded wellness data");
    Ok(records)
}

/// Parse records from any reader; `source` only labels errors
pub fn parse_records<R: Read>(reader: R, source: &Path) -> Result<Vec<WellnessRecord>, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| read_error(source, 0, e))?
        .clone();

    // A completely empty file is an empty dataset, not a schema error
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let columns = ColumnIndex::new(&headers, source)?;

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row_no = idx + 1;
        let row = result.map_err(|e| read_error(source, row_no, e))?;
        if row.len() > columns.width {
            return Err(DataError::TooManyFields {
                path: source.to_path_buf(),
                row: row_no,
                expected: columns.width,
                found: row.len(),
            });
        }
        let fields = RowFields {
            row: &row,
            columns: &columns,
            source,
            row_no,
        };
        records.push(fields.into_record()?);
    }

    Ok(records)
}

fn read_error(source: &Path, row: usize, err: csv::Error) -> DataError {
    if err.is_io_error() {
        DataError::Io {
            path: source.to_path_buf(),
            source: err.into(),
        }
    } else {
        DataError::Malformed {
            path: source.to_path_buf(),
            row,
            source: err,
        }
    }
}

/// Header name to position lookup
struct ColumnIndex {
    positions: HashMap<String, usize>,
    extra: Vec<(String, usize)>,
    width: usize,
}

impl ColumnIndex {
    fn new(headers: &StringRecord, source: &Path) -> Result<Self, DataError> {
        let mut positions = HashMap::new();
        let mut extra = Vec::new();
        for (pos, name) in headers.iter().enumerate() {
            // First occurrence of a duplicated header wins
            if positions.contains_key(name) {
                continue;
            }
            positions.insert(name.to_string(), pos);
            if !is_known_column(name) {
                extra.push((name.to_string(), pos));
            }
        }

        for &column in REQUIRED_COLUMNS {
            if !positions.contains_key(column) {
                return Err(DataError::MissingColumn {
                    path: source.to_path_buf(),
                    column,
                });
            }
        }

        Ok(ColumnIndex {
            positions,
            extra,
            width: headers.len(),
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// Typed access to one data row
struct RowFields<'a> {
    row: &'a StringRecord,
    columns: &'a ColumnIndex,
    source: &'a Path,
    row_no: usize,
}

impl RowFields<'_> {
    fn text(&self, field: &str) -> String {
        self.columns
            .position(field)
            .and_then(|pos| self.row.get(pos))
            .unwrap_or("")
            .to_string()
    }

    fn float(&self, field: &'static str) -> Result<f64, DataError> {
        let raw = self.text(field);
        raw.trim()
            .parse::<f64>()
            .map_err(|_| self.invalid(field, raw, "number"))
    }

    fn integer(&self, field: &'static str) -> Result<i64, DataError> {
        let raw = self.text(field);
        raw.trim()
            .parse::<i64>()
            .map_err(|_| self.invalid(field, raw, "integer"))
    }

    fn invalid(&self, field: &'static str, value: String, expected: &'static str) -> DataError {
        DataError::InvalidField {
            path: self.source.to_path_buf(),
            row: self.row_no,
            field,
            value,
            expected,
        }
    }

    fn insight(&self, n: u8) -> Insight {
        let action = if n == 1 {
            self.text("insight_1_action")
        } else {
            String::new()
        };
        Insight {
            kind: self.text(&format!("insight_{n}_type")),
            category: self.text(&format!("insight_{n}_category")),
            title: self.text(&format!("insight_{n}_title")),
            message: self.text(&format!("insight_{n}_message")),
            action,
        }
    }

    fn check_required(&self) -> Result<(), DataError> {
        for &field in REQUIRED_COLUMNS {
            let present = self
                .columns
                .position(field)
                .is_some_and(|pos| pos < self.row.len());
            if !present {
                return Err(DataError::MissingField {
                    path: self.source.to_path_buf(),
                    row: self.row_no,
                    field,
                });
            }
        }
        Ok(())
    }

    fn into_record(self) -> Result<WellnessRecord, DataError> {
        self.check_required()?;

        let extra: BTreeMap<String, String> = self
            .columns
            .extra
            .iter()
            .map(|(name, pos)| (name.clone(), self.row.get(*pos).unwrap_or("").to_string()))
            .collect();

        Ok(WellnessRecord {
            full_name: self.text("full_name"),
            date: self.text("date"),
            readiness_score: self.float("readiness_score")?,
            hrv_proxy: self.float("hrv_proxy")?,
            sleep_efficiency: self.float("sleep_efficiency")?,
            stress_level: self.integer("stress_level")?,
            mental_clarity: self.integer("mental_clarity")?,
            recovery_score: self.integer("recovery_score")?,
            energy_level: self.integer("energy_level")?,
            training_load: self.float("training_load")?,
            anabolic_index: self.float("anabolic_index")?,
            circadian_score: self.float("circadian_score")?,
            cognitive_load: self.float("cognitive_load")?,
            forecast: ForecastFields {
                day1_optimistic: self.float("day1_optimistic")?,
                day1_baseline: self.float("day1_baseline")?,
                day1_pessimistic: self.float("day1_pessimistic")?,
                day2_optimistic: self.float("day2_optimistic")?,
                day2_baseline: self.float("day2_baseline")?,
                day3_optimistic: self.float("day3_optimistic")?,
                day3_baseline: self.float("day3_baseline")?,
            },
            wellness_goals: self.text("wellness_goals"),
            pain_point: self.text("pain_point"),
            insights: [self.insight(1), self.insight(2), self.insight(3)],
            extra,
        })
    }
}
