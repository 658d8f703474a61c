#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Append-only persistence for cleaned call records.
//!
//! The call table is a flat comma-delimited text file. The header row is
//! written exactly once, when a fresh file is created; after that the store
//! only ever appends. Rows are never rewritten, truncated, or deduplicated
//! across invocations -- re-running a date range appends duplicate rows.
//!
//! Delimiter safety is the cleaner's responsibility: descriptions that
//! contain the delimiter arrive already quote-wrapped, so rows are written
//! verbatim by joining fields.

pub mod convert;

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use safety_calls_models::{CALL_COLUMNS, IncidentRecord};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading a delimited input file failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only handle for the persisted call table.
pub struct CallStore {
    path: PathBuf,
}

impl CallStore {
    /// Creates a store handle for the given path. The file itself is only
    /// created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row per record, in field order, writing the header row
    /// first when the backing file does not exist yet.
    ///
    /// The file is opened, appended, and closed within this call; no lock
    /// is held between batches.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be opened or written.
    pub fn append(&self, records: &[IncidentRecord]) -> Result<(), StoreError> {
        let exists = self.path.exists();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if !exists {
            writeln!(file, "{}", CALL_COLUMNS.join(","))?;
        }

        for record in records {
            writeln!(file, "{}", record.to_row())?;
        }

        log::debug!(
            "Appended {} record(s) to {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pincode: &str) -> IncidentRecord {
        let fields: Vec<String> = [
            "2024-06-15",
            "Violence",
            "Mumbai",
            "19.1075",
            "72.8654",
            "2.0",
            "9",
            "Domestic Violence",
            "1.5",
            "Assaulted at home",
            "True",
            pincode,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        IncidentRecord::from_fields(&fields).unwrap()
    }

    #[test]
    fn first_append_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CallStore::new(dir.path().join("calls.csv"));

        store.append(&[record("400053")]).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CALL_COLUMNS.join(","));
        assert!(lines[1].starts_with("2024-06-15,Violence,Mumbai"));
    }

    #[test]
    fn subsequent_appends_skip_header_and_preserve_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = CallStore::new(dir.path().join("calls.csv"));

        store.append(&[record("400053")]).unwrap();
        store.append(&[record("110001"), record("600001")]).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], CALL_COLUMNS.join(","));
        assert!(lines[1].ends_with("400053"));
        assert!(lines[2].ends_with("110001"));
        assert!(lines[3].ends_with("600001"));
    }

    #[test]
    fn append_of_empty_batch_still_creates_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = CallStore::new(dir.path().join("calls.csv"));

        store.append(&[]).unwrap();
        store.append(&[]).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
