#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! One-shot scaling of allocated emergency-resource datasets.
//!
//! Reads a JSON array of flat allocation entries, replaces each targeted
//! resource field with 10% of its current value (floored, minimum 1), and
//! overwrites the file in full. The whole collection is transformed in
//! memory before any byte is written, so a failure never leaves a partially
//! scaled file behind.
//!
//! The transform is intentionally NOT idempotent: applying it twice shrinks
//! values twice. It is a single, well-defined one-shot scaling.

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

/// The integer-valued resource fields that get scaled, stored as decimal
/// strings in the dataset.
pub const ALLOCATED_FIELDS: [&str; 5] = [
    "Allocated_Fire_Brigade_Vehicles",
    "Allocated_Ambulances",
    "Allocated_Police_Personnel",
    "Allocated_Paramedics",
    "Allocated_Doctors",
];

/// Errors that can occur while scaling an allocation dataset.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON or not an array of objects.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the transformed dataset failed.
    #[error(transparent)]
    Store(#[from] safety_calls_store::StoreError),

    /// An entry is missing one of the targeted fields.
    #[error("Entry {index} is missing field {field}")]
    MissingField {
        /// Zero-based entry index.
        index: usize,
        /// The absent field name.
        field: &'static str,
    },

    /// A targeted field holds a value that cannot be read as an integer.
    #[error("Entry {index} field {field} is not numeric: {value}")]
    NonNumeric {
        /// Zero-based entry index.
        index: usize,
        /// The offending field name.
        field: &'static str,
        /// The value that failed to parse.
        value: String,
    },
}

/// Scales one allocation value: 10% of the current value, floored,
/// clamped to a minimum of 1.
#[must_use]
pub const fn scale_value(value: i64) -> i64 {
    let scaled = value.div_euclid(10);
    if scaled < 1 { 1 } else { scaled }
}

/// Reads the allocation dataset at `path`, scales every targeted field of
/// every entry via [`scale_value`], and overwrites the file with the
/// transformed collection (4-space-indented JSON). Returns the number of
/// entries updated.
///
/// # Errors
///
/// Returns [`AllocationError`] if the file is missing or unparsable, or
/// any entry lacks a targeted field or holds a non-numeric value. No
/// partial write occurs on failure.
pub fn scale_allocations(path: &Path) -> Result<usize, AllocationError> {
    let raw = std::fs::read_to_string(path)?;
    let mut entries: Vec<Map<String, Value>> = serde_json::from_str(&raw)?;

    for (index, entry) in entries.iter_mut().enumerate() {
        for field in ALLOCATED_FIELDS {
            let current = read_integer_field(entry, index, field)?;
            entry.insert(
                field.to_string(),
                Value::String(scale_value(current).to_string()),
            );
        }
    }

    let count = entries.len();
    let collection = Value::Array(entries.into_iter().map(Value::Object).collect());
    safety_calls_store::convert::write_json_pretty(path, &collection)?;

    log::info!(
        "Scaled allocated resources for {count} entries in {}",
        path.display()
    );

    Ok(count)
}

/// Reads a targeted field as an integer, accepting both decimal strings
/// and JSON numbers.
fn read_integer_field(
    entry: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<i64, AllocationError> {
    let value = entry
        .get(field)
        .ok_or(AllocationError::MissingField { index, field })?;

    let non_numeric = || AllocationError::NonNumeric {
        index,
        field,
        value: value.to_string(),
    };

    match value {
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| non_numeric()),
        Value::Number(n) => n.as_i64().ok_or_else(non_numeric),
        _ => Err(non_numeric()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_json(doctors: &str) -> String {
        format!(
            r#"[{{
    "Zone": "Andheri",
    "Allocated_Fire_Brigade_Vehicles": "30",
    "Allocated_Ambulances": "25",
    "Allocated_Police_Personnel": "120",
    "Allocated_Paramedics": "40",
    "Allocated_Doctors": {doctors}
}}]"#
        )
    }

    fn doctors_after(path: &Path) -> String {
        let json: Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        json[0]["Allocated_Doctors"].as_str().unwrap().to_string()
    }

    #[test]
    fn scale_value_floors_and_clamps() {
        assert_eq!(scale_value(7), 1);
        assert_eq!(scale_value(50), 5);
        assert_eq!(scale_value(10), 1);
        assert_eq!(scale_value(199), 19);
        assert_eq!(scale_value(0), 1);
    }

    #[test]
    fn scales_string_valued_fields_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.json");
        std::fs::write(&path, entry_json("\"50\"")).unwrap();

        let count = scale_allocations(&path).unwrap();
        assert_eq!(count, 1);

        let json: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json[0]["Allocated_Doctors"], "5");
        assert_eq!(json[0]["Allocated_Fire_Brigade_Vehicles"], "3");
        assert_eq!(json[0]["Allocated_Ambulances"], "2");
        assert_eq!(json[0]["Allocated_Police_Personnel"], "12");
        assert_eq!(json[0]["Allocated_Paramedics"], "4");
        // Untargeted fields pass through untouched.
        assert_eq!(json[0]["Zone"], "Andheri");
    }

    #[test]
    fn small_values_clamp_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.json");
        std::fs::write(&path, entry_json("\"7\"")).unwrap();

        scale_allocations(&path).unwrap();
        assert_eq!(doctors_after(&path), "1");
    }

    #[test]
    fn repeated_application_keeps_shrinking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.json");
        std::fs::write(&path, entry_json("\"500\"")).unwrap();

        scale_allocations(&path).unwrap();
        assert_eq!(doctors_after(&path), "50");

        scale_allocations(&path).unwrap();
        assert_eq!(doctors_after(&path), "5");
    }

    #[test]
    fn missing_field_is_fatal_and_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.json");
        let original = r#"[{"Zone": "Andheri", "Allocated_Doctors": "7"}]"#;
        std::fs::write(&path, original).unwrap();

        let err = scale_allocations(&path).unwrap_err();
        assert!(matches!(err, AllocationError::MissingField { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn non_numeric_field_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.json");
        std::fs::write(&path, entry_json("\"plenty\"")).unwrap();

        let err = scale_allocations(&path).unwrap_err();
        assert!(matches!(err, AllocationError::NonNumeric { .. }));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = scale_allocations(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(AllocationError::Io(_))));
    }
}
