//! Dataset conversion from headered CSV to a JSON record collection.
//!
//! Converts row-per-record tabular data into an array of flat string-valued
//! JSON objects, 1:1, with field names taken verbatim from the header row.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use serde::Serialize as _;
use serde_json::Value;

use crate::StoreError;

/// Converts a headered delimited file to a JSON array of flat objects.
///
/// Every row becomes one object whose keys are the header column names and
/// whose values are the row's fields as strings. Row order is preserved.
/// Returns the number of converted rows.
///
/// # Errors
///
/// Returns [`StoreError`] if the input cannot be read or parsed, or the
/// output cannot be written.
pub fn csv_to_json(input: &Path, output: &Path) -> Result<usize, StoreError> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let mut object = serde_json::Map::new();
        for (key, value) in headers.iter().zip(record.iter()) {
            object.insert(key.to_string(), Value::String(value.to_string()));
        }
        rows.push(Value::Object(object));
    }

    let count = rows.len();
    write_json_pretty(output, &Value::Array(rows))?;

    Ok(count)
}

/// Writes a JSON value with 4-space indentation, overwriting `path` in full.
///
/// # Errors
///
/// Returns [`StoreError`] if the file cannot be created or serialization
/// fails.
pub fn write_json_pretty(path: &Path, value: &Value) -> Result<(), StoreError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer)?;

    writer.flush()?;

    Ok(())
}
