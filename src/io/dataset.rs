//! Loads the exported JSON dataset into canonical load records.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::report::record::{LoadRecord, RawLoadRecord};

/// Parses dataset JSON text.
///
/// Accepts a bare array of rows or an object with a `rows` array. Rows that
/// are not JSON objects are skipped with a warning; every object row is
/// kept, with unusable numeric fields normalized to zero.
///
/// # Errors
///
/// Returns a message if the text is not JSON or has neither accepted shape.
pub fn parse_records(json: &str) -> std::result::Result<Vec<LoadRecord>, String> {
    let doc: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
    let rows = match doc {
        Value::Array(rows) => rows,
        Value::Object(mut obj) => match obj.remove("rows") {
            Some(Value::Array(rows)) => rows,
            _ => return Err("expected a `rows` array".to_string()),
        },
        _ => return Err("expected an array of rows or an object with `rows`".to_string()),
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        match &row {
            Value::Object(map) => records.push(LoadRecord::from_raw(&RawLoadRecord::from_row(map))),
            _ => tracing::warn!(row = i, "skipping dataset row that is not an object"),
        }
    }
    Ok(records)
}

/// Reads and parses the dataset file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Dataset`]
/// if its content is not a dataset.
pub fn load_records(path: &Path) -> Result<Vec<LoadRecord>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&content).map_err(|message| Error::Dataset {
        path: path.to_path_buf(),
        message,
    })?;
    tracing::info!(path = %path.display(), records = records.len(), "loaded dataset");
    Ok(records)
}
