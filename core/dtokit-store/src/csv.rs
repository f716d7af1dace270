//! CSV record files. The first row is the header; every value is read
//! back as a string.

use std::path::Path;

use ::csv::{ReaderBuilder, WriterBuilder};
use serde_json::Value;
use tracing::debug;

use crate::{Mapping, StoreError, StoreResult, check_path, check_readable};

/// Reads every row of the file at `path`, keyed by the header row.
pub fn read(path: impl AsRef<Path>, delimiter: u8) -> StoreResult<Vec<Mapping>> {
    let path = path.as_ref();
    check_readable(path)?;
    let mut reader = ReaderBuilder::new().delimiter(delimiter).from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Mapping = headers
            .iter()
            .zip(row.iter())
            .map(|(key, cell)| (key.to_string(), Value::String(cell.to_string())))
            .collect();
        records.push(record);
    }
    debug!(path = %path.display(), records = records.len(), "csv records read");
    Ok(records)
}

/// Writes `records` to `path`, with the first record's keys as header.
///
/// Absent keys and `null` values become empty cells; a key missing from
/// the header is rejected before anything is written.
pub fn write(records: &[Mapping], path: impl AsRef<Path>, delimiter: u8) -> StoreResult<()> {
    let path = path.as_ref();
    check_path(path)?;
    let first = records.first().ok_or(StoreError::EmptyData)?;
    if first.is_empty() {
        return Err(StoreError::EmptyRecord);
    }
    let header: Vec<&str> = first.keys().map(String::as_str).collect();
    for (i, record) in records.iter().enumerate() {
        if let Some(key) = record.keys().find(|key| !first.contains_key(*key)) {
            return Err(StoreError::InvalidData(format!(
                "record {i} has key {key} which is not in the header"
            )));
        }
    }

    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|key| cell(record.get(*key))))?;
    }
    writer.flush()?;
    debug!(path = %path.display(), records = records.len(), "csv records written");
    Ok(())
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
