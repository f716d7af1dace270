//! JSON record files: an array of objects, or a single object.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::{Mapping, StoreError, StoreResult, check_path, check_readable};

/// Reads every object in the file at `path`.
pub fn read(path: impl AsRef<Path>) -> StoreResult<Vec<Mapping>> {
    let path = path.as_ref();
    check_readable(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let records = match value {
        Value::Object(record) => vec![record],
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(StoreError::InvalidData(format!(
                    "element {i} is not an object: {other}"
                ))),
            })
            .collect::<StoreResult<Vec<_>>>()?,
        other => {
            return Err(StoreError::InvalidData(format!(
                "expected an object or an array of objects, found {other}"
            )));
        }
    };
    debug!(path = %path.display(), records = records.len(), "json records read");
    Ok(records)
}

/// Writes `records` to `path` as a JSON array.
pub fn write(records: &[Mapping], path: impl AsRef<Path>, pretty: bool) -> StoreResult<()> {
    let path = path.as_ref();
    check_path(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, records)?;
    } else {
        serde_json::to_writer(&mut writer, records)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), records = records.len(), "json records written");
    Ok(())
}
