//! Record files for dtokit.
//!
//! Reads and writes sequences of flat mappings as JSON or CSV. The store
//! knows nothing about DTOs: callers hydrate DTOs from the mappings it
//! returns and hand it normalized mappings to save.

pub mod csv;
mod error;
mod format;
pub mod json;

use std::path::Path;

pub use error::{StoreError, StoreResult};
pub use format::{RecordFormat, StoreOptions};

/// Flat key/value record, in file order.
pub type Mapping = serde_json::Map<String, serde_json::Value>;

/// Reads `path` in the format named by its extension.
pub fn read_records(path: impl AsRef<Path>, options: &StoreOptions) -> StoreResult<Vec<Mapping>> {
    let path = path.as_ref();
    match RecordFormat::from_path(path)? {
        RecordFormat::Json => json::read(path),
        RecordFormat::Csv => csv::read(path, options.delimiter),
    }
}

/// Writes `records` to `path` in the format named by its extension.
pub fn write_records(
    records: &[Mapping],
    path: impl AsRef<Path>,
    options: &StoreOptions,
) -> StoreResult<()> {
    let path = path.as_ref();
    match RecordFormat::from_path(path)? {
        RecordFormat::Json => json::write(records, path, options.pretty),
        RecordFormat::Csv => csv::write(records, path, options.delimiter),
    }
}

/// Rejects an empty path.
fn check_path(path: &Path) -> StoreResult<()> {
    if path.as_os_str().is_empty() {
        return Err(StoreError::EmptyPath);
    }
    Ok(())
}

/// Rejects an empty path or one that is not an existing file.
fn check_readable(path: &Path) -> StoreResult<()> {
    check_path(path)?;
    if !path.is_file() {
        return Err(StoreError::Missing(path.to_path_buf()));
    }
    Ok(())
}
