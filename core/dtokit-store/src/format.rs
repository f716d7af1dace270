use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{StoreError, StoreResult};

/// On-disk layout of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Options shared by record readers and writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Indent JSON output.
    #[serde(default)]
    pub pretty: bool,
    /// CSV field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: u8,
}

fn default_delimiter() -> u8 {
    b','
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            delimiter: default_delimiter(),
        }
    }
}
