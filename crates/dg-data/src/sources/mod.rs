//! Record sources for loading grid data from files

pub mod csv_source;
pub mod json_source;

use std::path::Path;

use serde_json::Value;

use crate::config::NullConfig;
use crate::DataError;

pub use csv_source::CsvSource;
pub use json_source::JsonSource;

/// Records read from a source, with field names in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRecords {
    pub columns: Vec<String>,
    pub records: Vec<Value>,
}

impl LoadedRecords {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Something that can produce a record collection
pub trait RecordSource {
    /// Name used in log messages
    fn source_name(&self) -> String;

    fn load(&self) -> Result<LoadedRecords, DataError>;
}

/// Pick a source for `path` by its extension
pub fn open_source(path: &Path, null_config: NullConfig) -> Result<Box<dyn RecordSource>, DataError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" | "tsv" => {
            let source = CsvSource::new(path).with_null_config(null_config);
            let source = if extension == "tsv" {
                source.with_delimiter(b'\t')
            } else {
                source
            };
            Ok(Box::new(source))
        }
        "json" => Ok(Box::new(JsonSource::new(path))),
        _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
    }
}
