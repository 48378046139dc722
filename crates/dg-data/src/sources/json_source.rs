use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use serde_json::Value;
use tracing::info;

use super::{LoadedRecords, RecordSource};
use crate::DataError;

/// JSON file holding an array of record objects
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate a parsed document and collect field names in first-seen order
    pub fn records_from_value(document: Value) -> Result<LoadedRecords, DataError> {
        let items = match document {
            Value::Array(items) => items,
            other => {
                return Err(DataError::UnsupportedFormat(format!(
                    "expected a JSON array of records, found {}",
                    kind_name(&other)
                )))
            }
        };

        let mut columns = Vec::new();
        let mut seen = AHashSet::new();
        for (row, item) in items.iter().enumerate() {
            let Value::Object(object) = item else {
                return Err(DataError::InvalidRecord {
                    row: row + 1,
                    reason: format!("expected an object, found {}", kind_name(item)),
                });
            };
            for key in object.keys() {
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
            }
        }

        Ok(LoadedRecords {
            columns,
            records: items,
        })
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl RecordSource for JsonSource {
    fn source_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }

    fn load(&self) -> Result<LoadedRecords, DataError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let document: Value = serde_json::from_reader(reader)?;
        let loaded = Self::records_from_value(document)?;

        info!(
            "Loaded {} records ({} fields) from {}",
            loaded.len(),
            loaded.columns.len(),
            self.source_name()
        );
        Ok(loaded)
    }
}
