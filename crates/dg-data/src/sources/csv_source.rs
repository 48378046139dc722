use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde_json::{Map, Number, Value};
use tracing::{info, warn};

use super::{LoadedRecords, RecordSource};
use crate::config::NullConfig;
use crate::DataError;

/// CSV file source producing one JSON object per row
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    null_config: NullConfig,
    delimiter: u8,
    /// Parse numeric and boolean cells instead of keeping every cell as text
    infer_types: bool,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            null_config: NullConfig::default(),
            delimiter: b',',
            infer_types: true,
        }
    }

    pub fn with_null_config(mut self, null_config: NullConfig) -> Self {
        self.null_config = null_config;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convert one raw cell
    fn parse_cell(&self, raw: &str) -> Value {
        let Some(text) = self.null_config.clean(raw) else {
            return Value::Null;
        };
        if self.infer_types {
            if let Some(value) = infer_scalar(text) {
                return value;
            }
        }
        Value::String(text.to_string())
    }
}

/// Numbers and booleans. Zero-padded digits such as postal codes stay text.
fn infer_scalar(text: &str) -> Option<Value> {
    if text.eq_ignore_ascii_case("true") {
        return Some(Value::Bool(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(Value::Bool(false));
    }

    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.") {
        return None;
    }

    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::from(int));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

impl RecordSource for CsvSource {
    fn source_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }

    fn load(&self) -> Result<LoadedRecords, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(&self.path)?;

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();

        let mut records = Vec::new();
        let mut skipped = 0;

        for (idx, result) in reader.records().enumerate() {
            // Line numbers as shown in an editor, header included
            let line = idx + 2;
            let row = match result {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable CSV row at line {}: {}", line, e);
                    skipped += 1;
                    continue;
                }
            };

            if row.len() != columns.len() {
                warn!(
                    "Skipping CSV row at line {}: expected {} fields, found {}",
                    line,
                    columns.len(),
                    row.len()
                );
                skipped += 1;
                continue;
            }

            let object: Map<String, Value> = columns
                .iter()
                .zip(row.iter())
                .map(|(column, raw)| (column.clone(), self.parse_cell(raw)))
                .collect();
            records.push(Value::Object(object));
        }

        info!(
            "Loaded {} rows ({} columns) from {}, skipped {}",
            records.len(),
            columns.len(),
            self.source_name(),
            skipped
        );

        Ok(LoadedRecords { columns, records })
    }
}
