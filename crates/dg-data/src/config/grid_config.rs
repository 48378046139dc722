//! Grid configuration

use std::path::Path;

use ahash::AHashSet;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use dg_core::{CellValue, ColumnDescriptor, ColumnSet, RangeOptions, Record, ViewState};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::null_handling::NullConfig;
use crate::DataError;

/// Value type a configured column coerces its field to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Use the field as loaded
    #[default]
    Auto,
    Text,
    Number,
    Date,
    Bool,
}

impl ColumnKind {
    /// Convert `value` to this kind. Values that do not convert become null.
    pub fn coerce(self, value: CellValue) -> CellValue {
        match (self, value) {
            (_, CellValue::Null) => CellValue::Null,
            (ColumnKind::Auto, value) => value,

            (ColumnKind::Text, CellValue::Text(s)) => CellValue::Text(s),
            (ColumnKind::Text, other) => CellValue::Text(other.to_string()),

            (ColumnKind::Number, CellValue::Number(n)) => CellValue::Number(n),
            (ColumnKind::Number, CellValue::Bool(b)) => CellValue::Number(if b { 1.0 } else { 0.0 }),
            (ColumnKind::Number, CellValue::Text(s)) => {
                s.trim().parse::<f64>().map(CellValue::Number).unwrap_or_default()
            }

            (ColumnKind::Date, CellValue::Date(d)) => CellValue::Date(d),
            (ColumnKind::Date, CellValue::Text(s)) => parse_date(&s).into(),
            (ColumnKind::Date, CellValue::Number(ms)) => {
                Utc.timestamp_millis_opt(ms as i64).single().into()
            }

            (ColumnKind::Bool, CellValue::Bool(b)) => CellValue::Bool(b),
            (ColumnKind::Bool, CellValue::Number(n)) => CellValue::Bool(n != 0.0),
            (ColumnKind::Bool, CellValue::Text(s)) => parse_bool(&s).into(),

            _ => CellValue::Null,
        }
    }
}

/// RFC 3339 timestamps, or plain `YYYY-MM-DD` dates at midnight UTC
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn default_sortable() -> bool {
    true
}

/// One configured column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Field key or dotted path
    pub key: String,

    /// Header text; the key when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub kind: ColumnKind,

    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

impl ColumnConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            kind: ColumnKind::Auto,
            sortable: true,
        }
    }

    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build the column descriptor for JSON records
    pub fn descriptor(&self) -> ColumnDescriptor<Value> {
        let mut column = ColumnDescriptor::new(self.key.clone())
            .with_label(self.label.clone().unwrap_or_else(|| self.key.clone()))
            .sortable(self.sortable);

        if self.kind != ColumnKind::Auto {
            let key = self.key.clone();
            let kind = self.kind;
            column = column.with_accessor(move |record: &Value| kind.coerce(record.lookup(&key)));
        }
        column
    }
}

/// Settings of one grid view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows per page; 0 shows every row
    pub page_size: usize,
    pub sibling_count: usize,
    pub boundary_count: usize,
    pub show_first_last: bool,
    pub show_prev_next: bool,
    /// Longer cell texts are truncated when rendered
    pub max_cell_width: usize,
    pub show_row_numbers: bool,
    /// Displayed columns; empty means every field found in the records
    pub columns: Vec<ColumnConfig>,
    pub null_config: NullConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            sibling_count: 1,
            boundary_count: 1,
            show_first_last: true,
            show_prev_next: true,
            max_cell_width: 50,
            show_row_numbers: true,
            columns: Vec::new(),
            null_config: NullConfig::default(),
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let config: GridConfig =
            serde_json::from_str(json).map_err(|e| DataError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!("Loaded grid config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        let mut seen = AHashSet::new();
        for column in &self.columns {
            if column.key.trim().is_empty() {
                return Err(DataError::Config("column key must not be empty".to_string()));
            }
            if !seen.insert(column.key.as_str()) {
                return Err(DataError::Config(format!("duplicate column key '{}'", column.key)));
            }
        }
        Ok(())
    }

    /// Range options for `page` of `page_count` with the configured spacing
    pub fn range_options(&self, page: usize, page_count: usize) -> RangeOptions {
        RangeOptions::new(page, page_count)
            .with_siblings(self.sibling_count)
            .with_boundaries(self.boundary_count)
            .first_last(self.show_first_last)
            .prev_next(self.show_prev_next)
    }

    /// Starting view: first page of `page_size` rows, or unpaged
    pub fn initial_state(&self) -> ViewState {
        ViewState::new().with_page_size(self.page_size)
    }

    /// Columns to display. `discovered` supplies the keys when none are
    /// configured.
    pub fn column_set(&self, discovered: &[String]) -> ColumnSet<Value> {
        if self.columns.is_empty() {
            discovered
                .iter()
                .map(|key| ColumnConfig::new(key.clone()).descriptor())
                .collect()
        } else {
            self.columns.iter().map(ColumnConfig::descriptor).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.sibling_count, 1);
        assert_eq!(config.boundary_count, 1);
        assert!(config.show_first_last && config.show_prev_next);
        assert_eq!(config.max_cell_width, 50);
        assert!(config.columns.is_empty());

        let state = config.initial_state();
        assert_eq!((state.page, state.page_size), (1, 10));
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let config = GridConfig::from_json_str(
            r#"{
                "page_size": 25,
                "show_first_last": false,
                "columns": [
                    { "key": "name", "label": "Name" },
                    { "key": "joined", "kind": "date", "sortable": false }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.page_size, 25);
        assert!(!config.show_first_last);
        assert_eq!(config.sibling_count, 1);
        assert_eq!(config.columns[0].label.as_deref(), Some("Name"));
        assert_eq!(config.columns[0].kind, ColumnKind::Auto);
        assert!(config.columns[0].sortable);
        assert_eq!(config.columns[1].kind, ColumnKind::Date);
        assert!(!config.columns[1].sortable);

        let options = config.range_options(3, 9);
        assert_eq!((options.page, options.page_count), (3, 9));
        assert!(!options.show_first_last);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let duplicate = r#"{ "columns": [{ "key": "a" }, { "key": "a" }] }"#;
        assert!(matches!(GridConfig::from_json_str(duplicate), Err(DataError::Config(_))));

        let blank = r#"{ "columns": [{ "key": " " }] }"#;
        assert!(matches!(GridConfig::from_json_str(blank), Err(DataError::Config(_))));

        assert!(matches!(
            GridConfig::from_json_str(r#"{ "page_size": "ten" }"#),
            Err(DataError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("dg-data-missing-grid-config.json");
        assert!(matches!(GridConfig::load(&path), Err(DataError::Io(_))));
    }

    #[test]
    fn test_column_kinds_coerce() {
        assert_eq!(ColumnKind::Number.coerce(CellValue::from(" 4.5 ")), CellValue::Number(4.5));
        assert_eq!(ColumnKind::Number.coerce(CellValue::from("abc")), CellValue::Null);
        assert_eq!(ColumnKind::Text.coerce(CellValue::from(12)), CellValue::from("12"));
        assert_eq!(ColumnKind::Bool.coerce(CellValue::from("Yes")), CellValue::Bool(true));
        assert_eq!(ColumnKind::Bool.coerce(CellValue::from("maybe")), CellValue::Null);
        assert_eq!(ColumnKind::Auto.coerce(CellValue::from("x")), CellValue::from("x"));
        assert_eq!(ColumnKind::Date.coerce(CellValue::Null), CellValue::Null);

        let midnight = CellValue::from(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single());
        assert_eq!(ColumnKind::Date.coerce(CellValue::from("2024-03-01")), midnight);
        assert_eq!(
            ColumnKind::Date.coerce(CellValue::from("2024-03-01T02:00:00+02:00")),
            midnight
        );
    }

    #[test]
    fn test_column_set_from_config_or_discovery() {
        let record = json!({ "name": "Ada", "joined": "2020-05-01", "age": "36" });

        let inferred = GridConfig::default().column_set(&["name".to_string(), "age".to_string()]);
        assert_eq!(inferred.keys().collect::<Vec<_>>(), ["name", "age"]);
        assert_eq!(inferred.field_value(&record, "age"), CellValue::from("36"));

        let config = GridConfig {
            columns: vec![
                ColumnConfig::new("age").with_kind(ColumnKind::Number).with_label("Age"),
                ColumnConfig::new("joined").with_kind(ColumnKind::Date),
            ],
            ..GridConfig::default()
        };
        let columns = config.column_set(&[]);
        assert_eq!(columns.keys().collect::<Vec<_>>(), ["age", "joined"]);
        assert_eq!(columns.get("age").map(|c| c.label.as_str()), Some("Age"));
        assert_eq!(columns.field_value(&record, "age"), CellValue::Number(36.0));
        assert_eq!(
            columns.field_value(&record, "joined").class(),
            dg_core::ValueClass::Date
        );
    }
}
