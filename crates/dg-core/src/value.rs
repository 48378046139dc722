//! Cell values and the normalization shared by filtering and sorting

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// A single extracted field value
///
/// Records are opaque to the engine; every field read through a column or a
/// key path ends up as one of these variants before it is matched or compared.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing field, JSON `null`, or an explicit null produced by an accessor
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    /// Point in time, compared by epoch milliseconds
    Date(DateTime<Utc>),
    Text(String),
    /// Arrays and objects, normalized through their JSON serialization
    Json(Value),
}

/// Comparison class of a value. Variants are declared in the order used
/// when two values of different classes are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueClass {
    Number,
    Date,
    Text,
    Null,
}

impl CellValue {
    /// Convert a JSON value without losing its scalar type
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
            Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Json(other.clone()),
        }
    }

    /// Classify the value for comparison. Booleans and composites compare as text.
    pub fn class(&self) -> ValueClass {
        match self {
            CellValue::Null => ValueClass::Null,
            CellValue::Number(_) => ValueClass::Number,
            CellValue::Date(_) => ValueClass::Date,
            CellValue::Bool(_) | CellValue::Text(_) | CellValue::Json(_) => ValueClass::Text,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Lowercase string form used for substring matching and text ordering.
    /// Null normalizes to the empty string.
    pub fn normalized(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(s) => s.to_lowercase(),
            other => other.to_string().to_lowercase(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Json(v) => write_sorted(f, v),
        }
    }
}

/// Compact JSON with object keys sorted, so equal composites always print
/// the same whatever their insertion order
fn write_sorted(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Array(items) => {
            f.write_str("[")?;
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    f.write_str(",")?;
                }
                write_sorted(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            f.write_str("{")?;
            for (idx, (key, item)) in entries.into_iter().enumerate() {
                if idx > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}:", Value::String(key.clone()))?;
                write_sorted(f, item)?;
            }
            f.write_str("}")
        }
        scalar => write!(f, "{}", scalar),
    }
}

/// Integral numbers print without a fractional part (`3`, not `3.0`)
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        CellValue::from_json(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Date(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}
