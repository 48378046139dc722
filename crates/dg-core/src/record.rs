//! Key-path lookup into caller-owned records

use ahash::AHashMap;
use serde_json::{Map, Value};

use crate::value::CellValue;

/// A record the engine can read fields from.
///
/// Implementations resolve a dotted key path (`"owner.name"`, `"tags.0"`)
/// to a value; anything that cannot be resolved is `CellValue::Null`.
pub trait Record {
    fn lookup(&self, path: &str) -> CellValue;
}

impl<R: Record + ?Sized> Record for &R {
    fn lookup(&self, path: &str) -> CellValue {
        (**self).lookup(path)
    }
}

impl Record for Value {
    fn lookup(&self, path: &str) -> CellValue {
        resolve_path(self, path)
            .map(CellValue::from_json)
            .unwrap_or(CellValue::Null)
    }
}

impl Record for Map<String, Value> {
    fn lookup(&self, path: &str) -> CellValue {
        if let Some(value) = self.get(path) {
            return CellValue::from_json(value);
        }

        let mut segments = path.split('.');
        segments
            .next()
            .and_then(|head| self.get(head))
            .and_then(|value| walk(value, segments))
            .map(CellValue::from_json)
            .unwrap_or(CellValue::Null)
    }
}

/// Flat records keyed by the full field name
impl Record for AHashMap<String, CellValue> {
    fn lookup(&self, path: &str) -> CellValue {
        self.get(path).cloned().unwrap_or(CellValue::Null)
    }
}

/// Resolve a dotted path inside a JSON document.
///
/// A key that literally contains dots wins over the nested interpretation.
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(direct) = value.as_object().and_then(|map| map.get(path)) {
        return Some(direct);
    }
    walk(value, path.split('.'))
}

fn walk<'a, 'p>(value: &'a Value, segments: impl Iterator<Item = &'p str>) -> Option<&'a Value> {
    let mut current = value;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
