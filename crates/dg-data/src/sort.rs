//! Single-column stable sort

use std::cmp::Ordering;

use dg_core::{CellValue, ColumnSet, Record, SortDirection, SortState, ValueClass};
use tracing::{debug, trace};

/// Sort key prepared once per row
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Date(i64),
    Text(String),
    Null,
}

impl From<CellValue> for SortKey {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Null => SortKey::Null,
            CellValue::Number(n) => SortKey::Number(n),
            CellValue::Date(d) => SortKey::Date(d.timestamp_millis()),
            other => SortKey::Text(other.normalized()),
        }
    }
}

impl SortKey {
    fn class(&self) -> ValueClass {
        match self {
            SortKey::Number(_) => ValueClass::Number,
            SortKey::Date(_) => ValueClass::Date,
            SortKey::Text(_) => ValueClass::Text,
            SortKey::Null => ValueClass::Null,
        }
    }
}

/// Nulls go last in either direction; only non-null orderings are reversed
fn compare_keys(a: &SortKey, b: &SortKey, direction: SortDirection) -> Ordering {
    let ordering = match (a, b) {
        (SortKey::Null, SortKey::Null) => return Ordering::Equal,
        (SortKey::Null, _) => return Ordering::Greater,
        (_, SortKey::Null) => return Ordering::Less,
        (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
        (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        // Mismatched classes: numbers, then dates, then text
        (a, b) => a.class().cmp(&b.class()),
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Order rows by the active sort column.
///
/// Without a sort, or when the key names no column, rows keep their input
/// order. Values come from the column's sort accessor, then its accessor,
/// then the key path. Two numbers compare numerically and two dates
/// chronologically; text, booleans and composites compare as lowercase
/// strings. Values of different classes order numbers before dates before
/// text, so a mixed column still sorts consistently. The sort is stable in
/// both directions.
pub fn sort_rows<'a, R: Record>(
    rows: Vec<&'a R>,
    columns: &ColumnSet<R>,
    sort: Option<&SortState>,
) -> Vec<&'a R> {
    let Some(sort) = sort else {
        return rows;
    };
    let Some(column) = columns.get(&sort.key) else {
        debug!("Sort key '{}' matches no column, keeping input order", sort.key);
        return rows;
    };

    let mut keyed: Vec<(SortKey, &'a R)> = rows
        .into_iter()
        .map(|record| (SortKey::from(column.sort_value(record)), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, sort.direction));

    trace!("Sorted {} rows by '{}' ({:?})", keyed.len(), sort.key, sort.direction);

    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dg_core::ColumnDescriptor;
    use serde_json::{json, Value};

    fn ids(rows: &[&Value]) -> Vec<i64> {
        rows.iter()
            .filter_map(|r| r.lookup("id").as_f64())
            .map(|id| id as i64)
            .collect()
    }

    fn columns() -> ColumnSet<Value> {
        vec![
            ColumnDescriptor::new("id"),
            ColumnDescriptor::new("score"),
            ColumnDescriptor::new("name"),
            ColumnDescriptor::new("group"),
        ]
        .into()
    }

    fn records() -> Vec<Value> {
        vec![
            json!({ "id": 1, "score": 10, "name": "banana", "group": "b" }),
            json!({ "id": 2, "score": null, "name": "Apple", "group": "a" }),
            json!({ "id": 3, "score": 2, "name": "cherry", "group": "b" }),
            json!({ "id": 4, "name": "apple", "group": "a" }),
            json!({ "id": 5, "score": 10, "name": "date", "group": "a" }),
        ]
    }

    #[test]
    fn test_no_sort_or_unknown_key_keeps_order() {
        let records = records();
        let rows: Vec<&Value> = records.iter().collect();

        assert_eq!(ids(&sort_rows(rows.clone(), &columns(), None)), [1, 2, 3, 4, 5]);

        let unknown = SortState::ascending("missing");
        assert_eq!(ids(&sort_rows(rows, &columns(), Some(&unknown))), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_numeric_sort_with_nulls_last_in_both_directions() {
        let records = records();
        let rows: Vec<&Value> = records.iter().collect();

        let ascending = sort_rows(rows.clone(), &columns(), Some(&SortState::ascending("score")));
        assert_eq!(ids(&ascending), [3, 1, 5, 2, 4]);

        let descending = sort_rows(rows, &columns(), Some(&SortState::descending("score")));
        assert_eq!(ids(&descending), [1, 5, 3, 2, 4]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive_and_stable() {
        let records = records();
        let rows: Vec<&Value> = records.iter().collect();

        // "Apple" and "apple" tie and keep input order
        let ascending = sort_rows(rows.clone(), &columns(), Some(&SortState::ascending("name")));
        assert_eq!(ids(&ascending), [2, 4, 1, 3, 5]);

        let descending = sort_rows(rows, &columns(), Some(&SortState::descending("name")));
        assert_eq!(ids(&descending), [5, 3, 1, 2, 4]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let records = records();
        let rows: Vec<&Value> = records.iter().collect();

        let ascending = sort_rows(rows.clone(), &columns(), Some(&SortState::ascending("group")));
        assert_eq!(ids(&ascending), [2, 4, 5, 1, 3]);

        let descending = sort_rows(rows, &columns(), Some(&SortState::descending("group")));
        assert_eq!(ids(&descending), [1, 3, 2, 4, 5]);
    }

    #[test]
    fn test_sort_accessor_takes_priority() {
        let records = vec![
            json!({ "id": 1, "when": "March", "ts": 3 }),
            json!({ "id": 2, "when": "January", "ts": 1 }),
            json!({ "id": 3, "when": "February", "ts": 2 }),
        ];
        let rows: Vec<&Value> = records.iter().collect();
        let columns: ColumnSet<Value> = vec![ColumnDescriptor::new("when")
            .with_accessor(|r: &Value| r.lookup("when"))
            .with_sort_accessor(|r: &Value| r.lookup("ts"))]
        .into();

        let sorted = sort_rows(rows, &columns, Some(&SortState::ascending("when")));
        assert_eq!(ids(&sorted), [2, 3, 1]);
    }

    #[test]
    fn test_dates_compare_chronologically() {
        let stamps = [(1, 2023, 5), (2, 2021, 12), (3, 2022, 1)];
        let records: Vec<Value> = stamps
            .iter()
            .map(|(id, year, month)| json!({ "id": id, "year": year, "month": month }))
            .collect();
        let rows: Vec<&Value> = records.iter().collect();
        let columns: ColumnSet<Value> = vec![ColumnDescriptor::new("at").with_accessor(|r: &Value| {
            let year = r.lookup("year").as_f64().unwrap_or_default() as i32;
            let month = r.lookup("month").as_f64().unwrap_or_default() as u32;
            Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single().into()
        })]
        .into();

        let sorted = sort_rows(rows, &columns, Some(&SortState::descending("at")));
        assert_eq!(ids(&sorted), [1, 3, 2]);
    }

    #[test]
    fn test_numbers_keep_numeric_order_beside_text() {
        let records = vec![
            json!({ "id": 1, "v": 10 }),
            json!({ "id": 2, "v": 9 }),
            json!({ "id": 3, "v": "n/a" }),
        ];
        let rows: Vec<&Value> = records.iter().collect();
        let columns: ColumnSet<Value> = vec![ColumnDescriptor::new("v")].into();

        let ascending = sort_rows(rows.clone(), &columns, Some(&SortState::ascending("v")));
        assert_eq!(ids(&ascending), [2, 1, 3]);

        let descending = sort_rows(rows, &columns, Some(&SortState::descending("v")));
        assert_eq!(ids(&descending), [3, 1, 2]);
    }

    #[test]
    fn test_mixed_classes_order_numbers_before_text() {
        let records = vec![
            json!({ "id": 1, "v": 10 }),
            json!({ "id": 2, "v": "9" }),
            json!({ "id": 3, "v": 2 }),
            json!({ "id": 4, "v": null }),
            json!({ "id": 5, "v": "10" }),
        ];
        let rows: Vec<&Value> = records.iter().collect();
        let columns: ColumnSet<Value> = vec![ColumnDescriptor::new("v")].into();

        let sorted = sort_rows(rows, &columns, Some(&SortState::ascending("v")));
        assert_eq!(ids(&sorted), [3, 1, 5, 2, 4]);
    }

    #[test]
    fn test_compare_keys() {
        let asc = SortDirection::Ascending;
        let desc = SortDirection::Descending;
        let key = |value: CellValue| SortKey::from(value);

        assert_eq!(compare_keys(&key(1.0.into()), &key(2.0.into()), asc), Ordering::Less);
        assert_eq!(compare_keys(&key(1.0.into()), &key(2.0.into()), desc), Ordering::Greater);
        assert_eq!(compare_keys(&key(10.0.into()), &key(2.0.into()), asc), Ordering::Greater);
        assert_eq!(compare_keys(&key("10".into()), &key("2".into()), asc), Ordering::Less);
        assert_eq!(compare_keys(&key(CellValue::Null), &key(2.0.into()), desc), Ordering::Greater);
        assert_eq!(compare_keys(&key(CellValue::Null), &key(CellValue::Null), asc), Ordering::Equal);

        let date = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(compare_keys(&key(1e12.into()), &key(date.into()), asc), Ordering::Less);
        assert_eq!(compare_keys(&key(date.into()), &key("a".into()), asc), Ordering::Less);
        assert_eq!(compare_keys(&key(true.into()), &key("u".into()), asc), Ordering::Less);
    }
}
