//! Global text filter
//!
//! Case-insensitive substring matching over the normalized values of the
//! filterable fields. A record matches when any field contains the query.

use dg_core::{ColumnSet, Record};
use tracing::{debug, trace};

/// Keep the rows matching `query`.
///
/// A blank query returns `rows` untouched. `filter_keys` restricts matching
/// to the listed keys; `None` matches against every column.
pub fn filter_rows<'a, R: Record>(
    rows: Vec<&'a R>,
    columns: &ColumnSet<R>,
    query: &str,
    filter_keys: Option<&[String]>,
) -> Vec<&'a R> {
    filter_rows_with(rows, columns, query, filter_keys, None)
}

/// Like [`filter_rows`], additionally requiring `predicate` to accept the row.
///
/// The predicate applies even when the query is blank.
pub fn filter_rows_with<'a, R: Record>(
    rows: Vec<&'a R>,
    columns: &ColumnSet<R>,
    query: &str,
    filter_keys: Option<&[String]>,
    predicate: Option<&(dyn Fn(&R) -> bool + Send + Sync)>,
) -> Vec<&'a R> {
    let needle = query.trim().to_lowercase();
    let accepts = |record: &R| predicate.map_or(true, |accept| accept(record));

    if needle.is_empty() {
        return match predicate {
            None => {
                debug!("Blank query, keeping all {} rows", rows.len());
                rows
            }
            Some(_) => rows.into_iter().filter(|record| accepts(*record)).collect(),
        };
    }

    let keys: Vec<&str> = match filter_keys {
        Some(keys) => keys.iter().map(String::as_str).collect(),
        None => columns.keys().collect(),
    };

    let before = rows.len();
    let kept: Vec<&'a R> = rows
        .into_iter()
        .filter(|record| matches_query(*record, columns, &keys, &needle) && accepts(*record))
        .collect();

    trace!("Filter '{}' kept {} of {} rows", needle, kept.len(), before);
    kept
}

/// Whether any of `keys` on `record` contains `needle`.
///
/// `needle` must already be lowercase.
pub fn matches_query<R: Record>(
    record: &R,
    columns: &ColumnSet<R>,
    keys: &[&str],
    needle: &str,
) -> bool {
    keys.iter()
        .any(|key| columns.field_value(record, key).normalized().contains(needle))
}
