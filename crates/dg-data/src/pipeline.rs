//! Filter -> sort -> paginate composition
//!
//! The order is fixed: sorting after paging would only order rows within a
//! page, and paging before filtering would page over rows the user cannot see.

use std::fmt;
use std::sync::Arc;

use dg_core::{ColumnSet, RangeOptions, Record, ViewState};
use tracing::debug;

use crate::filter::filter_rows_with;
use crate::paginate::{page_count, paginate_rows};
use crate::sort::sort_rows;

/// Extra row condition combined with the text filter
pub type RowPredicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput<'a, R> {
    /// Rows of the requested page, in display order
    pub rows: Vec<&'a R>,
    /// Rows handed to the pipeline
    pub total_rows: usize,
    /// Rows that survived filtering, before paging
    pub filtered_rows: usize,
    /// Requested page; 0 when unpaged
    pub page: usize,
    pub page_size: usize,
    /// Pages available for the filtered rows, at least 1
    pub page_count: usize,
}

impl<'a, R> PipelineOutput<'a, R> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the requested page lies past the last page
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.page_count
    }

    /// Range options for the pagination control of this result
    pub fn range_options(&self) -> RangeOptions {
        RangeOptions::new(self.page.max(1), self.page_count)
    }
}

/// Column set plus an optional row predicate, applied to a view state
pub struct Pipeline<R> {
    columns: ColumnSet<R>,
    predicate: Option<RowPredicate<R>>,
}

impl<R: Record> Pipeline<R> {
    pub fn new(columns: impl Into<ColumnSet<R>>) -> Self {
        Self {
            columns: columns.into(),
            predicate: None,
        }
    }

    /// Keep only rows accepted by `predicate`, on top of the text filter
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn columns(&self) -> &ColumnSet<R> {
        &self.columns
    }

    /// Run filter, sort and paginate over `records` for `state`
    pub fn run<'a>(&self, records: &'a [R], state: &ViewState) -> PipelineOutput<'a, R> {
        compose(records, &self.columns, state, self.predicate.as_deref())
    }
}

impl<R> Clone for Pipeline<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<R> fmt::Debug for Pipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("columns", &self.columns)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Run the pipeline without a row predicate
pub fn run_pipeline<'a, R: Record>(
    records: &'a [R],
    columns: &ColumnSet<R>,
    state: &ViewState,
) -> PipelineOutput<'a, R> {
    compose(records, columns, state, None)
}

fn compose<'a, R: Record>(
    records: &'a [R],
    columns: &ColumnSet<R>,
    state: &ViewState,
    predicate: Option<&(dyn Fn(&R) -> bool + Send + Sync)>,
) -> PipelineOutput<'a, R> {
    let rows: Vec<&'a R> = records.iter().collect();

    let filtered = filter_rows_with(
        rows,
        columns,
        &state.global_filter,
        state.filter_keys.as_deref(),
        predicate,
    );
    let filtered_rows = filtered.len();

    let sorted = sort_rows(filtered, columns, state.sort.as_ref());
    let page_rows = paginate_rows(sorted, state.page, state.page_size);
    let pages = if state.is_paged() {
        page_count(filtered_rows, state.page_size)
    } else {
        1
    };

    debug!(
        "Pipeline: {} rows -> {} filtered -> {} on page {}/{}",
        records.len(),
        filtered_rows,
        page_rows.len(),
        state.page,
        pages
    );

    PipelineOutput {
        rows: page_rows,
        total_rows: records.len(),
        filtered_rows,
        page: if state.is_paged() { state.page } else { 0 },
        page_size: if state.is_paged() { state.page_size } else { 0 },
        page_count: pages,
    }
}
