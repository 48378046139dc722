//! View state for grid views
//!
//! The state is a plain value owned by the caller. Every transition returns
//! a new state; nothing here touches records.

use serde::{Deserialize, Serialize};

use crate::column::ColumnDescriptor;

/// Sort direction for the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The single active sort column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Header-click cycle: other column or unsorted -> ascending,
    /// ascending -> descending, descending -> cleared.
    pub fn cycle(current: Option<&SortState>, key: &str) -> Option<SortState> {
        match current {
            Some(sort) if sort.key == key => match sort.direction {
                SortDirection::Ascending => Some(SortState::descending(key)),
                SortDirection::Descending => None,
            },
            _ => Some(SortState::ascending(key)),
        }
    }
}

/// Query, sort and page cursor of one grid view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewState {
    /// Free-text query; blank means no filter
    pub global_filter: String,
    /// Keys eligible for text matching; `None` means every column
    pub filter_keys: Option<Vec<String>>,
    pub sort: Option<SortState>,
    /// 1-based page; 0 leaves the result unpaged
    pub page: usize,
    /// Rows per page; 0 leaves the result unpaged
    pub page_size: usize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State starting on the first page of `page_size` rows
    pub fn paged(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            ..Self::default()
        }
    }

    pub fn is_paged(&self) -> bool {
        self.page > 0 && self.page_size > 0
    }

    /// Replace the query. Paged views go back to the first page.
    pub fn with_filter(mut self, query: impl Into<String>) -> Self {
        self.global_filter = query.into();
        self.rewind();
        self
    }

    pub fn with_filter_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_keys = Some(keys.into_iter().map(Into::into).collect());
        self.rewind();
        self
    }

    pub fn with_sort(mut self, sort: Option<SortState>) -> Self {
        self.sort = sort;
        self.rewind();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Change the page length and return to the first page.
    /// A size of 0 turns paging off.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self.page = if page_size > 0 { 1 } else { 0 };
        self
    }

    /// Apply a header click on `column`. Non-sortable columns leave the
    /// state untouched.
    pub fn toggle_sort<R>(&self, column: &ColumnDescriptor<R>) -> Self {
        if !column.sortable {
            tracing::debug!("Ignoring sort toggle on non-sortable column '{}'", column.key);
            return self.clone();
        }
        let next = SortState::cycle(self.sort.as_ref(), &column.key);
        self.clone().with_sort(next)
    }

    /// Direction shown on the header of `key`, if it is the active sort
    pub fn sort_direction_for(&self, key: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|sort| sort.key == key)
            .map(|sort| sort.direction)
    }

    /// Pull a paged cursor back into `1..=page_count`
    pub fn clamp_page(mut self, page_count: usize) -> Self {
        if self.is_paged() {
            self.page = self.page.clamp(1, page_count.max(1));
        }
        self
    }

    pub fn next_page(self, page_count: usize) -> Self {
        let page = self.page.saturating_add(1);
        self.with_page(page).clamp_page(page_count)
    }

    pub fn previous_page(self) -> Self {
        let page = self.page.saturating_sub(1).max(1);
        if self.is_paged() {
            self.with_page(page)
        } else {
            self
        }
    }

    fn rewind(&mut self) {
        if self.page > 0 {
            self.page = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_sort_cycle() {
        let first = SortState::cycle(None, "name");
        assert_eq!(first, Some(SortState::ascending("name")));

        let second = SortState::cycle(first.as_ref(), "name");
        assert_eq!(second, Some(SortState::descending("name")));

        // Third click clears instead of wrapping back to ascending
        assert_eq!(SortState::cycle(second.as_ref(), "name"), None);

        let other = SortState::cycle(second.as_ref(), "age");
        assert_eq!(other, Some(SortState::ascending("age")));
    }

    #[test]
    fn test_toggle_sort_on_columns() {
        let name: ColumnDescriptor<Value> = ColumnDescriptor::new("name");
        let locked: ColumnDescriptor<Value> = ColumnDescriptor::new("id").sortable(false);

        let state = ViewState::paged(10).with_page(4);
        let sorted = state.toggle_sort(&name);
        assert_eq!(sorted.sort, Some(SortState::ascending("name")));
        assert_eq!(sorted.page, 1);
        assert_eq!(sorted.sort_direction_for("name"), Some(SortDirection::Ascending));
        assert_eq!(sorted.sort_direction_for("id"), None);

        let unchanged = sorted.toggle_sort(&locked);
        assert_eq!(unchanged, sorted);

        let cleared = sorted.toggle_sort(&name).toggle_sort(&name);
        assert_eq!(cleared.sort, None);
    }

    #[test]
    fn test_filter_rewinds_only_paged_views() {
        let paged = ViewState::paged(5).with_page(3).with_filter("abc");
        assert_eq!(paged.page, 1);
        assert_eq!(paged.global_filter, "abc");

        let unpaged = ViewState::new().with_filter("abc");
        assert_eq!(unpaged.page, 0);
        assert!(!unpaged.is_paged());
    }

    #[test]
    fn test_page_transitions_clamp() {
        let state = ViewState::paged(10).with_page(9).clamp_page(4);
        assert_eq!(state.page, 4);

        assert_eq!(state.clone().next_page(4).page, 4);
        assert_eq!(state.clone().previous_page().page, 3);
        assert_eq!(ViewState::paged(10).previous_page().page, 1);
        assert_eq!(ViewState::paged(10).with_page_size(0).page, 0);
    }

    #[test]
    fn test_state_deserializes_with_defaults() {
        let state: ViewState =
            serde_json::from_str(r#"{"sort":{"key":"age","direction":"descending"},"page":2}"#)
                .unwrap();

        assert_eq!(state.sort, Some(SortState::descending("age")));
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, 0);
        assert!(state.global_filter.is_empty());
    }
}
