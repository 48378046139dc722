//! Column descriptors for grid views

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;

use crate::record::Record;
use crate::value::CellValue;

/// Extracts a value from a record
pub type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Formats an extracted value for display
pub type DisplayFn<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

/// Describes one column of a grid.
///
/// Without an accessor the column reads `key` as a dotted path. The sort
/// accessor lets ordering use a different representation than display, such
/// as a raw timestamp behind a formatted date.
pub struct ColumnDescriptor<R> {
    /// Field identifier, unique within a column set
    pub key: String,
    /// Header text
    pub label: String,
    /// Whether header clicks may change the sort state
    pub sortable: bool,
    accessor: Option<Accessor<R>>,
    sort_accessor: Option<Accessor<R>>,
    display: Option<DisplayFn<R>>,
}

impl<R> ColumnDescriptor<R> {
    /// Create a sortable column reading `key` from each record
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            sortable: true,
            accessor: None,
            sort_accessor: None,
            display: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Read values through `accessor` instead of the key path
    pub fn with_accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    /// Sort by `accessor` instead of the display value
    pub fn with_sort_accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        self.sort_accessor = Some(Arc::new(accessor));
        self
    }

    pub fn with_display<F>(mut self, display: F) -> Self
    where
        F: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    {
        self.display = Some(Arc::new(display));
        self
    }
}

impl<R: Record> ColumnDescriptor<R> {
    /// Value used for display and text matching
    pub fn value(&self, record: &R) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor(record),
            None => record.lookup(&self.key),
        }
    }

    /// Value used for ordering: sort accessor, then accessor, then key path
    pub fn sort_value(&self, record: &R) -> CellValue {
        match &self.sort_accessor {
            Some(accessor) => accessor(record),
            None => self.value(record),
        }
    }

    /// Rendered cell text
    pub fn display(&self, record: &R) -> String {
        let value = self.value(record);
        match &self.display {
            Some(display) => display(&value, record),
            None => value.to_string(),
        }
    }
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            accessor: self.accessor.clone(),
            sort_accessor: self.sort_accessor.clone(),
            display: self.display.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("accessor", &self.accessor.is_some())
            .field("sort_accessor", &self.sort_accessor.is_some())
            .field("display", &self.display.is_some())
            .finish()
    }
}

/// Ordered column descriptors with lookup by key.
///
/// Keys are expected to be unique; when they are not, lookups resolve to the
/// first descriptor with that key.
pub struct ColumnSet<R> {
    columns: Vec<ColumnDescriptor<R>>,
    index: AHashMap<String, usize>,
}

impl<R> ColumnSet<R> {
    pub fn new(columns: Vec<ColumnDescriptor<R>>) -> Self {
        let mut index = AHashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            index.entry(column.key.clone()).or_insert(position);
        }
        Self { columns, index }
    }

    pub fn get(&self, key: &str) -> Option<&ColumnDescriptor<R>> {
        self.index.get(key).map(|&position| &self.columns[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor<R>> {
        self.columns.iter()
    }

    /// Column keys in display order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<R: Record> ColumnSet<R> {
    /// Resolve `key` through its column accessor when one exists,
    /// otherwise by key path on the record.
    pub fn field_value(&self, record: &R, key: &str) -> CellValue {
        match self.get(key) {
            Some(column) => column.value(record),
            None => record.lookup(key),
        }
    }
}

impl<R> Clone for ColumnSet<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            index: self.index.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<R> Default for ColumnSet<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R> From<Vec<ColumnDescriptor<R>>> for ColumnSet<R> {
    fn from(columns: Vec<ColumnDescriptor<R>>) -> Self {
        Self::new(columns)
    }
}

impl<R> FromIterator<ColumnDescriptor<R>> for ColumnSet<R> {
    fn from_iter<I: IntoIterator<Item = ColumnDescriptor<R>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, R> IntoIterator for &'a ColumnSet<R> {
    type Item = &'a ColumnDescriptor<R>;
    type IntoIter = std::slice::Iter<'a, ColumnDescriptor<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
