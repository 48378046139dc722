//! Core functionality for the tabular data engine
//!
//! This crate provides the value model, record lookup, column descriptors,
//! view state and the page-range computer used by pagination controls.

pub mod column;
pub mod navigation;
pub mod record;
pub mod state;
pub mod value;

// Re-export commonly used types
pub use column::{Accessor, ColumnDescriptor, ColumnSet, DisplayFn};
pub use navigation::{compute_range, PageToken, RangeOptions, TokenKind};
pub use record::Record;
pub use state::{SortDirection, SortState, ViewState};
pub use value::{CellValue, ValueClass};
