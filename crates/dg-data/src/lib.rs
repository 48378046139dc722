//! Data pipeline and sources for grid views
//!
//! The stages here are pure functions over borrowed rows: filter, then sort,
//! then paginate. [`Pipeline`] composes them in that fixed order and
//! [`GridSession`] wraps the composition with caller-side state and caching.

pub mod config;
pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod session;
pub mod sort;
pub mod sources;

use thiserror::Error;

// Re-exports
pub use config::{parse_date, ColumnConfig, ColumnKind, GridConfig, NullConfig};
pub use filter::{filter_rows, filter_rows_with, matches_query};
pub use paginate::{page_count, paginate_rows};
pub use pipeline::{run_pipeline, Pipeline, PipelineOutput, RowPredicate};
pub use session::{GridSession, GridSnapshot, GridSubscriber};
pub use sort::sort_rows;
pub use sources::{open_source, CsvSource, JsonSource, LoadedRecords, RecordSource};

/// Errors that can occur while loading records or configuration
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
