//! Pagination navigation: page tokens and the range layout that produces them

mod range;
mod token;

pub use range::{compute_range, RangeOptions};
pub use token::{PageToken, TokenKind};
