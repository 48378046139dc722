//! Grid and loading configuration

pub mod grid_config;
pub mod null_handling;

pub use grid_config::*;
pub use null_handling::*;
