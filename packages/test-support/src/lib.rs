//! Shared helpers for the workspace test suites: logging initialization and
//! unique test-data generation.

pub mod logging;
pub mod unique;

pub use unique::unique_str;
