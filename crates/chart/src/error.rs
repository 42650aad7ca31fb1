//! Chart Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A chart error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for chart operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The chart file could not be read from disk.
    #[display("unable to read chart: {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    /// The path does not carry a recognised chart extension.
    #[display("not a chart file: {}", _0.display())]
    NotAChart(#[error(not(source))] PathBuf),
    /// The document is structurally broken (e.g. invalid BMSON JSON).
    #[display("malformed chart: {_0}")]
    Malformed(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A chart either parses or it doesn't; only I/O has a chance.
        matches!(self, Self::Read(_))
    }
}
