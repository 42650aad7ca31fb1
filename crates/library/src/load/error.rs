//! Error types for the [`load`](super) module.

use derive_more::{Display, Error};
use sabun_chart::error::ErrorKind as ChartErrorKind;

/// A load error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for load operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The parser rejected the chart; carries the parser's own reason.
    #[display("{_0}")]
    Parse(ChartErrorKind),
    /// The parsing thread panicked or could not be started.
    #[display("chart parser aborted")]
    Aborted,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Parse(inner) => inner.is_retryable(),
            Self::Aborted => false,
        }
    }
}
