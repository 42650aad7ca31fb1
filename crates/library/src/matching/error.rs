//! Error types for the [`matching`](super) module.

use derive_more::{Display, Error};

/// A matching error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for matching operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Classification was asked for without a chart or without a catalog.
    #[display("nothing to match: no {_0}")]
    MissingInput(#[error(not(source))] &'static str),
    /// A catalog query failed (after any busy retries).
    #[display("catalog lookup failed")]
    Catalog,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Catalog)
    }
}
