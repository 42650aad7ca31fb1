//! Error types for the [`relocate`](super) module.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A relocation error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for relocation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The chart has no OK match, so there's nowhere to put it.
    #[display("no target directory for {}", _0.display())]
    MissingTarget(#[error(not(source))] PathBuf),
    /// Reading, writing or deleting this path failed.
    #[display("file operation failed: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
