//! Error types for the [`scan`](super) module.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A scan error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Either kind aborts the whole scan; no partial listing is returned.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A directory could not be listed.
    #[display("unable to read directory: {}", _0.display())]
    Io(#[error(not(source))] PathBuf),
    /// A chart failed to parse. Slow charts don't count; they time out.
    #[display("unable to load chart: {}", _0.display())]
    Load(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
