//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("database error")]
    Database,
    /// The database stayed locked by another process for every attempt.
    #[display("database busy after {attempts} attempts")]
    Busy { attempts: u32 },
    #[display("catalog has no `{_0}` table")]
    MissingTable(#[error(not(source))] &'static str),
    #[display("catalog is missing required column `{_0}`")]
    MissingColumn(#[error(not(source))] &'static str),
    /// Neither a `sha256` (beatoraja) nor a `hash` (LR2) column exists.
    #[display("catalog has neither a `sha256` nor a `hash` column")]
    UnknownDialect,
    #[display("invalid catalog data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}
