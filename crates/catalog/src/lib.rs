//! Read-only access to the song catalog of a BMS player.
//!
//! The catalog is the SQLite database a player (beatoraja or LR2) builds
//! while indexing its song folders. It is the source of truth for where
//! already-organized charts live; this crate never writes to it.
//!
//! # Architecture
//! - [`Database`]: read-only connection pool.
//! - [`Dialect`]: which player wrote the catalog, detected once from the
//!   schema; decides the digest column and algorithm.
//! - [`Catalog`]: the queries the matcher needs (by digest, by title prefix),
//!   each wrapped in a [`RetryPolicy`] for busy databases.

mod db;
mod dialect;
pub mod error;
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
mod models;
mod repo;
mod retry;

pub use crate::db::Database;
pub use crate::dialect::Dialect;
pub use crate::models::CatalogEntry;
pub use crate::repo::Catalog;
pub use crate::retry::RetryPolicy;
