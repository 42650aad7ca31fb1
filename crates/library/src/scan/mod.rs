//! Discovering loose charts and the sound files that travel with them.
//!
//! The entry point is [`scan`], which walks a directory tree depth-first,
//! loads every chart it finds (concurrently, in bounded batches) and pairs
//! each chart with the sibling sound files it references.

pub mod error;
mod collect;
mod unit;
mod walk;

pub use self::collect::scan;
pub use self::unit::SabunUnit;
