//! Filing matched charts into their catalog directories.
//!
//! A chart keeps its file name unless a different file already has it, in
//! which case it's numbered (`name (1).bms`, `name (2).bms`, …). A chart
//! whose exact bytes are already present is left where it is. Sound files
//! are never numbered or overwritten: if the name is taken, the sound stays
//! behind.
//!
//! Moves copy the bytes and then delete the source, so they work across
//! filesystems. They are not atomic and nothing is rolled back on failure.
//!
//! Once a file has moved out of a directory (other than the scan root), that
//! directory is deleted if all it has left are `.txt` files.

mod action;
mod cleanup;
pub mod error;
mod file;

pub use self::action::Action;
pub use self::file::{relocate, relocate_unit};
