//! Chart parsing for the BMS family of rhythm-game charts.
//!
//! Provides everything the rest of the workspace needs to know about a chart
//! file: display metadata, the sound files it references, and the SHA-256 /
//! MD5 digests that song databases use to identify it. Also hosts the path
//! classifiers and the title normalization used when matching charts against
//! a catalog.

mod bms;
mod bmson;
mod consts;
pub mod error;
pub mod models;
mod normalize;
mod path;

use exn::{OptionExt, ResultExt};
use std::path::Path;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
pub use crate::models::{Chart, Format, SoundSlots};
pub use crate::normalize::normalize_title;
pub use crate::path::{chart_format, file_stem, is_chart_path, is_sound_path, same_stem};

/// Reads and parses the chart at `path`.
///
/// This is blocking I/O followed by CPU-bound parsing; async callers should
/// run it on a blocking thread.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn parse(path: impl AsRef<Path>) -> Result<Chart> {
    let path = path.as_ref();
    let format = chart_format(path).ok_or_raise(|| ErrorKind::NotAChart(path.to_path_buf()))?;
    let bytes = std::fs::read(path).or_raise(|| ErrorKind::Read(path.to_path_buf()))?;
    parse_bytes(path, format, &bytes)
}

/// Parses chart contents that have already been read from `path`.
pub fn parse_bytes(path: impl AsRef<Path>, format: Format, bytes: &[u8]) -> Result<Chart> {
    let metadata = match format {
        Format::Bms => bms::parse(bytes),
        Format::Bmson => bmson::parse(bytes)?,
    };
    Ok(Chart::new(path.as_ref().to_path_buf(), format, bytes, metadata))
}
