//! Path classification helpers.

use crate::consts::{BMS_EXTENSIONS, BMSON_EXTENSION, SOUND_EXTENSIONS};
use crate::models::Format;
use std::path::Path;

fn extension_lower(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase)
}

/// Detects the chart [`Format`] of a path from its extension.
pub fn chart_format(path: impl AsRef<Path>) -> Option<Format> {
    let ext = extension_lower(path.as_ref())?;
    if BMS_EXTENSIONS.contains(&ext.as_str()) {
        Some(Format::Bms)
    } else if ext == BMSON_EXTENSION {
        Some(Format::Bmson)
    } else {
        None
    }
}

/// Returns `true` for paths that look like chart files (case-insensitive).
pub fn is_chart_path(path: impl AsRef<Path>) -> bool {
    chart_format(path).is_some()
}

/// Returns `true` for `.wav`, `.ogg`, `.flac` and `.mp3` paths (case-insensitive).
pub fn is_sound_path(path: impl AsRef<Path>) -> bool {
    extension_lower(path.as_ref()).is_some_and(|ext| SOUND_EXTENSIONS.contains(&ext.as_str()))
}

/// The file name without its extension or any leading directories.
///
/// Sound references inside charts are plain strings which may use either
/// separator, so both `/` and `\` are treated as directory separators.
pub fn file_stem(reference: &str) -> &str {
    let name = reference.rsplit(['/', '\\']).next().unwrap_or(reference);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(i) => &name[..i],
    }
}

/// Extension-insensitive comparison of two sound references or paths.
///
/// Chart authors routinely convert `.wav` samples to `.ogg` without updating
/// the chart, so only the stem has to agree.
pub fn same_stem(a: &str, b: &str) -> bool {
    file_stem(a) == file_stem(b)
}
