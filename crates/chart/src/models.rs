//! Chart models.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Mapping of sound-slot identifier (e.g. `"01"`, `"ZZ"`) to the referenced
/// sound filename, exactly as written in the chart.
///
/// Keys are unique. A `BTreeMap` keeps iteration deterministic, which the
/// scanner relies on when claiming sibling sound files slot by slot.
pub type SoundSlots = BTreeMap<String, String>;

/// Chart file family, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Line-oriented `#COMMAND value` text (`.bms`, `.bme`, `.bml`, `.pms`).
    Bms,
    /// JSON-based successor format (`.bmson`).
    Bmson,
}
impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bms => write!(f, "bms"),
            Self::Bmson => write!(f, "bmson"),
        }
    }
}

/// Display metadata pulled out of a chart document, before digests are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub subtitle: String,
    pub artist: String,
    pub genre: String,
    pub sounds: SoundSlots,
}

/// A fully parsed chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Location the chart was parsed from.
    pub path: PathBuf,
    pub format: Format,
    pub title: String,
    pub subtitle: String,
    pub artist: String,
    pub genre: String,
    /// Lower-case hex SHA-256 of the raw file bytes (beatoraja catalogs).
    pub sha256: String,
    /// Lower-case hex MD5 of the raw file bytes (LR2 catalogs).
    pub md5: String,
    pub sounds: SoundSlots,
}
impl Chart {
    pub(crate) fn new(path: PathBuf, format: Format, bytes: &[u8], metadata: Metadata) -> Self {
        use sha2::{Digest, Sha256};
        Self {
            path,
            format,
            title: metadata.title,
            subtitle: metadata.subtitle,
            artist: metadata.artist,
            genre: metadata.genre,
            sha256: format!("{:x}", Sha256::digest(bytes)),
            md5: format!("{:x}", md5::compute(bytes)),
            sounds: metadata.sounds,
        }
    }
}
