use crate::error::{Error, ErrorKind};
use exn::OptionExt;
use std::path::{Path, PathBuf};

/// A chart already filed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Location of the chart file, as recorded by the player.
    pub path: PathBuf,
    /// Dialect-specific digest (SHA-256 or MD5, lower-case hex).
    pub digest: String,
}
impl CatalogEntry {
    /// The directory holding this chart; where related charts get filed.
    pub fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct EntryRow {
    title: Option<String>,
    genre: Option<String>,
    artist: Option<String>,
    path: Option<String>,
    digest: Option<String>,
}
impl TryFrom<EntryRow> for CatalogEntry {
    type Error = Error;
    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            title: row.title.unwrap_or_default(),
            artist: row.artist.unwrap_or_default(),
            genre: row.genre.unwrap_or_default(),
            path: PathBuf::from(row.path.ok_or_raise(|| ErrorKind::InvalidData("path"))?),
            digest: row.digest.unwrap_or_default(),
        })
    }
}
