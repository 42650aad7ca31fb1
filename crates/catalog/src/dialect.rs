//! Catalog dialect detection.
//!
//! Two players write song databases this tool understands. Both store charts
//! in a `song` table, but identify them with different digests:
//!
//! | Dialect     | Digest column | Algorithm |
//! |-------------|---------------|-----------|
//! | beatoraja   | `sha256`      | SHA-256   |
//! | LR2         | `hash`        | MD5       |
//!
//! The dialect is resolved once per catalog handle from a schema probe and
//! threaded through every subsequent query.

use crate::error::{ErrorKind, Result};
use sabun_chart::Chart;
use std::fmt::{Display, Formatter, Result as FmtResult};

pub(crate) const SONG_TABLE: &str = "song";
/// Columns every supported dialect must expose.
pub(crate) const REQUIRED_COLUMNS: [&str; 4] = ["title", "genre", "artist", "path"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `songdata.db` written by beatoraja.
    Beatoraja,
    /// `song.db` written by Lunatic Rave 2.
    Lr2,
}
impl Dialect {
    /// Name of the column holding the chart digest.
    pub fn digest_column(&self) -> &'static str {
        match self {
            Self::Beatoraja => "sha256",
            Self::Lr2 => "hash",
        }
    }

    /// The digest of `chart` this dialect compares against.
    pub fn digest_of<'a>(&self, chart: &'a Chart) -> &'a str {
        match self {
            Self::Beatoraja => &chart.sha256,
            Self::Lr2 => &chart.md5,
        }
    }

    /// Validates the columns of the `song` table and picks the dialect.
    ///
    /// Required columns are checked first, so a catalog missing `title` is
    /// reported as such even when it also lacks a digest column. When both
    /// digest columns exist, `sha256` wins.
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> Result<Self> {
        if columns.is_empty() {
            exn::bail!(ErrorKind::MissingTable(SONG_TABLE));
        }
        let has = |name: &str| columns.iter().any(|c| c.as_ref().eq_ignore_ascii_case(name));
        if let Some(missing) = REQUIRED_COLUMNS.into_iter().find(|c| !has(c)) {
            exn::bail!(ErrorKind::MissingColumn(missing));
        }
        if has(Self::Beatoraja.digest_column()) {
            Ok(Self::Beatoraja)
        } else if has(Self::Lr2.digest_column()) {
            Ok(Self::Lr2)
        } else {
            exn::bail!(ErrorKind::UnknownDialect)
        }
    }
}
impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Beatoraja => write!(f, "beatoraja"),
            Self::Lr2 => write!(f, "LR2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["md5", "sha256", "title", "subtitle", "genre", "artist", "path"], Dialect::Beatoraja)]
    #[case(&["hash", "title", "subtitle", "genre", "artist", "path"], Dialect::Lr2)]
    #[case(&["HASH", "TITLE", "GENRE", "ARTIST", "PATH"], Dialect::Lr2)]
    #[case(&["hash", "sha256", "title", "genre", "artist", "path"], Dialect::Beatoraja)]
    fn test_detect(#[case] columns: &[&str], #[case] expected: Dialect) {
        assert_eq!(Dialect::detect(columns).unwrap(), expected);
    }

    #[rstest]
    #[case(&["sha256", "genre", "artist", "path"], "title")]
    #[case(&["sha256", "title", "artist", "path"], "genre")]
    #[case(&["sha256", "title", "genre", "path"], "artist")]
    #[case(&["sha256", "title", "genre", "artist"], "path")]
    fn test_detect_missing_column(#[case] columns: &[&str], #[case] expected: &str) {
        let err = Dialect::detect(columns).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingColumn(c) if *c == expected));
    }

    #[test]
    fn test_detect_unknown_dialect() {
        let err = Dialect::detect(&["md5", "title", "genre", "artist", "path"]).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownDialect));
    }

    #[test]
    fn test_detect_missing_table() {
        let err = Dialect::detect::<&str>(&[]).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingTable("song")));
    }

    #[test]
    fn test_digest_of() {
        let chart = sabun_chart::parse_bytes("a.bms", sabun_chart::Format::Bms, b"").unwrap();
        assert_eq!(Dialect::Beatoraja.digest_of(&chart), chart.sha256);
        assert_eq!(Dialect::Lr2.digest_of(&chart), chart.md5);
    }
}
