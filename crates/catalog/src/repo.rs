//! Queries against the `song` table.

use crate::Database;
use crate::dialect::{Dialect, SONG_TABLE};
use crate::error::Result;
use crate::models::{CatalogEntry, EntryRow};
use crate::retry::RetryPolicy;
use std::path::Path;
use tracing::instrument;

/// Escapes `LIKE` metacharacters so a title is matched literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Read-only handle to a song catalog with its [`Dialect`] resolved.
///
/// Cloning is cheap (the pool is reference-counted) and every clone shares
/// the same connections, so one handle can serve all classification calls.
#[derive(Debug, Clone)]
pub struct Catalog {
    db: Database,
    dialect: Dialect,
    retry: RetryPolicy,
    by_digest: String,
    by_title_prefix: String,
}
impl Catalog {
    /// Opens the catalog at `path` and probes its schema.
    ///
    /// # Errors
    /// Fails when the file can't be opened, when the `song` table or one of
    /// its required columns is missing, or when no digest column exists.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>, retry: RetryPolicy) -> Result<Self> {
        let db = Database::connect(path).await?;
        match Self::from_database(db.clone(), retry).await {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                db.close().await;
                Err(e)
            },
        }
    }

    /// Probes an already-connected [`Database`].
    pub async fn from_database(db: Database, retry: RetryPolicy) -> Result<Self> {
        let probe = format!("SELECT name FROM pragma_table_info('{SONG_TABLE}')");
        let columns: Vec<String> = retry
            .run("schema probe", || sqlx::query_scalar::<_, String>(&probe).fetch_all(db.pool()))
            .await?;
        let dialect = Dialect::detect(columns.as_slice())?;
        tracing::info!(%dialect, "detected catalog dialect");
        let column = dialect.digest_column();
        Ok(Self {
            by_digest: format!(
                "SELECT title, genre, artist, path, {column} AS digest FROM {SONG_TABLE} WHERE {column} = ?1 LIMIT 1"
            ),
            by_title_prefix: format!(
                r"SELECT title, genre, artist, path, {column} AS digest FROM {SONG_TABLE} WHERE title LIKE ?1 ESCAPE '\'"
            ),
            db,
            dialect,
            retry,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Finds any catalog entry whose digest equals `digest`.
    #[instrument(level = "debug", skip(self))]
    pub async fn find_by_digest(&self, digest: &str) -> Result<Option<CatalogEntry>> {
        let (sql, pool) = (&self.by_digest, self.db.pool());
        let row: Option<EntryRow> = self
            .retry
            .run("find by digest", move || sqlx::query_as(sql).bind(digest).fetch_optional(pool))
            .await?;
        row.map(CatalogEntry::try_from).transpose()
    }

    /// Lists entries whose title starts with `prefix`, in catalog order.
    ///
    /// Matching follows SQLite `LIKE` semantics, so ASCII letters compare
    /// case-insensitively.
    #[instrument(level = "debug", skip(self))]
    pub async fn find_by_title_prefix(&self, prefix: &str) -> Result<Vec<CatalogEntry>> {
        let pattern = format!("{}%", escape_like(prefix));
        let (sql, pool, pattern) = (&self.by_title_prefix, self.db.pool(), pattern.as_str());
        let rows: Vec<EntryRow> = self
            .retry
            .run("find by title prefix", move || sqlx::query_as(sql).bind(pattern).fetch_all(pool))
            .await?;
        rows.into_iter().map(CatalogEntry::try_from).collect()
    }

    /// Close the underlying connection pool.
    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fixture;
    use std::path::PathBuf;

    fn entry(title: &str, path: &str, digest: &str) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            artist: "X".to_string(),
            genre: "Pop".to_string(),
            path: PathBuf::from(path),
            digest: digest.to_string(),
        }
    }

    async fn catalog(dialect: Dialect, entries: &[CatalogEntry]) -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.db");
        fixture::create(&path, dialect, entries).await.unwrap();
        let catalog = Catalog::open(&path, RetryPolicy::default()).await.unwrap();
        (dir, catalog)
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100% _pure_ \\o/"), "100\\% \\_pure\\_ \\\\o/");
    }

    #[tokio::test]
    async fn test_find_by_digest() {
        let entries = [entry("Alpha Song", "/cat/AlphaSet/alpha.bms", "abc"), entry("Beta", "/cat/Beta/b.bms", "def")];
        for dialect in [Dialect::Beatoraja, Dialect::Lr2] {
            let (_dir, catalog) = catalog(dialect, &entries).await;
            assert_eq!(catalog.dialect(), dialect);
            let found = catalog.find_by_digest("def").await.unwrap().unwrap();
            assert_eq!(found.path, PathBuf::from("/cat/Beta/b.bms"));
            assert!(catalog.find_by_digest("zzz").await.unwrap().is_none());
            catalog.close().await;
        }
    }

    #[tokio::test]
    async fn test_find_by_title_prefix() {
        let entries = [
            entry("Alpha Song [HYPER]", "/cat/AlphaSet/h.bms", "1"),
            entry("Beta", "/cat/Beta/b.bms", "2"),
            entry("alpha song [ANOTHER]", "/cat/AlphaSet/a.bms", "3"),
            entry("Alpha_Song", "/cat/Other/o.bms", "4"),
        ];
        let (_dir, catalog) = catalog(Dialect::Beatoraja, &entries).await;
        let found = catalog.find_by_title_prefix("Alpha Song").await.unwrap();
        let digests: Vec<_> = found.iter().map(|e| e.digest.as_str()).collect();
        assert_eq!(digests, ["1", "3"]);
        let found = catalog.find_by_title_prefix("Alpha_").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].digest, "4");
        catalog.close().await;
    }

    #[tokio::test]
    async fn test_open_rejects_foreign_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.db");
        fixture::create_raw(&path, "CREATE TABLE song (sha256 TEXT, title TEXT, artist TEXT, path TEXT)").await.unwrap();
        let err = Catalog::open(&path, RetryPolicy::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingColumn("genre")));

        let path = dir.path().join("empty.db");
        fixture::create_raw(&path, "CREATE TABLE folder (path TEXT)").await.unwrap();
        let err = Catalog::open(&path, RetryPolicy::default()).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingTable("song")));
    }
}
