//! Builds throwaway song databases shaped like the ones players write.
//!
//! Compiled for this crate's tests and, through the `fixture` feature, for
//! other crates' tests.

use crate::dialect::Dialect;
use crate::error::{ErrorKind, Result};
use crate::models::CatalogEntry;
use exn::{OptionExt, ResultExt};
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use std::path::Path;

fn schema(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Beatoraja => {
            "CREATE TABLE song (md5 TEXT, sha256 TEXT, title TEXT, subtitle TEXT, genre TEXT, artist TEXT, \
             subartist TEXT, path TEXT, folder TEXT, PRIMARY KEY (sha256, path))"
        },
        Dialect::Lr2 => {
            "CREATE TABLE song (hash TEXT, title TEXT, subtitle TEXT, genre TEXT, artist TEXT, path TEXT, \
             type INTEGER, PRIMARY KEY (hash, path))"
        },
    }
}

async fn connect(path: &Path) -> Result<SqliteConnection> {
    let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);
    SqliteConnection::connect_with(&options).await.or_raise(|| ErrorKind::Database)
}

/// Creates a database at `path` by running arbitrary `sql`.
pub async fn create_raw(path: impl AsRef<Path>, sql: &str) -> Result<()> {
    let mut conn = connect(path.as_ref()).await?;
    sqlx::query(sql).execute(&mut conn).await.or_raise(|| ErrorKind::Database)?;
    conn.close().await.or_raise(|| ErrorKind::Database)
}

/// Creates a `dialect`-shaped catalog at `path` holding `entries`, in order.
pub async fn create(path: impl AsRef<Path>, dialect: Dialect, entries: &[CatalogEntry]) -> Result<()> {
    let mut conn = connect(path.as_ref()).await?;
    sqlx::query(schema(dialect)).execute(&mut conn).await.or_raise(|| ErrorKind::Database)?;
    let insert = format!(
        "INSERT INTO song (title, genre, artist, path, {}) VALUES (?1, ?2, ?3, ?4, ?5)",
        dialect.digest_column()
    );
    for entry in entries {
        let path = entry.path.to_str().ok_or_raise(|| ErrorKind::InvalidData("path"))?;
        sqlx::query(&insert)
            .bind(entry.title.as_str())
            .bind(entry.genre.as_str())
            .bind(entry.artist.as_str())
            .bind(path)
            .bind(entry.digest.as_str())
            .execute(&mut conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
    }
    conn.close().await.or_raise(|| ErrorKind::Database)
}
