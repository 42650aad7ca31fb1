//! Retry-on-busy for catalog queries.
//!
//! The player that owns the catalog may be running and writing to it. SQLite
//! reports that as `SQLITE_BUSY`/`SQLITE_LOCKED`; those failures are retried
//! with a fixed delay, every other failure surfaces immediately.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_ATTEMPTS: u32 = 10;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

// Primary and extended result codes, as reported by `DatabaseError::code()`.
const BUSY_CODES: [&str; 5] = ["5", "6", "261", "262", "517"];

/// How often, and how patiently, a busy query is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}
impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: DEFAULT_ATTEMPTS, delay: DEFAULT_DELAY }
    }
}

pub(crate) fn is_busy(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.code().is_some_and(|code| BUSY_CODES.contains(&&*code)) || db.message().contains("database is locked")
        },
        sqlx::Error::PoolTimedOut => true,
        _ => false,
    }
}

impl RetryPolicy {
    /// Runs `op` until it succeeds, fails with a non-busy error, or the
    /// attempts are exhausted.
    pub(crate) async fn run<T, F, Fut>(&self, query: &'static str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = sqlx::Result<T>>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if is_busy(&e) && attempt < attempts => {
                    tracing::debug!(query, attempt, "catalog busy; retrying");
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                },
                Err(e) if is_busy(&e) => {
                    tracing::warn!(query, attempts, "catalog still busy; giving up");
                    return Err(e).or_raise(|| ErrorKind::Busy { attempts });
                },
                Err(e) => return Err(e).or_raise(|| ErrorKind::Database),
            }
        }
    }
}
