use crate::load::error::{ErrorKind, Result as LoadResult};
use crate::load::record::ChartRecord;
use exn::{Exn, ResultExt};
use sabun_chart::Chart;
use sabun_chart::error::Result as ChartResult;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::RecvError;
use tracing::instrument;

/// How long a single chart may take to parse before it's given up on.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Loads charts with a hard per-file timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loader {
    timeout: Duration,
}
impl Default for Loader {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_TIMEOUT)
    }
}
impl Loader {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Loads the chart at `path`, never waiting longer than the timeout.
    ///
    /// Always returns a record: a slow parse yields
    /// [`TimedOut`](crate::LoadStatus::TimedOut), a rejected one
    /// [`Failed`](crate::LoadStatus::Failed).
    pub async fn load(&self, path: impl Into<PathBuf>) -> ChartRecord {
        self.load_with(path.into(), |path| sabun_chart::parse(path)).await
    }

    /// [`load`](Self::load) with a custom parser.
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub(crate) async fn load_with<F>(&self, path: PathBuf, parse: F) -> ChartRecord
    where
        F: FnOnce(&Path) -> ChartResult<Chart> + Send + 'static,
    {
        let owned = path.clone();
        let (tx, rx) = oneshot::channel();
        // Runs outside the runtime's blocking pool so an abandoned parse never
        // holds up shutdown. After a timeout the receiver is gone and the
        // result is dropped on send.
        let spawned = std::thread::Builder::new().name("chart-parse".to_owned()).spawn(move || {
            let _ = tx.send(parse(&owned));
        });
        if let Err(e) = spawned {
            return ChartRecord::failed(path, Exn::new(e).raise(ErrorKind::Aborted));
        }
        match tokio::time::timeout(self.timeout, rx).await {
            Ok(received) => match flatten(received) {
                Ok(chart) => ChartRecord::loaded(chart),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %*e, "chart failed to load");
                    ChartRecord::failed(path, e)
                },
            },
            Err(_elapsed) => {
                tracing::warn!(path = %path.display(), timeout = ?self.timeout, "chart load timed out");
                ChartRecord::timed_out(path)
            },
        }
    }
}

fn flatten(received: std::result::Result<ChartResult<Chart>, RecvError>) -> LoadResult<Chart> {
    match received {
        Ok(Ok(chart)) => Ok(chart),
        Ok(Err(e)) => {
            let inner = (*e).clone();
            Err(e.raise(ErrorKind::Parse(inner)))
        },
        Err(e) => Err(e).or_raise(|| ErrorKind::Aborted),
    }
}
