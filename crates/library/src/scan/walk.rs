use crate::scan::error::{ErrorKind, Result as ScanResult};
use exn::ResultExt;
use sabun_chart::{is_chart_path, is_sound_path};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

/// A chart found on disk, along with every sound file in its directory.
#[derive(Debug, Clone)]
pub(crate) struct Discovered {
    pub chart: PathBuf,
    pub siblings: Arc<[PathBuf]>,
}

type WalkFuture<'a> = Pin<Box<dyn Future<Output = ScanResult<()>> + Send + 'a>>;

/// Appends every chart under `dir` to `found`.
///
/// Entries are visited in file name order. Subdirectories are descended into
/// as they are met, so everything below a directory comes before that
/// directory's own charts. Symbolic links are never followed into.
pub(crate) fn walk<'a>(dir: &'a Path, found: &'a mut Vec<Discovered>) -> WalkFuture<'a> {
    Box::pin(async move {
        let io = || ErrorKind::Io(dir.to_path_buf());
        let mut reader = tokio::fs::read_dir(dir).await.or_raise(io)?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await.or_raise(io)? {
            let is_dir = entry.file_type().await.or_raise(io)?.is_dir();
            entries.push((entry.file_name(), entry.path(), is_dir));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let (mut charts, mut sounds) = (Vec::new(), Vec::new());
        for (_, path, is_dir) in entries {
            if is_dir {
                walk(&path, found).await?;
            } else if is_chart_path(&path) {
                charts.push(path);
            } else if is_sound_path(&path) {
                sounds.push(path);
            }
        }
        tracing::trace!(dir = %dir.display(), charts = charts.len(), sounds = sounds.len(), "listed directory");
        let siblings: Arc<[PathBuf]> = sounds.into();
        found.extend(charts.into_iter().map(|chart| Discovered { chart, siblings: Arc::clone(&siblings) }));
        Ok(())
    })
}
