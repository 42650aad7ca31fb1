use crate::Context;
use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::load::{ChartRecord, LoadStatus};
use crate::scan::error::{ErrorKind, Result as ScanResult};
use crate::scan::unit::{SabunUnit, claim_sounds};
use crate::scan::walk::{Discovered, walk};
use exn::ResultExt;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use sabun_chart::Chart;
use sabun_chart::error::Result as ChartResult;
use std::path::Path;
use tracing::instrument;

/// Finds and loads every chart under `root`.
///
/// Units come back in discovery order (see [`walk`] for how a tree is
/// ordered) regardless of which loads finish first. Up to
/// `ctx.max_concurrency` charts load at once; as each finishes the next one
/// in line starts.
///
/// A chart that outlasts the load timeout becomes a placeholder unit with no
/// sounds. A chart that fails to parse, or a directory that can't be read,
/// aborts the scan.
///
/// # Errors
/// Returns [`Exn<LibraryErrorKind::Scan>`](LibraryErrorKind::Scan) raised
/// from an inner [`Exn<ErrorKind>`](ErrorKind).
pub async fn scan(root: impl AsRef<Path>, ctx: &Context) -> LibraryResult<Vec<SabunUnit>> {
    scan_inner(root.as_ref(), ctx, |path| sabun_chart::parse(path)).await.or_raise(|| LibraryErrorKind::Scan)
}

#[instrument(skip_all, fields(root = %root.display()))]
pub(crate) async fn scan_inner<P>(root: &Path, ctx: &Context, parse: P) -> ScanResult<Vec<SabunUnit>>
where
    P: Fn(&Path) -> ChartResult<Chart> + Clone + Send + 'static,
{
    let mut found = Vec::new();
    walk(root, &mut found).await?;
    tracing::info!(charts = found.len(), "discovered charts");

    // Each load is tagged with its position in `found` and lands in its own
    // slot, so completion order never leaks into the result.
    let mut slots: Vec<Option<ChartRecord>> = std::iter::repeat_with(|| None).take(found.len()).collect();
    let loader = ctx.loader;
    let mut queued = found.iter().enumerate().map(|(index, discovered)| {
        let (path, parse) = (discovered.chart.clone(), parse.clone());
        async move { (index, loader.load_with(path, parse).await) }
    });
    let mut processing = FuturesUnordered::new();
    processing.extend(queued.by_ref().take(ctx.max_concurrency.max(1)));
    while let Some((index, record)) = processing.next().await {
        let ChartRecord { path, status } = record;
        let record = match status {
            LoadStatus::Failed(e) => return Err(e).or_raise(|| ErrorKind::Load(path.clone())),
            status => ChartRecord { path, status },
        };
        slots[index] = Some(record);
        if let Some(next) = queued.next() {
            processing.push(next);
        }
    }

    let mut units = Vec::with_capacity(found.len());
    for (Discovered { siblings, .. }, record) in found.iter().zip(slots) {
        let Some(record) = record else { continue };
        let sounds = match record.chart() {
            Some(chart) => claim_sounds(&chart.sounds, siblings),
            None => Vec::new(),
        };
        units.push(SabunUnit::new(record, sounds));
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::Loader;
    use sabun_chart::Format;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    fn write(root: &Path, relative: &str, body: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_scan_pairs_charts_with_sounds() {
        let dir = tempfile::tempdir().unwrap();
        let alpha = write(dir.path(), "alpha.bms", "#TITLE Alpha\n#WAV01 kick.wav\n#WAV02 snare.wav\n");
        write(dir.path(), "kick.ogg", "");
        write(dir.path(), "snare.wav", "");
        write(dir.path(), "unused.wav", "");
        write(dir.path(), "readme.txt", "");
        let nested = write(dir.path(), "pack/beta.bme", "#TITLE Beta\n#WAV01 snare.wav\n");

        let units = scan(dir.path(), &Context::default()).await.unwrap();
        let paths: Vec<_> = units.iter().map(SabunUnit::path).collect();
        assert_eq!(paths, [nested.as_path(), alpha.as_path()]);
        assert!(units[0].sounds.is_empty(), "sounds are only claimed from the chart's own directory");
        assert_eq!(units[1].sounds, [dir.path().join("kick.ogg"), dir.path().join("snare.wav")]);
        assert_eq!(units[1].chart().unwrap().title, "Alpha");
        assert!(units.iter().all(|u| u.outcome.is_none()));
    }

    #[tokio::test]
    async fn test_order_survives_uneven_load_times() {
        let dir = tempfile::tempdir().unwrap();
        let mut expected = Vec::new();
        for i in 0..24 {
            expected.push(write(dir.path(), &format!("{i:02}.bms"), &format!("#TITLE {i}\n")));
        }
        let ctx = Context { max_concurrency: 4, ..Context::default() };
        // Earlier charts take longer, so completions arrive roughly reversed.
        let units = scan_inner(dir.path(), &ctx, |path| {
            let stem = path.file_stem().unwrap().to_string_lossy().parse::<u64>().unwrap();
            std::thread::sleep(Duration::from_millis(2 * (24 - stem)));
            sabun_chart::parse(path)
        })
        .await
        .unwrap();
        let paths: Vec<_> = units.iter().map(|u| u.path().to_path_buf()).collect();
        assert_eq!(paths, expected);
        assert_eq!(units[7].chart().unwrap().title, "7");
    }

    #[tokio::test]
    async fn test_slow_chart_becomes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "fast.bms", "#TITLE Fast\n#WAV01 kick.wav\n");
        let slow = write(dir.path(), "slow.bms", "#TITLE Slow\n#WAV01 kick.wav\n");
        write(dir.path(), "kick.wav", "");
        let ctx = Context { loader: Loader::new(Duration::from_millis(50)), ..Context::default() };
        let units = scan_inner(dir.path(), &ctx, |path| {
            if path.ends_with("slow.bms") {
                std::thread::sleep(Duration::from_millis(500));
            }
            sabun_chart::parse_bytes(path, Format::Bms, b"#WAV01 kick.wav")
        })
        .await
        .unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].sounds.len(), 1);
        assert_eq!(units[1].path(), slow);
        assert!(matches!(units[1].record.status, LoadStatus::TimedOut));
        assert!(units[1].sounds.is_empty());
    }

    #[tokio::test]
    async fn test_broken_chart_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.bms", "#TITLE Good\n");
        let broken = write(dir.path(), "sub/broken.bmson", "{ \"info\": ");
        let err = scan_inner(dir.path(), &Context::default(), |path| sabun_chart::parse(path)).await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::Load(broken));
        let err = scan(dir.path(), &Context::default()).await.unwrap_err();
        assert!(matches!(&*err, LibraryErrorKind::Scan));
    }

    #[tokio::test]
    async fn test_missing_root_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = scan_inner(&missing, &Context::default(), |path| sabun_chart::parse(path)).await.unwrap_err();
        assert_eq!(&*err, &ErrorKind::Io(missing));
    }
}
