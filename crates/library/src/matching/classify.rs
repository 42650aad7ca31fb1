use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::load::Loader;
use crate::matching::error::{ErrorKind, Result as MatchResult};
use crate::matching::level::MatchLevel;
use crate::matching::outcome::MatchOutcome;
use crate::matching::overlap::Overlap;
use crate::matching::similarity::Scores;
use crate::scan::SabunUnit;
use exn::{OptionExt, ResultExt};
use sabun_catalog::{Catalog, CatalogEntry};
use sabun_chart::{Chart, normalize_title};
use tracing::instrument;

/// Classifies `chart` against `catalog`, loading candidate charts through
/// `loader` to compare sounds.
///
/// # Errors
/// Returns [`Exn<LibraryErrorKind::Match>`](LibraryErrorKind::Match) raised
/// from an inner [`Exn<ErrorKind>`](ErrorKind) when either input is absent or
/// a catalog query fails.
pub async fn classify(chart: Option<&Chart>, catalog: Option<&Catalog>, loader: &Loader) -> LibraryResult<MatchOutcome> {
    classify_inner(chart, catalog, loader).await.or_raise(|| LibraryErrorKind::Match)
}

/// Classifies a scanned unit. Units whose chart never loaded go straight to
/// [`MatchOutcome::Error`] without touching the catalog.
pub async fn classify_unit(unit: &SabunUnit, catalog: &Catalog, loader: &Loader) -> LibraryResult<MatchOutcome> {
    if let Some(failure) = unit.record.failure() {
        return Ok(MatchOutcome::Error(failure));
    }
    classify(unit.record.chart(), Some(catalog), loader).await
}

async fn classify_inner(
    chart: Option<&Chart>,
    catalog: Option<&Catalog>,
    loader: &Loader,
) -> MatchResult<MatchOutcome> {
    let chart = chart.ok_or_raise(|| ErrorKind::MissingInput("chart"))?;
    let catalog = catalog.ok_or_raise(|| ErrorKind::MissingInput("catalog"))?;
    classify_chart(chart, catalog, loader).await
}

#[instrument(level = "debug", skip_all, fields(path = %chart.path.display()))]
pub(crate) async fn classify_chart(chart: &Chart, catalog: &Catalog, loader: &Loader) -> MatchResult<MatchOutcome> {
    let digest = catalog.dialect().digest_of(chart);
    if let Some(entry) = catalog.find_by_digest(digest).await.or_raise(|| ErrorKind::Catalog)? {
        return Ok(MatchOutcome::Exist { target: entry.directory() });
    }

    let candidates = catalog.find_by_title_prefix(normalize_title(&chart.title)).await.or_raise(|| ErrorKind::Catalog)?;
    let mut best: Option<(MatchLevel, CatalogEntry)> = None;
    let mut best_overlap: Option<Overlap> = None;
    for entry in candidates {
        let scores = Scores::between(chart, &entry);
        let level = MatchLevel::grade(&scores, &chart.artist, &entry.artist);
        tracing::trace!(candidate = %entry.path.display(), %level, ?scores, total = scores.total(), "scored candidate");

        if level.is_match()
            && let Some(overlap) = sound_overlap(chart, &entry, loader).await
        {
            if best_overlap.is_none_or(|seen| overlap.ratio > seen.ratio) {
                best_overlap = Some(overlap);
            }
            // Same sounds in every slot outweighs any difference in text.
            if overlap.is_complete() {
                tracing::debug!(candidate = %entry.path.display(), %level, "candidate shares every sound");
                return Ok(MatchOutcome::Ok { target: entry.directory(), level, overlap: Some(overlap) });
            }
        }

        if best.as_ref().is_none_or(|(seen, _)| level > *seen) {
            best = Some((level, entry));
        }
        if level == MatchLevel::Perfect {
            break;
        }
    }

    Ok(match best {
        Some((level, entry)) if level.is_match() => {
            MatchOutcome::Ok { target: entry.directory(), level, overlap: best_overlap }
        },
        _ => MatchOutcome::Ng { level: MatchLevel::Unmatch },
    })
}

/// Loads the candidate's own chart and measures how many of the loose chart's
/// sound slots it shares. A candidate that can't be loaded just doesn't take
/// part in the comparison.
async fn sound_overlap(chart: &Chart, entry: &CatalogEntry, loader: &Loader) -> Option<Overlap> {
    if chart.sounds.is_empty() {
        return None;
    }
    let record = loader.load(entry.path.clone()).await;
    match record.chart() {
        Some(target) => Overlap::between(&chart.sounds, &target.sounds),
        None => {
            tracing::debug!(candidate = %entry.path.display(), "candidate chart unavailable for sound comparison");
            None
        },
    }
}
