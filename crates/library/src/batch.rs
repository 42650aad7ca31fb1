//! Whole-run drivers for classification and relocation.
//!
//! Both are exposed as event streams so the caller can report progress as
//! each unit is handled.

use crate::Context;
use crate::error::{Error as LibraryError, Result as LibraryResult};
use crate::matching::{MatchOutcome, Sign, classify_unit};
use crate::relocate::{Action, relocate_unit};
use crate::scan::SabunUnit;
use async_stream::stream;
use futures::{Stream, StreamExt};
use sabun_catalog::Catalog;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// Number of units per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub ok: usize,
    pub ng: usize,
    pub exist: usize,
    pub error: usize,
}
impl Tally {
    pub fn record(&mut self, sign: Sign) {
        match sign {
            Sign::Ok => self.ok += 1,
            Sign::Ng => self.ng += 1,
            Sign::Exist => self.exist += 1,
            Sign::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.ng + self.exist + self.error
    }
}
impl Display for Tally {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "OK:{}, NG:{}, EXIST:{}, ERROR:{}", self.ok, self.ng, self.exist, self.error)
    }
}

/// Progress events emitted by [`classify_all`].
///
/// [`Started`](Self::Started) comes first, then one
/// [`Classified`](Self::Classified) per unit in scan order, then
/// [`Complete`](Self::Complete).
pub enum MatchEvent {
    /// Classification has begun for this many units.
    Started(usize),
    /// A unit with its [`outcome`](SabunUnit::outcome) filled in.
    Classified(Box<SabunUnit>),
    Complete(Tally),
}

/// Classifies every unit against `catalog`.
///
/// Up to `ctx.max_concurrency` units are classified at once, but results are
/// yielded in the order the units were given. A unit whose classification
/// fails is surfaced as an `Err` item and left out of the tally; the stream
/// carries on with the rest.
pub fn classify_all<'a>(
    units: Vec<SabunUnit>,
    catalog: &'a Catalog,
    ctx: &'a Context,
) -> impl Stream<Item = LibraryResult<MatchEvent>> + 'a {
    stream!({
        yield Ok(MatchEvent::Started(units.len()));
        let mut tally = Tally::default();
        let classified = futures::stream::iter(units)
            .map(|mut unit| async move {
                let outcome = classify_unit(&unit, catalog, &ctx.loader).await?;
                unit.outcome = Some(outcome);
                Ok::<_, LibraryError>(unit)
            })
            .buffered(ctx.max_concurrency.max(1));
        let mut classified = std::pin::pin!(classified);
        while let Some(result) = classified.next().await {
            match result {
                Ok(unit) => {
                    if let Some(outcome) = &unit.outcome {
                        tally.record(outcome.sign());
                    }
                    yield Ok(MatchEvent::Classified(Box::new(unit)));
                },
                Err(e) => yield Err(e),
            }
        }
        yield Ok(MatchEvent::Complete(tally));
    })
}

/// Progress events emitted by [`relocate_all`].
pub enum RelocateEvent {
    /// Relocation has begun for this many OK units.
    Started(usize),
    /// Everything done for the chart at `path`.
    Relocated { path: PathBuf, actions: Vec<Action> },
    Complete,
}

/// Relocates the OK units among `units`, one at a time; everything else is
/// ignored.
///
/// The first failure is yielded as an `Err` and ends the stream without a
/// [`Complete`](RelocateEvent::Complete). Earlier moves are not undone.
pub fn relocate_all<'a>(units: Vec<SabunUnit>, scan_root: &'a Path) -> impl Stream<Item = LibraryResult<RelocateEvent>> + 'a {
    stream!({
        let ok: Vec<_> =
            units.into_iter().filter(|u| matches!(u.outcome, Some(MatchOutcome::Ok { .. }))).collect();
        yield Ok(RelocateEvent::Started(ok.len()));
        for unit in ok {
            match relocate_unit(&unit, scan_root).await {
                Ok(actions) => yield Ok(RelocateEvent::Relocated { path: unit.record.path, actions }),
                Err(e) => {
                    yield Err(e);
                    return;
                },
            }
        }
        yield Ok(RelocateEvent::Complete);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{ChartRecord, LoadFailure, Loader};
    use crate::matching::MatchLevel;
    use futures::TryStreamExt;
    use sabun_catalog::{CatalogEntry, Dialect, RetryPolicy, fixture};
    use sabun_chart::Format;
    use std::fs;

    fn loaded(path: &str, body: &str) -> SabunUnit {
        let chart = sabun_chart::parse_bytes(path, Format::Bms, body.as_bytes()).unwrap();
        SabunUnit::new(ChartRecord::loaded(chart), vec![])
    }

    #[test]
    fn test_tally() {
        let mut tally = Tally::default();
        for sign in [Sign::Ok, Sign::Ok, Sign::Ng, Sign::Error] {
            tally.record(sign);
        }
        assert_eq!(tally.to_string(), "OK:2, NG:1, EXIST:0, ERROR:1");
        assert_eq!(tally.total(), 4);
    }

    #[tokio::test]
    async fn test_classify_all_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("song.db");
        let entries = [CatalogEntry {
            title: "Alpha Song".into(),
            artist: "X".into(),
            genre: "Pop".into(),
            path: "/cat/AlphaSet/alpha.bms".into(),
            digest: "abc".into(),
        }];
        fixture::create(&db, Dialect::Beatoraja, &entries).await.unwrap();
        let catalog = Catalog::open(&db, RetryPolicy::default()).await.unwrap();
        let ctx = Context { loader: Loader::default(), max_concurrency: 2 };

        let units = vec![
            loaded("a.bms", "#TITLE Alpha Song\n#ARTIST X\n#GENRE Pop\n"),
            SabunUnit::new(ChartRecord::timed_out("slow.bms"), vec![]),
            loaded("b.bms", "#TITLE Unknown\n"),
            loaded("c.bms", "#TITLE Alpha Song [HYPER]\n#ARTIST X\n#GENRE Pop\n"),
        ];
        let events: Vec<_> = classify_all(units, &catalog, &ctx).try_collect().await.unwrap();
        assert!(matches!(events.first(), Some(MatchEvent::Started(4))));
        let classified: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                MatchEvent::Classified(unit) => Some((unit.path().to_path_buf(), unit.outcome.clone().unwrap())),
                _ => None,
            })
            .collect();
        let perfect = MatchOutcome::Ok { target: "/cat/AlphaSet".into(), level: MatchLevel::Perfect, overlap: None };
        assert_eq!(
            classified,
            [
                (PathBuf::from("a.bms"), perfect.clone()),
                (PathBuf::from("slow.bms"), MatchOutcome::Error(LoadFailure::TimedOut)),
                (PathBuf::from("b.bms"), MatchOutcome::Ng { level: MatchLevel::Unmatch }),
                (PathBuf::from("c.bms"), perfect),
            ]
        );
        let Some(MatchEvent::Complete(tally)) = events.last() else {
            panic!("stream must finish with Complete");
        };
        assert_eq!(*tally, Tally { ok: 2, ng: 1, exist: 0, error: 1 });
    }

    #[tokio::test]
    async fn test_relocate_all_moves_only_ok_units() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("sabun");
        let target = dir.path().join("cat/AlphaSet");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&target).unwrap();
        let ok_path = root.join("ok.bms");
        let ng_path = root.join("ng.bms");
        fs::write(&ok_path, "ok").unwrap();
        fs::write(&ng_path, "ng").unwrap();

        let mut ok = SabunUnit::new(ChartRecord::timed_out(&ok_path), vec![]);
        ok.outcome = Some(MatchOutcome::Ok { target: target.clone(), level: MatchLevel::Maybe, overlap: None });
        let mut ng = SabunUnit::new(ChartRecord::timed_out(&ng_path), vec![]);
        ng.outcome = Some(MatchOutcome::Ng { level: MatchLevel::Unmatch });

        let events: Vec<_> = relocate_all(vec![ng, ok], &root).try_collect().await.unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RelocateEvent::Started(1)));
        let RelocateEvent::Relocated { path, actions } = &events[1] else {
            panic!("expected a relocation");
        };
        assert_eq!(path, &ok_path);
        assert_eq!(actions, &[Action::Moved { from: ok_path.clone(), to: target.join("ok.bms") }]);
        assert!(matches!(events[2], RelocateEvent::Complete));
        assert!(ng_path.exists());
    }

    #[tokio::test]
    async fn test_relocate_all_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = SabunUnit::new(ChartRecord::timed_out(dir.path().join("gone.bms")), vec![]);
        first.outcome =
            Some(MatchOutcome::Ok { target: dir.path().to_path_buf(), level: MatchLevel::Maybe, overlap: None });
        let events: Vec<_> = relocate_all(vec![first], dir.path()).collect().await;
        assert_eq!(events.len(), 2);
        assert!(events[1].is_err());
    }
}
