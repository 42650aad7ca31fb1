use crate::load::error::Error as LoadError;
use sabun_chart::Chart;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// What came of loading one chart file.
#[derive(Debug)]
pub enum LoadStatus {
    Loaded(Box<Chart>),
    /// The parse did not finish within the loader's timeout.
    TimedOut,
    /// The parser failed; the error tree is kept for diagnostics.
    Failed(LoadError),
}

/// A chart file and the result of loading it.
///
/// Only a [`Loaded`](LoadStatus::Loaded) record carries chart metadata; the
/// other states know nothing beyond the path and never reach the catalog.
#[derive(Debug)]
pub struct ChartRecord {
    pub path: PathBuf,
    pub status: LoadStatus,
}
impl ChartRecord {
    pub fn loaded(chart: Chart) -> Self {
        Self { path: chart.path.clone(), status: LoadStatus::Loaded(Box::new(chart)) }
    }

    pub fn timed_out(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), status: LoadStatus::TimedOut }
    }

    pub fn failed(path: impl Into<PathBuf>, error: LoadError) -> Self {
        Self { path: path.into(), status: LoadStatus::Failed(error) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parsed chart, if loading succeeded.
    pub fn chart(&self) -> Option<&Chart> {
        match &self.status {
            LoadStatus::Loaded(chart) => Some(chart),
            _ => None,
        }
    }

    /// Why this record can't be matched, or `None` if it was loaded.
    pub fn failure(&self) -> Option<LoadFailure> {
        match &self.status {
            LoadStatus::Loaded(_) => None,
            LoadStatus::TimedOut => Some(LoadFailure::TimedOut),
            LoadStatus::Failed(e) => Some(LoadFailure::Failed((**e).to_string())),
        }
    }
}

/// A detached summary of a failed load, small enough to travel with a
/// match outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    TimedOut,
    Failed(String),
}
impl Display for LoadFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::TimedOut => write!(f, "loading timeout"),
            Self::Failed(reason) => write!(f, "load failed: {reason}"),
        }
    }
}
