use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// One thing the relocator did (or deliberately didn't do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `from` now lives at `to`.
    Moved { from: PathBuf, to: PathBuf },
    /// `existing` already occupies the destination; `source` was left alone.
    Skipped { source: PathBuf, existing: PathBuf },
    /// A vacated directory was deleted.
    RemovedDir(PathBuf),
}
impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Moved { from, to } => write!(f, "Moved: {} -> {}", from.display(), to.display()),
            Self::Skipped { source, existing } => write!(
                f,
                "Skip because the same file already exist: {} {}",
                source.display(),
                existing.display()
            ),
            Self::RemovedDir(dir) => write!(f, "- Removed empty dir: {}", dir.display()),
        }
    }
}
