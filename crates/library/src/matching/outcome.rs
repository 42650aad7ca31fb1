use crate::load::LoadFailure;
use crate::matching::level::MatchLevel;
use crate::matching::overlap::Overlap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};

/// The verdict for one loose chart.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The catalog already holds a byte-identical chart in `target`.
    Exist { target: PathBuf },
    /// The chart belongs in `target`.
    Ok {
        target: PathBuf,
        level: MatchLevel,
        /// Best sound overlap seen among the candidates, if any was measured.
        overlap: Option<Overlap>,
    },
    /// No candidate was close enough.
    Ng { level: MatchLevel },
    /// The chart couldn't be loaded, so it was never compared.
    Error(LoadFailure),
}
impl MatchOutcome {
    pub fn sign(&self) -> Sign {
        match self {
            Self::Exist { .. } => Sign::Exist,
            Self::Ok { .. } => Sign::Ok,
            Self::Ng { .. } => Sign::Ng,
            Self::Error(_) => Sign::Error,
        }
    }

    /// Directory the chart was matched to; only EXIST and OK have one.
    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Exist { target } | Self::Ok { target, .. } => Some(target),
            Self::Ng { .. } | Self::Error(_) => None,
        }
    }

    /// Formats the one-line report for the chart at `path`.
    pub fn describe<'a>(&'a self, path: &'a Path) -> Describe<'a> {
        Describe { outcome: self, path }
    }
}

/// Coarse outcome category, as tallied in run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Ok,
    Ng,
    Exist,
    Error,
}
impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::Ng => "NG",
            Self::Exist => "EXIST",
            Self::Error => "ERROR",
        })
    }
}

/// Status line for one chart; see [`MatchOutcome::describe`].
pub struct Describe<'a> {
    outcome: &'a MatchOutcome,
    path: &'a Path,
}
impl Display for Describe<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.outcome.sign(), self.path.display())?;
        match self.outcome {
            MatchOutcome::Exist { target } => write!(f, " -> {}", target.display()),
            MatchOutcome::Ok { target, level, overlap } => {
                write!(f, " -> {} (Matching: {level})", target.display())?;
                match overlap {
                    Some(overlap) => write!(f, " {overlap}"),
                    None => Ok(()),
                }
            },
            MatchOutcome::Ng { level } => write!(f, " (Matching: {level})"),
            MatchOutcome::Error(failure) => write!(f, " -- {failure}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        MatchOutcome::Ok { target: "/cat/AlphaSet".into(), level: MatchLevel::Perfect, overlap: None },
        "OK: sabun/a.bms -> /cat/AlphaSet (Matching: ★ Perfect)"
    )]
    #[case(
        MatchOutcome::Ok {
            target: "/cat/AlphaSet".into(),
            level: MatchLevel::Maybe,
            overlap: Some(Overlap { matched: 3, total: 4, ratio: 0.75 }),
        },
        "OK: sabun/a.bms -> /cat/AlphaSet (Matching: △ Maybe) [sound 3/4]"
    )]
    #[case(MatchOutcome::Ng { level: MatchLevel::Unmatch }, "NG: sabun/a.bms (Matching: ✕ Unmatch)")]
    #[case(MatchOutcome::Exist { target: "/cat/AlphaSet".into() }, "EXIST: sabun/a.bms -> /cat/AlphaSet")]
    #[case(MatchOutcome::Error(LoadFailure::TimedOut), "ERROR: sabun/a.bms -- loading timeout")]
    #[case(
        MatchOutcome::Error(LoadFailure::Failed("malformed chart: eof".into())),
        "ERROR: sabun/a.bms -- load failed: malformed chart: eof"
    )]
    fn test_describe(#[case] outcome: MatchOutcome, #[case] expected: &str) {
        assert_eq!(outcome.describe(Path::new("sabun/a.bms")).to_string(), expected);
    }

    #[test]
    fn test_only_placed_outcomes_have_targets() {
        let ok = MatchOutcome::Ok { target: "/cat/A".into(), level: MatchLevel::Almost, overlap: None };
        assert_eq!(ok.target(), Some(Path::new("/cat/A")));
        assert_eq!(ok.sign(), Sign::Ok);
        assert_eq!(MatchOutcome::Ng { level: MatchLevel::Unmatch }.target(), None);
        assert_eq!(MatchOutcome::Error(LoadFailure::TimedOut).sign().to_string(), "ERROR");
    }
}
