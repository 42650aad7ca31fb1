//! Classifying loose charts against a song catalog.
//!
//! A chart whose digest is already in the catalog is an exact duplicate
//! ([`MatchOutcome::Exist`]). Otherwise every catalog entry whose title
//! starts with the chart's normalized title is scored on title, artist and
//! genre similarity and graded into a [`MatchLevel`]. The best grade wins,
//! unless a candidate's own chart uses exactly the same sounds as the loose
//! chart, in which case that candidate is taken on the spot.

mod classify;
pub mod error;
mod level;
mod outcome;
mod overlap;
mod similarity;

pub use self::classify::{classify, classify_unit};
pub use self::level::MatchLevel;
pub use self::outcome::{Describe, MatchOutcome, Sign};
pub use self::overlap::Overlap;
pub use self::similarity::Scores;
