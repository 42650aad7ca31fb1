use crate::matching::similarity::Scores;
use std::fmt::{Display, Formatter, Result as FmtResult};

const CLOSE: f64 = 0.9;
const LOOSE_TITLE: f64 = 0.8;
const LOOSE_REST: f64 = 1.5;

/// How confidently a loose chart belongs with a catalog entry.
///
/// Variants are declared weakest first; ordering follows declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchLevel {
    #[default]
    Unmatch,
    Maybe,
    GenreConditional,
    ArtistConditional,
    Almost,
    Perfect,
}
impl MatchLevel {
    /// Grades a candidate, taking the first tier its scores satisfy.
    ///
    /// The artist-prefix tier accepts either artist being a non-empty prefix
    /// of the other, so `"X"` and `"X feat. Y"` match in both directions.
    pub fn grade(scores: &Scores, artist: &str, candidate_artist: &str) -> Self {
        let Scores { title, artist: artist_score, genre } = *scores;
        if title == 1.0 && artist_score == 1.0 && genre == 1.0 {
            Self::Perfect
        } else if title >= CLOSE && artist_score >= CLOSE && genre >= CLOSE {
            Self::Almost
        } else if title >= CLOSE && genre >= CLOSE && artist_prefixed(artist, candidate_artist) {
            Self::ArtistConditional
        } else if title >= CLOSE && artist_score >= CLOSE {
            Self::GenreConditional
        } else if title >= LOOSE_TITLE && artist_score + genre >= LOOSE_REST {
            Self::Maybe
        } else {
            Self::Unmatch
        }
    }

    /// Whether a candidate at this level is worth acting on.
    pub fn is_match(&self) -> bool {
        *self > Self::Unmatch
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "★ Perfect",
            Self::Almost => "☆ Almost",
            Self::ArtistConditional => "〇 Artist Conditional",
            Self::GenreConditional => "◇ Genre Conditional",
            Self::Maybe => "△ Maybe",
            Self::Unmatch => "✕ Unmatch",
        }
    }
}
impl Display for MatchLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

fn artist_prefixed(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    !short.is_empty() && long.starts_with(short)
}
