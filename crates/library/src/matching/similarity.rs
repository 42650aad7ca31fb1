use sabun_catalog::CatalogEntry;
use sabun_chart::{Chart, normalize_title};
use strsim::normalized_levenshtein;

/// Similarity of a loose chart to one catalog entry, each in `[0, 1]`.
///
/// Titles and genres are compared after stripping difficulty suffixes;
/// artists are compared as written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub title: f64,
    pub artist: f64,
    pub genre: f64,
}
impl Scores {
    pub fn between(chart: &Chart, entry: &CatalogEntry) -> Self {
        Self {
            title: similarity(normalize_title(&chart.title), normalize_title(&entry.title)),
            artist: similarity(&chart.artist, &entry.artist),
            genre: similarity(normalize_title(&chart.genre), normalize_title(&entry.genre)),
        }
    }

    pub fn total(&self) -> f64 {
        self.title + self.artist + self.genre
    }
}

/// Normalized Levenshtein similarity over characters. Two empty strings are
/// identical.
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}
