//! Title normalization.

use crate::consts::{SUFFIX_REGEX, VARIANT_KEYWORDS, VARIANT_MARKERS};

fn is_variant_name(content: &str) -> bool {
    if VARIANT_MARKERS.iter().any(|m| content.contains(m)) {
        return true;
    }
    content
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .any(|token| VARIANT_KEYWORDS.iter().any(|k| token.eq_ignore_ascii_case(k)))
}

/// Strips a trailing difficulty/variant suffix from a chart title.
///
/// Difference charts are usually titled after the song with the chart name
/// appended in brackets: `Song [ANOTHER]`, `Song (HYPER)`, `Song -NORMAL-`.
/// Only a bracketed group whose content names a difficulty is removed, so
/// `Song (feat. Someone)` survives untouched. The same normalization is
/// applied to genres, which follow the same convention in some packs.
pub fn normalize_title(title: &str) -> &str {
    let trimmed = title.trim();
    let Some(captures) = SUFFIX_REGEX.captures(trimmed) else {
        return trimmed;
    };
    let content = captures.iter().skip(1).flatten().next().map(|m| m.as_str()).unwrap_or_default();
    if !is_variant_name(content) {
        return trimmed;
    }
    // Infallible: capture group 0 always exists on a successful match.
    let start = captures.get(0).map(|m| m.start()).unwrap_or(trimmed.len());
    let stripped = trimmed[..start].trim_end();
    // A title that is nothing but a suffix is still a title.
    if stripped.is_empty() { trimmed } else { stripped }
}
