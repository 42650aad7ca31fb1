use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Extensions (lower-case, without the dot) of the BMS text family.
pub(crate) const BMS_EXTENSIONS: [&str; 4] = ["bms", "bme", "bml", "pms"];
pub(crate) const BMSON_EXTENSION: &str = "bmson";
pub(crate) const SOUND_EXTENSIONS: [&str; 4] = ["wav", "ogg", "flac", "mp3"];

/// Words that mark a bracketed title suffix as a difficulty/variant name
/// rather than part of the song's title.
pub(crate) const VARIANT_KEYWORDS: &[&str] = &[
    "beginner",
    "normal",
    "hyper",
    "another",
    "insane",
    "leggendaria",
    "light",
    "easy",
    "hard",
    "extra",
    "ex",
    "sp",
    "dp",
    "5key",
    "7key",
    "9key",
    "10key",
    "14key",
    "5keys",
    "7keys",
    "10keys",
    "14keys",
    "kuso",
    "sabun",
];
/// Non-ASCII markers, matched as substrings since they aren't whitespace delimited.
pub(crate) const VARIANT_MARKERS: &[&str] = &["差分", "譜面"];

// `#WAVxx filename`, where xx is two base-36 characters.
regex!(WAV_REGEX, r"^(?i)#WAV([0-9A-Z]{2})[ \t]+(.+)$");
// `#COMMAND value` headers that carry display metadata.
regex!(HEADER_REGEX, r"^(?i)#(TITLE|SUBTITLE|ARTIST|GENRE|GENLE)(?:[ \t]+(.*))?$");
// A single bracketed group at the very end of a title, e.g. `[ANOTHER]`,
// `(HYPER)`, `-NORMAL-`, `【LEGGENDARIA】`. Capture 1..=N hold the contents.
regex!(
    SUFFIX_REGEX,
    r#"\s*(?:\[([^\[\]]*)\]|\(([^()]*)\)|（([^（）]*)）|［([^［］]*)］|【([^【】]*)】|<([^<>]*)>|＜([^＜＞]*)＞|-([^-]*)-|～([^～]*)～|~([^~]*)~|"([^"]*)")\s*$"#
);
