//! Parser for the line-oriented BMS family (`.bms`, `.bme`, `.bml`, `.pms`).
//!
//! Only the header commands needed for matching are read; the note data,
//! `#RANDOM`/`#IF` control flow and channel messages are skipped. When a
//! header appears more than once (typically inside `#IF` branches) the last
//! occurrence wins.

use crate::consts::{HEADER_REGEX, WAV_REGEX};
use crate::models::Metadata;
use encoding_rs::SHIFT_JIS;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes chart bytes: UTF-8 when valid, otherwise Shift_JIS.
pub(crate) fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => SHIFT_JIS.decode_without_bom_handling(bytes).0,
    }
}

pub(crate) fn parse(bytes: &[u8]) -> Metadata {
    let text = decode(bytes);
    let mut metadata = Metadata::default();
    for line in text.lines() {
        let line = line.trim();
        if !line.starts_with('#') {
            continue;
        }
        if let Some(captures) = WAV_REGEX.captures(line) {
            let key = captures[1].to_ascii_uppercase();
            let file = captures[2].trim().to_string();
            metadata.sounds.insert(key, file);
            continue;
        }
        if let Some(captures) = HEADER_REGEX.captures(line) {
            let value = captures.get(2).map(|m| m.as_str().trim().to_string()).unwrap_or_default();
            match captures[1].to_ascii_uppercase().as_str() {
                "TITLE" => metadata.title = value,
                "SUBTITLE" => metadata.subtitle = value,
                "ARTIST" => metadata.artist = value,
                // `#GENLE` is a long-standing misspelling that players accept.
                "GENRE" | "GENLE" => metadata.genre = value,
                _ => {},
            }
        }
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = "\
*---------------------- HEADER FIELD
#PLAYER 1
#GENRE Pop
#TITLE Alpha Song [ANOTHER]
#SUBTITLE -another-
#ARTIST X / obj: Y
#BPM 150
#WAV01 kick.wav
#wav0z snare.ogg
#WAVZZ  hat.wav  

*---------------------- MAIN DATA FIELD
#00111:01010101
";

    #[test]
    fn test_parse_headers() {
        let metadata = parse(CHART.as_bytes());
        assert_eq!(metadata.title, "Alpha Song [ANOTHER]");
        assert_eq!(metadata.subtitle, "-another-");
        assert_eq!(metadata.artist, "X / obj: Y");
        assert_eq!(metadata.genre, "Pop");
    }

    #[test]
    fn test_parse_sound_slots() {
        let metadata = parse(CHART.as_bytes());
        assert_eq!(metadata.sounds.len(), 3);
        assert_eq!(metadata.sounds["01"], "kick.wav");
        assert_eq!(metadata.sounds["0Z"], "snare.ogg");
        assert_eq!(metadata.sounds["ZZ"], "hat.wav");
    }

    #[test]
    fn test_genle_and_last_header_wins() {
        let metadata = parse(b"#GENLE Trance\n#TITLE first\n#TITLE second\n#WAV01 a.wav\n#WAV01 b.wav\n");
        assert_eq!(metadata.genre, "Trance");
        assert_eq!(metadata.title, "second");
        assert_eq!(metadata.sounds["01"], "b.wav");
    }

    #[test]
    fn test_shift_jis_fallback() {
        let (encoded, _, _) = SHIFT_JIS.encode("#TITLE 差分テスト\r\n#ARTIST 作者\r\n");
        let metadata = parse(&encoded);
        assert_eq!(metadata.title, "差分テスト");
        assert_eq!(metadata.artist, "作者");
    }

    #[test]
    fn test_bom_and_empty_values() {
        let metadata = parse(b"\xEF\xBB\xBF#TITLE Song\n#GENRE\n");
        assert_eq!(metadata.title, "Song");
        assert_eq!(metadata.genre, "");
    }
}
