use crate::load::ChartRecord;
use crate::matching::MatchOutcome;
use sabun_chart::{Chart, SoundSlots, same_stem};
use std::path::{Path, PathBuf};

/// A loose chart, the sound files that should move with it, and (once
/// classified) its verdict.
#[derive(Debug)]
pub struct SabunUnit {
    pub record: ChartRecord,
    /// Sibling sound files claimed by the chart's sound slots, each listed once.
    pub sounds: Vec<PathBuf>,
    pub outcome: Option<MatchOutcome>,
}
impl SabunUnit {
    pub fn new(record: ChartRecord, sounds: Vec<PathBuf>) -> Self {
        Self { record, sounds, outcome: None }
    }

    pub fn path(&self) -> &Path {
        self.record.path()
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.record.chart()
    }
}

/// Picks the files in `siblings` that some slot in `slots` refers to.
///
/// Files are considered in order. Each slot is claimed by the first file
/// whose stem matches its reference, so of `kick.wav` and `kick.ogg` only the
/// first is taken. A file that fills several slots is still listed once.
pub(crate) fn claim_sounds(slots: &SoundSlots, siblings: &[PathBuf]) -> Vec<PathBuf> {
    let mut unclaimed: Vec<&str> = slots.values().map(String::as_str).collect();
    let mut claimed = Vec::new();
    for sound in siblings {
        let Some(name) = sound.file_name().map(|n| n.to_string_lossy()) else {
            continue;
        };
        let before = unclaimed.len();
        unclaimed.retain(|reference| !same_stem(reference, &name));
        if unclaimed.len() < before {
            claimed.push(sound.clone());
        }
        if unclaimed.is_empty() {
            break;
        }
    }
    claimed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(&str, &str)]) -> SoundSlots {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| Path::new("/sabun").join(n)).collect()
    }

    #[test]
    fn test_claims_by_stem() {
        let slots = slots(&[("01", "kick.wav"), ("02", "snare.wav"), ("03", "missing.wav")]);
        let siblings = paths(&["kick.ogg", "other.wav", "snare.wav"]);
        assert_eq!(claim_sounds(&slots, &siblings), paths(&["kick.ogg", "snare.wav"]));
    }

    #[test]
    fn test_first_file_takes_the_slot() {
        let slots = slots(&[("01", "kick.wav")]);
        let siblings = paths(&["kick.flac", "kick.wav"]);
        assert_eq!(claim_sounds(&slots, &siblings), paths(&["kick.flac"]));
    }

    #[test]
    fn test_shared_file_listed_once() {
        let slots = slots(&[("01", "kick.wav"), ("02", "kick.wav"), ("0Z", "sub/kick.ogg")]);
        let siblings = paths(&["kick.wav"]);
        assert_eq!(claim_sounds(&slots, &siblings), paths(&["kick.wav"]));
    }

    #[test]
    fn test_no_slots_no_sounds() {
        assert!(claim_sounds(&SoundSlots::new(), &paths(&["kick.wav"])).is_empty());
    }
}
