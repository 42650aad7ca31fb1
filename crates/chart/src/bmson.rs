//! Parser for BMSON (JSON) charts.

use crate::error::{ErrorKind, Result};
use crate::models::Metadata;
use exn::ResultExt;
use serde::Deserialize;

#[derive(Deserialize, Default)]
struct Bmson {
    #[serde(default)]
    info: Info,
    #[serde(default)]
    sound_channels: Vec<SoundChannel>,
}

#[derive(Deserialize, Default)]
struct Info {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    genre: String,
}

#[derive(Deserialize)]
struct SoundChannel {
    #[serde(default)]
    name: String,
}

/// BMSON has no slot identifiers, so each sound channel is keyed by its
/// position in `sound_channels`.
pub(crate) fn parse(bytes: &[u8]) -> Result<Metadata> {
    let document: Bmson =
        serde_json::from_slice(bytes).or_raise(|| ErrorKind::Malformed("invalid bmson document".to_string()))?;
    let sounds = document
        .sound_channels
        .into_iter()
        .enumerate()
        .filter(|(_, channel)| !channel.name.is_empty())
        .map(|(index, channel)| (index.to_string(), channel.name))
        .collect();
    Ok(Metadata {
        title: document.info.title,
        subtitle: document.info.subtitle,
        artist: document.info.artist,
        genre: document.info.genre,
        sounds,
    })
}
