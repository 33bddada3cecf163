//! Deserialization of stored songs.
//!
//! Two channel layouts are accepted:
//!
//! - current: `{"attenuate": false, "steps": [...]}` per channel
//! - legacy: a bare step array per channel, with attenuation stored on the
//!   pattern as `channel1attenuation` / `channel2attenuation`
//!
//! In both layouts a `null` step is a rest. The raw shapes below mirror the
//! stored JSON; the song types convert from them through `#[serde(from)]`.
//! Errors carry the JSON path of the offending value, e.g. `patterns[0].steps`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;
use crate::song::{Channel, Pattern, Song, SongMeta, Step, DEFAULT_TEMPO};

/// Converts a JSON value into a [`Song`].
pub fn song_from_value(value: &Value) -> Result<Song, SchemaError> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let mut path = err.path().to_string();
        if path == "." {
            path = ROOT_PATH.to_string();
        }
        SchemaError::new(path, err.into_inner().to_string())
    })
}

/// Path reported for errors at the top level of the document.
const ROOT_PATH: &str = "song";

/// Song metadata as stored; `modified` defaults to `created`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawMeta {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    created: i64,
    #[serde(default)]
    modified: Option<i64>,
    #[serde(default = "default_tempo")]
    tempo: u8,
    #[serde(default)]
    tuning: u8,
}

fn default_tempo() -> u8 {
    DEFAULT_TEMPO
}

impl From<RawMeta> for SongMeta {
    fn from(raw: RawMeta) -> Self {
        Self {
            title: raw.title,
            author: raw.author,
            created: raw.created,
            modified: raw.modified.unwrap_or(raw.created),
            tempo: raw.tempo,
            tuning: raw.tuning,
        }
    }
}

/// A pattern as stored, in either channel layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawPattern {
    steps: u8,
    channels: Vec<RawChannel>,
    #[serde(default)]
    channel1attenuation: Option<bool>,
    #[serde(default)]
    channel2attenuation: Option<bool>,
}

/// A channel in the current object layout or the legacy array layout.
///
/// Untagged, so a channel matching neither layout is reported at the
/// channel's own path.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChannel {
    Current(RawChannelObject),
    Legacy(Vec<Option<Step>>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChannelObject {
    #[serde(default)]
    attenuate: bool,
    steps: Vec<Option<Step>>,
}

impl From<RawPattern> for Pattern {
    fn from(raw: RawPattern) -> Self {
        // legacy layout keeps the flags on the pattern
        let legacy_flags = [raw.channel1attenuation, raw.channel2attenuation];

        let channels = raw
            .channels
            .into_iter()
            .enumerate()
            .map(|(i, channel)| match channel {
                RawChannel::Current(object) => Channel {
                    attenuate: object.attenuate,
                    steps: fill_rests(object.steps),
                },
                RawChannel::Legacy(steps) => Channel {
                    attenuate: legacy_flags.get(i).copied().flatten().unwrap_or(false),
                    steps: fill_rests(steps),
                },
            })
            .collect();

        Self {
            steps: raw.steps,
            channels,
        }
    }
}

fn fill_rests(steps: Vec<Option<Step>>) -> Vec<Step> {
    steps.into_iter().map(Option::unwrap_or_default).collect()
}
