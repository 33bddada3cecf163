//! Main song types.

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SongError};
use crate::schema::{self, RawMeta, RawPattern};

/// Number of 32nd-note slots the sequencer plays per pattern.
pub const SLOTS_PER_PATTERN: usize = 32;

/// Number of channels in every pattern.
pub const CHANNELS_PER_PATTERN: usize = 2;

/// Length of the hi-hat pattern.
pub const HAT_PATTERN_LENGTH: usize = 32;

/// Hat start measure meaning "never start the automatic hi-hat".
pub const HATS_DISABLED: u8 = 255;

/// Step count of a freshly created pattern.
pub const DEFAULT_PATTERN_STEPS: u8 = 16;

/// Tempo of a freshly created song.
pub const DEFAULT_TEMPO: u8 = 4;

/// A complete song: metadata, patterns in playback order, and the hi-hat track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Song {
    /// Library identifier, absent for songs that were never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Song metadata.
    pub meta: SongMeta,
    /// Patterns in playback order.
    pub patterns: Vec<Pattern>,
    /// Hi-hat configuration.
    pub hats: HatConfig,
}

impl Song {
    /// Creates the outline of a new song with default parameters.
    ///
    /// The song holds a single 16-step pattern with two empty channels and a
    /// disabled hi-hat track.
    pub fn new(id: impl Into<String>, now_millis: i64) -> Self {
        Self {
            id: Some(id.into()),
            meta: SongMeta {
                title: String::new(),
                author: String::new(),
                created: now_millis,
                modified: now_millis,
                tempo: DEFAULT_TEMPO,
                tuning: 0,
            },
            patterns: vec![Pattern::empty(DEFAULT_PATTERN_STEPS)],
            hats: HatConfig::default(),
        }
    }

    /// Parses a song from a JSON string.
    ///
    /// The JSON is first parsed untyped and then converted through
    /// [`schema::song_from_value`], so structural problems are reported with
    /// the path of the offending value.
    pub fn from_json(json: &str) -> Result<Self, SongError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }

    /// Converts an untyped JSON value into a song.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, SchemaError> {
        schema::song_from_value(value)
    }

    /// Serializes the song to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the song to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the song to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Returns the display title, falling back to a placeholder.
    pub fn display_title(&self) -> &str {
        if self.meta.title.is_empty() {
            "(untitled)"
        } else {
            &self.meta.title
        }
    }
}

/// Song metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMeta")]
pub struct SongMeta {
    pub title: String,
    pub author: String,
    /// Creation instant, epoch milliseconds.
    pub created: i64,
    /// Last modification instant, epoch milliseconds.
    pub modified: i64,
    pub tempo: u8,
    /// Tuning selector forwarded to the note encoder.
    pub tuning: u8,
}

/// A rhythmic unit of 16 or 32 steps holding two channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPattern")]
pub struct Pattern {
    /// Number of steps per channel.
    pub steps: u8,
    /// Channels in physical order (channel 1, channel 2).
    pub channels: Vec<Channel>,
}

impl Pattern {
    /// Creates a pattern whose channels contain only rests.
    pub fn empty(steps: u8) -> Self {
        Self {
            steps,
            channels: (0..CHANNELS_PER_PATTERN)
                .map(|_| Channel::empty(steps as usize))
                .collect(),
        }
    }

    /// Number of sequencer slots covered by one step.
    ///
    /// Returns `None` when the step count is zero or does not evenly divide
    /// [`SLOTS_PER_PATTERN`].
    pub fn increment(&self) -> Option<usize> {
        slot_increment(self.steps)
    }
}

/// Slots per step for a given step count, if it evenly divides the pattern.
pub fn slot_increment(steps: u8) -> Option<usize> {
    let steps = steps as usize;
    if steps == 0 || SLOTS_PER_PATTERN % steps != 0 {
        None
    } else {
        Some(SLOTS_PER_PATTERN / steps)
    }
}

/// One voice within a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    /// Route this channel's compiled pattern into the low-volume table.
    pub attenuate: bool,
    pub steps: Vec<Step>,
}

impl Channel {
    /// Creates a non-attenuated channel of `len` rests.
    pub fn empty(len: usize) -> Self {
        Self {
            attenuate: false,
            steps: vec![Step::rest(); len],
        }
    }
}

/// One step within a channel. A step without a sound is a rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub octave: Option<u8>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub accent: bool,
}

impl Step {
    /// Creates a rest.
    pub fn rest() -> Self {
        Self::default()
    }

    /// Creates a sounding step.
    pub fn new(sound: u8, note: impl Into<String>, octave: u8) -> Self {
        Self {
            sound: Some(sound),
            note: Some(note.into()),
            octave: Some(octave),
            accent: false,
        }
    }

    /// Creates a step that only names a sound, as percussion steps do.
    pub fn percussion(sound: u8) -> Self {
        Self {
            sound: Some(sound),
            ..Self::default()
        }
    }

    /// Sets the accent flag.
    pub fn accented(mut self) -> Self {
        self.accent = true;
        self
    }

    /// Returns true if the step carries no sound.
    pub fn is_rest(&self) -> bool {
        self.sound.is_none()
    }
}

/// Automatic hi-hat configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HatConfig {
    /// Measure at which the hi-hat starts, [`HATS_DISABLED`] for never.
    #[serde(default = "default_hat_start")]
    pub start: u8,
    /// Volume, 0-15.
    #[serde(default = "default_hat_volume")]
    pub volume: u8,
    /// Pitch, 0-31.
    #[serde(default)]
    pub pitch: u8,
    #[serde(default = "default_hat_sound")]
    pub sound: u8,
    /// 32 entries of 0 or 1.
    pub pattern: Vec<u8>,
}

fn default_hat_start() -> u8 {
    HATS_DISABLED
}

fn default_hat_volume() -> u8 {
    5
}

fn default_hat_sound() -> u8 {
    8
}

impl Default for HatConfig {
    fn default() -> Self {
        Self {
            start: default_hat_start(),
            volume: default_hat_volume(),
            pitch: 0,
            sound: default_hat_sound(),
            pattern: vec![0; HAT_PATTERN_LENGTH],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_song_defaults() {
        let song = Song::new("abc", 1_000);
        assert_eq!(song.id.as_deref(), Some("abc"));
        assert_eq!(song.meta.created, 1_000);
        assert_eq!(song.meta.modified, 1_000);
        assert_eq!(song.meta.tempo, DEFAULT_TEMPO);
        assert_eq!(song.patterns.len(), 1);
        assert_eq!(song.patterns[0].steps, 16);
        assert_eq!(song.patterns[0].channels.len(), CHANNELS_PER_PATTERN);
        assert!(song.patterns[0].channels[0].steps.iter().all(Step::is_rest));
        assert_eq!(song.hats.start, HATS_DISABLED);
        assert_eq!(song.hats.pattern, vec![0; 32]);
    }

    #[test]
    fn test_slot_increment() {
        assert_eq!(slot_increment(16), Some(2));
        assert_eq!(slot_increment(32), Some(1));
        assert_eq!(slot_increment(8), Some(4));
        assert_eq!(slot_increment(12), None);
        assert_eq!(slot_increment(0), None);
        assert_eq!(slot_increment(64), None);
    }

    #[test]
    fn test_step_serialization_skips_empty_fields() {
        let json = serde_json::to_string(&Step::rest()).unwrap();
        assert_eq!(json, "{}");

        let json = serde_json::to_string(&Step::new(1, "C#", 3).accented()).unwrap();
        assert_eq!(json, r##"{"sound":1,"note":"C#","octave":3,"accent":true}"##);
    }

    #[test]
    fn test_display_title() {
        let mut song = Song::new("x", 0);
        assert_eq!(song.display_title(), "(untitled)");
        song.meta.title = "Moon".to_string();
        assert_eq!(song.display_title(), "Moon");
    }
}
