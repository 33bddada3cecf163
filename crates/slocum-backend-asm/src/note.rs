//! Note encoding for the TIA sound chip.
//!
//! The assembler never looks up chip codes itself. It asks a [`NoteEncoder`]
//! for the code of each step; `None` means the step is a rest and is emitted
//! as [`REST_CODE`]. Code 0 is treated the same way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slocum_song::Step;

/// Code emitted for rests and sustained slots.
pub const REST_CODE: u8 = 255;

/// Resolves a step to a playback code.
///
/// Implementations must never return [`REST_CODE`] for a sounding step; the
/// pattern compiler rejects that as a sentinel collision.
pub trait NoteEncoder {
    /// Returns the code for `step` under the given tuning, or `None` for a rest.
    fn encode(&self, tuning: u8, step: &Step) -> Option<u8>;
}

impl<F> NoteEncoder for F
where
    F: Fn(u8, &Step) -> Option<u8>,
{
    fn encode(&self, tuning: u8, step: &Step) -> Option<u8> {
        self(tuning, step)
    }
}

/// One tonal entry of a tuning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneEntry {
    pub sound: u8,
    pub note: String,
    pub octave: u8,
    pub code: u8,
}

/// Data-driven note encoder.
///
/// Sounds listed in `percussion` are percussive and resolve by sound id
/// alone. Every other sound resolves through the tuning selected by the song,
/// keyed by sound, note, and octave.
///
/// ```json
/// {
///   "percussion": { "10": 17 },
///   "tunings": [[ { "sound": 1, "note": "C", "octave": 2, "code": 31 } ]]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteTable {
    /// Percussion codes keyed by sound id.
    #[serde(default)]
    pub percussion: BTreeMap<u8, u8>,
    /// Tonal entries, one list per tuning.
    #[serde(default)]
    pub tunings: Vec<Vec<ToneEntry>>,
}

impl NoteTable {
    /// Parses a note table from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns true if the sound is resolved through the percussion table.
    pub fn is_percussive(&self, sound: u8) -> bool {
        self.percussion.contains_key(&sound)
    }
}

impl NoteEncoder for NoteTable {
    fn encode(&self, tuning: u8, step: &Step) -> Option<u8> {
        let sound = step.sound?;
        if let Some(code) = self.percussion.get(&sound) {
            return Some(*code);
        }

        let note = step.note.as_deref()?;
        let octave = step.octave?;
        self.tunings
            .get(tuning as usize)?
            .iter()
            .find(|e| e.sound == sound && e.octave == octave && e.note == note)
            .map(|e| e.code)
    }
}
