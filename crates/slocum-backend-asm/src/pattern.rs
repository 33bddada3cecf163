//! Channel pattern compilation.
//!
//! The sequencer always plays 32 slots per pattern. A channel with fewer steps
//! is spread across the slots: with 16 steps every second slot carries a step
//! and the slots in between are rests.
//!
//! Slots are emitted in pairs as byte declarations, and every 8 slots close a
//! group with an accent declaration:
//!
//! ```text
//!     byte 31, 255
//!     byte 255, 255
//!     byte 27, 255
//!     byte 255, 255
//!
//!     byte %10000000
//! ```
//!
//! Each group is one block in the [`BlockCache`].

use slocum_song::{slot_increment, Channel, Step, SLOTS_PER_PATTERN};

use crate::block::{BlockCache, BlockRef};
use crate::error::AssembleError;
use crate::note::{NoteEncoder, REST_CODE};

/// Slots per block (one accent declaration).
pub const SLOTS_PER_GROUP: usize = 8;

/// Blocks per compiled channel.
pub const GROUPS_PER_PATTERN: usize = SLOTS_PER_PATTERN / SLOTS_PER_GROUP;

/// Indentation and keyword shared by all byte declarations.
pub(crate) const BYTE_DECL: &str = "    byte ";

/// A channel compiled into block references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledChannel {
    /// Route into the low-volume table.
    pub attenuate: bool,
    /// Blocks in playback order.
    pub blocks: [BlockRef; GROUPS_PER_PATTERN],
}

/// Compiles one channel of a pattern into four block references.
///
/// # Arguments
/// * `channel` - Channel to compile; must hold exactly `steps` steps
/// * `steps` - The pattern's step count; must evenly divide 32
/// * `tuning` - Tuning selector forwarded to the encoder
/// * `encoder` - Step to code lookup
/// * `cache` - Block cache of the current compilation
pub fn compile_channel<E: NoteEncoder + ?Sized>(
    channel: &Channel,
    steps: u8,
    tuning: u8,
    encoder: &E,
    cache: &mut BlockCache,
) -> Result<CompiledChannel, AssembleError> {
    let increment = slot_increment(steps).ok_or(AssembleError::InvalidStepCount { steps })?;
    if channel.steps.len() != steps as usize {
        return Err(AssembleError::StepCountMismatch {
            expected: steps as usize,
            found: channel.steps.len(),
        });
    }

    let mut blocks = [BlockRef::default(); GROUPS_PER_PATTERN];
    let mut pending = channel.steps.iter();
    let mut group = String::new();
    let mut accents = String::with_capacity(SLOTS_PER_GROUP);

    for slot in 0..SLOTS_PER_PATTERN {
        let step = if slot % increment == 0 {
            pending.next()
        } else {
            None
        };
        let code = match step {
            Some(step) => resolve(encoder, tuning, step)?,
            None => None,
        };

        if slot % 2 == 0 {
            group.push_str(BYTE_DECL);
            group.push_str(&code.unwrap_or(REST_CODE).to_string());
            group.push_str(", ");
        } else {
            group.push_str(&code.unwrap_or(REST_CODE).to_string());
            group.push('\n');
        }

        let accented = code.is_some() && step.map_or(false, |s| s.accent);
        accents.push(if accented { '1' } else { '0' });

        if (slot + 1) % SLOTS_PER_GROUP == 0 {
            group.push('\n');
            group.push_str(BYTE_DECL);
            group.push('%');
            group.push_str(&accents);
            group.push_str("\n\n");

            blocks[slot / SLOTS_PER_GROUP] = cache.insert(std::mem::take(&mut group))?;
            accents.clear();
        }
    }

    Ok(CompiledChannel {
        attenuate: channel.attenuate,
        blocks,
    })
}

fn resolve<E: NoteEncoder + ?Sized>(
    encoder: &E,
    tuning: u8,
    step: &Step,
) -> Result<Option<u8>, AssembleError> {
    match encoder.encode(tuning, step) {
        Some(REST_CODE) => Err(AssembleError::ReservedCode {
            sound: step.sound,
            note: step.note.clone(),
            octave: step.octave,
        }),
        // the sequencer has no code 0; it plays as an unaccented rest
        Some(0) | None => Ok(None),
        code => Ok(code),
    }
}
