//! Error type for assembly generation.

use slocum_song::{BackendError, ValidationError};
use thiserror::Error;

use crate::render::RenderError;

/// Error type for assembly generation.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// The song failed validation and was not compiled.
    #[error("song validation failed: {}", join_errors(.0))]
    InvalidSong(Vec<ValidationError>),

    /// Step count does not evenly divide the 32 sequencer slots.
    #[error("step count {steps} does not evenly divide 32")]
    InvalidStepCount { steps: u8 },

    /// A channel's step list does not match the pattern's step count.
    #[error("channel has {found} steps, expected {expected}")]
    StepCountMismatch { expected: usize, found: usize },

    /// A pattern does not hold exactly two channels.
    #[error("pattern {pattern} has {found} channels, expected 2")]
    WrongChannelCount { pattern: usize, found: usize },

    /// Channel index outside the two physical channels.
    #[error("channel index {channel} out of range (patterns have 2 channels)")]
    ChannelOutOfRange { channel: usize },

    /// The note encoder produced the rest sentinel as a real code.
    #[error("note encoder returned reserved rest code 255 for sound {sound:?} note {note:?} octave {octave:?}")]
    ReservedCode {
        sound: Option<u8>,
        note: Option<String>,
        octave: Option<u8>,
    },

    /// Two different blocks hashed to the same identity.
    #[error("block identity collision on {identity}")]
    IdentityCollision { identity: String },

    /// A pattern table ran out of indices.
    #[error("{table} pattern table is full ({capacity} entries)")]
    TableFull {
        table: &'static str,
        capacity: usize,
    },

    /// The document data could not be converted for the renderer.
    #[error("document data error: {0}")]
    DataBag(#[from] serde_json::Error),

    /// The template renderer failed.
    #[error("template '{template}' failed to render: {source}")]
    Render {
        template: String,
        #[source]
        source: RenderError,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl BackendError for AssembleError {
    fn code(&self) -> &'static str {
        match self {
            AssembleError::InvalidSong(_) => "ASM_001",
            AssembleError::InvalidStepCount { .. } => "ASM_002",
            AssembleError::StepCountMismatch { .. } => "ASM_003",
            AssembleError::ChannelOutOfRange { .. } => "ASM_004",
            AssembleError::ReservedCode { .. } => "ASM_005",
            AssembleError::IdentityCollision { .. } => "ASM_006",
            AssembleError::TableFull { .. } => "ASM_007",
            AssembleError::DataBag(_) => "ASM_008",
            AssembleError::Render { .. } => "ASM_009",
            AssembleError::WrongChannelCount { .. } => "ASM_010",
        }
    }

    fn category(&self) -> &'static str {
        "asm"
    }
}
