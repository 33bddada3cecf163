//! Slocum Song Library
//!
//! This crate provides the song model, schema conversion, and validation for
//! songs written for Paul Slocum's Atari 2600 Sequencer Kit.
//!
//! # Overview
//!
//! A song is an ordered list of patterns, each holding two channels of steps,
//! plus an automatic hi-hat track. Songs arrive as loosely typed JSON (from a
//! song library or an older editor) and are converted into typed values by
//! [`schema`], then checked by [`validation`] before any backend compiles them.
//!
//! # Example
//!
//! ```
//! use slocum_song::{Song, Step, validate_song};
//!
//! let mut song = Song::new("first-song", 1_460_000_000_000);
//! song.meta.title = "First song".to_string();
//! song.patterns[0].channels[0].steps[0] = Step::new(1, "C", 2).accented();
//!
//! let result = validate_song(&song);
//! assert!(result.is_ok());
//!
//! let json = song.to_json().unwrap();
//! let parsed = Song::from_json(&json).unwrap();
//! assert_eq!(parsed, song);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types
//! - [`schema`]: Untyped JSON to [`Song`] conversion
//! - [`song`]: Song, pattern, channel, step, and hat types
//! - [`validation`]: Song validation functions

pub mod error;
pub mod schema;
pub mod song;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    BackendError, ErrorCode, SchemaError, SongError, ValidationError, ValidationResult,
    ValidationWarning, WarningCode,
};
pub use song::{
    slot_increment, Channel, HatConfig, Pattern, Song, SongMeta, Step, CHANNELS_PER_PATTERN,
    HATS_DISABLED, HAT_PATTERN_LENGTH, SLOTS_PER_PATTERN,
};
pub use validation::{is_valid_note_name, validate_song};
