//! Slocum Assembly Backend - Deterministic Sequencer Kit Source Generation
//!
//! This crate compiles songs from [`slocum_song`] into assembly source for
//! Paul Slocum's Atari 2600 Sequencer Kit.
//!
//! # Pipeline
//!
//! 1. Every channel of every pattern is spread over 32 slots and cut into four
//!    8-slot blocks ([`pattern`]).
//! 2. Blocks are deduplicated by BLAKE3 content hash in first-occurrence order
//!    ([`block`]).
//! 3. Channels are routed into the high or low volume table by attenuation and
//!    the sequence bytes for both physical channels are recorded ([`table`]).
//! 4. Blocks receive `PatternN` labels and the hat track is bit-packed
//!    ([`hats`]).
//! 5. The data bag is handed to a [`TemplateRenderer`] ([`assemble`]).
//!
//! # Determinism
//!
//! Every compilation builds its own block cache and table counters. The same
//! song, encoder, and renderer always produce byte-identical output, and
//! concurrent compilations of different songs never interact.
//!
//! # Module Structure
//!
//! - [`note`]: Note encoder contract and the data-driven [`NoteTable`]
//! - [`render`]: Template renderer and timestamp formatter contracts
//! - [`error`]: [`AssembleError`]

pub mod assemble;
pub mod block;
pub mod error;
pub mod hats;
pub mod note;
pub mod pattern;
pub mod render;
pub mod table;

// Re-export main types
pub use assemble::{
    assemblify, Assembler, DocumentData, DocumentHats, DocumentMeta, DEFAULT_TEMPLATE,
};
pub use block::{BlockCache, BlockRef, CompiledBlock};
pub use error::AssembleError;
pub use hats::encode_hat_pattern;
pub use note::{NoteEncoder, NoteTable, ToneEntry, REST_CODE};
pub use pattern::{compile_channel, CompiledChannel};
pub use render::{RenderError, TemplateRenderer, TimestampFormatter};
pub use table::{compile_patterns, PatternTables, TableAssembler, HIGH_TABLE_BASE, LOW_TABLE_BASE};
