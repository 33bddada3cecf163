//! Slocum CLI library.
//!
//! This crate provides the host side of the Slocum tools: the file-backed song
//! library, song and note table loading, the Handlebars document renderer, and
//! the command implementations used by the `slocum` binary.

pub mod commands;
pub mod input;
pub mod library;
pub mod render;
pub mod time;
