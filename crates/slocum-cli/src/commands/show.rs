//! Show command implementation
//!
//! Prints a stored song as pretty JSON.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;

use crate::input::{load_song, SongSource};

/// Run the show command
pub fn run(library_path: &Path, id: &str) -> Result<ExitCode> {
    let song = load_song(SongSource::Library {
        library: library_path,
        id,
    })?;
    println!("{}", song.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}
