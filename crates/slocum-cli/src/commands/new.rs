//! New command implementation
//!
//! Creates a song with default content and stores it in the library.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use crate::library::{create_song, now_millis, SongLibrary};

/// Run the new command
///
/// # Arguments
/// * `library_path` - Library file to store the song in
/// * `title` - Optional song title
/// * `author` - Optional song author
/// * `tempo` - Optional tempo delay
pub fn run(
    library_path: &Path,
    title: Option<&str>,
    author: Option<&str>,
    tempo: Option<u8>,
) -> Result<ExitCode> {
    let now = now_millis();
    let mut song = create_song(now);
    if let Some(title) = title {
        song.meta.title = title.to_string();
    }
    if let Some(author) = author {
        song.meta.author = author.to_string();
    }
    if let Some(tempo) = tempo {
        song.meta.tempo = tempo;
    }

    let mut library = SongLibrary::open(library_path)?;
    let id = library.save(song, now)?;

    println!("{} {}", "Created:".green().bold(), id);
    println!("{} {}", "Library:".dimmed(), library.path().display());
    Ok(ExitCode::SUCCESS)
}
