//! Song and note table loading for commands.

use anyhow::{bail, Context, Result};
use slocum_backend_asm::NoteTable;
use slocum_song::Song;
use std::fs;
use std::path::Path;

use crate::library::SongLibrary;

/// Environment variable pointing at the note table.
pub const NOTES_ENV: &str = "SLOCUM_NOTES";

/// Where a command reads its song from.
#[derive(Debug, Clone, Copy)]
pub enum SongSource<'a> {
    /// A song stored in the library under this id.
    Library { library: &'a Path, id: &'a str },
    /// A standalone song JSON file.
    File(&'a Path),
}

impl<'a> SongSource<'a> {
    /// Picks the source from the command's arguments.
    pub fn from_args(library: &'a Path, id: Option<&'a str>, file: Option<&'a Path>) -> Result<Self> {
        match (id, file) {
            (Some(id), None) => Ok(SongSource::Library { library, id }),
            (None, Some(file)) => Ok(SongSource::File(file)),
            (Some(_), Some(_)) => bail!("give either a song id or --file, not both"),
            (None, None) => bail!("no song given (pass a song id or --file)"),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SongSource::Library { id, .. } => format!("song {}", id),
            SongSource::File(path) => path.display().to_string(),
        }
    }
}

/// Loads a song from its source.
pub fn load_song(source: SongSource<'_>) -> Result<Song> {
    match source {
        SongSource::Library { library, id } => {
            let library = SongLibrary::open(library)?;
            library
                .get(id)
                .cloned()
                .with_context(|| format!("no song with id '{}' in {}", id, library.path().display()))
        }
        SongSource::File(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read song file: {}", path.display()))?;
            Song::from_json(&json)
                .with_context(|| format!("Failed to parse song file: {}", path.display()))
        }
    }
}

/// Loads a JSON note table.
pub fn load_note_table(path: &Path) -> Result<NoteTable> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read note table: {}", path.display()))?;
    let table = NoteTable::from_json(&json)
        .with_context(|| format!("Failed to parse note table: {}", path.display()))?;

    tracing::debug!(
        percussion = table.percussion.len(),
        tunings = table.tunings.len(),
        "loaded note table"
    );
    Ok(table)
}
