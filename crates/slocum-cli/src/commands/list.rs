//! List command implementation

use anyhow::Result;
use colored::Colorize;
use slocum_backend_asm::TimestampFormatter;
use std::path::Path;
use std::process::ExitCode;

use crate::library::SongLibrary;
use crate::time::ChronoFormatter;

/// Run the list command
pub fn run(library_path: &Path) -> Result<ExitCode> {
    let library = SongLibrary::open(library_path)?;

    if library.songs().is_empty() {
        println!("{} {}", "No songs in".dimmed(), library.path().display());
        return Ok(ExitCode::SUCCESS);
    }

    let formatter = ChronoFormatter::default();
    for song in library.songs() {
        println!(
            "{}  {}  {} {}",
            song.id.as_deref().unwrap_or("-").cyan(),
            song.display_title().bold(),
            "modified".dimmed(),
            formatter.format_timestamp(song.meta.modified)
        );
    }
    println!(
        "\n{} song(s) in {}",
        library.songs().len(),
        library.path().display()
    );
    Ok(ExitCode::SUCCESS)
}
