//! Delete command implementation

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use crate::library::SongLibrary;

/// Run the delete command
///
/// # Returns
/// Exit code: 0 if the song was deleted, 1 if no song had the id
pub fn run(library_path: &Path, id: &str) -> Result<ExitCode> {
    let mut library = SongLibrary::open(library_path)?;

    if library.delete(id)? {
        println!("{} {}", "Deleted:".green().bold(), id);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} no song with id {}", "NOT FOUND".red().bold(), id);
        Ok(ExitCode::from(1))
    }
}
