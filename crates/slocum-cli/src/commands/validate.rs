//! Validate command implementation
//!
//! Validates a song from the library or a file without compiling it.

use anyhow::{Context, Result};
use colored::Colorize;
use slocum_song::validate_song;
use std::process::ExitCode;

use super::reporting::print_validation_results;
use crate::input::{load_song, SongSource};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(source: SongSource<'_>) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), source.describe());

    let song = load_song(source).with_context(|| format!("Failed to load {}", source.describe()))?;
    let result = validate_song(&song);

    print_validation_results(&result);

    if result.is_ok() {
        println!(
            "\n{} {} is valid ({} pattern(s))",
            "SUCCESS".green().bold(),
            song.display_title(),
            song.patterns.len()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Song has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slocum_song::{Pattern, Song};
    use std::path::Path;

    fn write_song(dir: &tempfile::TempDir, song: &Song) -> std::path::PathBuf {
        let path = dir.path().join("song.json");
        std::fs::write(&path, song.to_json_pretty().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_valid_song() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_song(&tmp, &Song::new("ok", 0));

        let code = run(SongSource::File(&path)).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_invalid_step_count() {
        let tmp = tempfile::tempdir().unwrap();
        let mut song = Song::new("bad", 0);
        song.patterns.push(Pattern::empty(12));
        let path = write_song(&tmp, &song);

        let code = run(SongSource::File(&path)).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(run(SongSource::File(Path::new("/nonexistent/song.json"))).is_err());
    }
}
