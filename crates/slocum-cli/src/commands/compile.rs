//! Compile command implementation
//!
//! Compiles a song into Sequencer Kit assembly and writes the document.

use anyhow::{Context, Result};
use colored::Colorize;
use slocum_backend_asm::{AssembleError, Assembler};
use slocum_song::{validate_song, BackendError};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::reporting::print_validation_results;
use crate::input::{load_note_table, load_song, SongSource};
use crate::render::HandlebarsRenderer;
use crate::time::ChronoFormatter;

/// Options of the compile command.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions<'a> {
    /// Note table JSON file
    pub notes: &'a Path,
    /// Directory with `.hbs` templates overriding the built-in ones
    pub template_dir: Option<&'a Path>,
    /// Template to render with
    pub template: &'a str,
    /// Output file (default: stdout)
    pub output: Option<&'a Path>,
}

/// Run the compile command
///
/// # Returns
/// Exit code: 0 on success, 1 if the song is invalid
pub fn run(source: SongSource<'_>, options: CompileOptions<'_>) -> Result<ExitCode> {
    let song = load_song(source).with_context(|| format!("Failed to load {}", source.describe()))?;
    let notes = load_note_table(options.notes)?;
    let renderer = match options.template_dir {
        Some(dir) => HandlebarsRenderer::with_template_dir(dir)?,
        None => HandlebarsRenderer::new()?,
    };
    let formatter = ChronoFormatter::default();

    let assembler = Assembler::new(&notes, &formatter, &renderer).with_template(options.template);
    let text = match assembler.assemble(&song) {
        Ok(text) => text,
        Err(AssembleError::InvalidSong(_)) => {
            eprintln!("{} {}", "Invalid song:".red().bold(), source.describe());
            print_validation_results(&validate_song(&song));
            return Ok(ExitCode::from(1));
        }
        Err(e) => {
            tracing::warn!(code = e.code(), category = e.category(), "compilation failed");
            return Err(e).with_context(|| format!("Failed to compile {}", source.describe()));
        }
    };

    match options.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            eprintln!(
                "{} {} -> {}",
                "Compiled:".green().bold(),
                song.display_title(),
                path.display()
            );
        }
        None => print!("{}", text),
    }
    Ok(ExitCode::SUCCESS)
}
