//! Slocum CLI - song library management and Sequencer Kit assembly export
//!
//! This binary provides commands for creating, listing, validating, and
//! compiling songs for Paul Slocum's Atari 2600 Sequencer Kit.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use slocum_cli::commands;
use slocum_cli::commands::compile::CompileOptions;
use slocum_cli::input::{SongSource, NOTES_ENV};
use slocum_cli::library::{default_library_path, LIBRARY_ENV};

/// Slocum - Atari 2600 Sequencer Kit song tools
#[derive(Parser)]
#[command(name = "slocum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Song library file (default: songs.json in the user data directory)
    #[arg(long, global = true, env = LIBRARY_ENV)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new song in the library
    New {
        /// Song title
        #[arg(short, long)]
        title: Option<String>,

        /// Song author
        #[arg(short, long)]
        author: Option<String>,

        /// Tempo delay (higher is slower)
        #[arg(long)]
        tempo: Option<u8>,
    },

    /// List songs in the library
    List,

    /// Print a stored song as JSON
    Show {
        /// Song id
        id: String,
    },

    /// Delete a song from the library
    Delete {
        /// Song id
        id: String,
    },

    /// Validate a song
    Validate {
        /// Song id in the library
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        id: Option<String>,

        /// Song JSON file instead of a library song
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Compile a song into Sequencer Kit assembly
    Compile {
        /// Song id in the library
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        id: Option<String>,

        /// Song JSON file instead of a library song
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Note table JSON file
        #[arg(short, long, env = NOTES_ENV)]
        notes: PathBuf,

        /// Directory of .hbs templates overriding the built-in ones
        #[arg(long)]
        template_dir: Option<PathBuf>,

        /// Template to render with
        #[arg(long, default_value = slocum_backend_asm::DEFAULT_TEMPLATE)]
        template: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let library = cli.library.unwrap_or_else(default_library_path);
    tracing::debug!(library = %library.display(), "using song library");

    let result = match cli.command {
        Commands::New {
            title,
            author,
            tempo,
        } => commands::new::run(&library, title.as_deref(), author.as_deref(), tempo),
        Commands::List => commands::list::run(&library),
        Commands::Show { id } => commands::show::run(&library, &id),
        Commands::Delete { id } => commands::delete::run(&library, &id),
        Commands::Validate { id, file } => {
            SongSource::from_args(&library, id.as_deref(), file.as_deref())
                .and_then(commands::validate::run)
        }
        Commands::Compile {
            id,
            file,
            notes,
            template_dir,
            template,
            output,
        } => SongSource::from_args(&library, id.as_deref(), file.as_deref()).and_then(|source| {
            commands::compile::run(
                source,
                CompileOptions {
                    notes: &notes,
                    template_dir: template_dir.as_deref(),
                    template: &template,
                    output: output.as_deref(),
                },
            )
        }),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_compile() {
        let cli = Cli::try_parse_from([
            "slocum",
            "compile",
            "abc",
            "--notes",
            "notes.json",
            "-o",
            "out.asm",
        ])
        .unwrap();
        match cli.command {
            Commands::Compile {
                id,
                file,
                notes,
                template,
                output,
                ..
            } => {
                assert_eq!(id.as_deref(), Some("abc"));
                assert!(file.is_none());
                assert_eq!(notes, PathBuf::from("notes.json"));
                assert_eq!(template, "asm");
                assert_eq!(output, Some(PathBuf::from("out.asm")));
            }
            _ => panic!("expected compile command"),
        }
    }

    #[test]
    fn test_cli_validate_requires_song() {
        assert!(Cli::try_parse_from(["slocum", "validate"]).is_err());
        assert!(Cli::try_parse_from(["slocum", "validate", "abc", "--file", "x.json"]).is_err());
        assert!(Cli::try_parse_from(["slocum", "validate", "--file", "x.json"]).is_ok());
    }

    #[test]
    fn test_cli_global_library() {
        let cli = Cli::try_parse_from(["slocum", "list", "--library", "mine.json"]).unwrap();
        assert_eq!(cli.library, Some(PathBuf::from("mine.json")));
        assert!(matches!(cli.command, Commands::List));
    }
}
