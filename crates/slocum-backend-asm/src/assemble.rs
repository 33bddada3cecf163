//! Main entry point for assembly generation.
//!
//! [`Assembler`] validates a song, compiles its patterns and hat track into
//! text fragments, and hands the resulting data bag to a template renderer.
//! The input song is only read; the data bag is a separate value.

use serde::Serialize;
use slocum_song::{validate_song, Song};

use crate::error::AssembleError;
use crate::hats::encode_hat_pattern;
use crate::note::NoteEncoder;
use crate::render::{TemplateRenderer, TimestampFormatter};
use crate::table::{compile_patterns, PatternTables};

/// Name of the template the Sequencer Kit document is rendered with.
pub const DEFAULT_TEMPLATE: &str = "asm";

/// Data bag passed to the template renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: DocumentMeta,
    pub patterns: PatternTables,
    pub hats: DocumentHats,
}

/// Song metadata with the creation date already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMeta {
    pub title: String,
    pub author: String,
    pub created: String,
    pub modified: i64,
    pub tempo: u8,
    pub tuning: u8,
}

/// Hat configuration with the pattern already encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHats {
    pub start: u8,
    pub volume: u8,
    pub pitch: u8,
    pub sound: u8,
    pub pattern: String,
}

/// Compiles songs into Sequencer Kit assembly documents.
///
/// # Example
/// ```
/// use serde_json::Value;
/// use slocum_backend_asm::{Assembler, RenderError};
/// use slocum_song::{Song, Step};
///
/// let encoder = |_tuning: u8, step: &Step| step.sound;
/// let formatter = |millis: i64| millis.to_string();
/// let renderer = |_name: &str, data: &Value| -> Result<String, RenderError> {
///     Ok(data["patterns"]["channel1sequence"].as_str().unwrap_or_default().to_string())
/// };
///
/// let song = Song::new("demo", 0);
/// let text = Assembler::new(&encoder, &formatter, &renderer).assemble(&song).unwrap();
/// assert_eq!(text, "    byte 1\n");
/// ```
pub struct Assembler<'a> {
    encoder: &'a dyn NoteEncoder,
    formatter: &'a dyn TimestampFormatter,
    renderer: &'a dyn TemplateRenderer,
    template: String,
}

impl<'a> Assembler<'a> {
    /// Creates an assembler rendering with [`DEFAULT_TEMPLATE`].
    pub fn new(
        encoder: &'a dyn NoteEncoder,
        formatter: &'a dyn TimestampFormatter,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            encoder,
            formatter,
            renderer,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Renders with a different template name.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Validates `song` and builds the data bag without rendering it.
    pub fn build_document(&self, song: &Song) -> Result<DocumentData, AssembleError> {
        let warnings = validate_song(song)
            .into_result()
            .map_err(AssembleError::InvalidSong)?;
        for warning in &warnings {
            tracing::debug!(code = warning.code.code(), "{}", warning.message);
        }

        let patterns = compile_patterns(&song.patterns, song.meta.tuning, self.encoder)?;

        Ok(DocumentData {
            id: song.id.clone(),
            meta: DocumentMeta {
                title: song.meta.title.clone(),
                author: song.meta.author.clone(),
                created: self.formatter.format_timestamp(song.meta.created),
                modified: song.meta.modified,
                tempo: song.meta.tempo,
                tuning: song.meta.tuning,
            },
            patterns,
            hats: DocumentHats {
                start: song.hats.start,
                volume: song.hats.volume,
                pitch: song.hats.pitch,
                sound: song.hats.sound,
                pattern: encode_hat_pattern(&song.hats.pattern),
            },
        })
    }

    /// Builds the data bag and renders it. Renderer output is returned as is.
    pub fn assemble(&self, song: &Song) -> Result<String, AssembleError> {
        let document = self.build_document(song)?;
        let data = serde_json::to_value(&document)?;

        self.renderer
            .render(&self.template, &data)
            .map_err(|source| AssembleError::Render {
                template: self.template.clone(),
                source,
            })
    }
}

/// Compiles `song` with [`DEFAULT_TEMPLATE`].
///
/// # Arguments
/// * `song` - Song to compile; left untouched
/// * `encoder` - Step to chip code lookup
/// * `formatter` - Formats the creation timestamp
/// * `renderer` - Renders the final document
pub fn assemblify(
    song: &Song,
    encoder: &dyn NoteEncoder,
    formatter: &dyn TimestampFormatter,
    renderer: &dyn TemplateRenderer,
) -> Result<String, AssembleError> {
    Assembler::new(encoder, formatter, renderer).assemble(song)
}
