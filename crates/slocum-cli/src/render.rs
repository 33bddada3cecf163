//! Handlebars template rendering for assembled songs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::Value;
use slocum_backend_asm::{RenderError, TemplateRenderer, DEFAULT_TEMPLATE};

/// Built-in Sequencer Kit document template.
pub const ASM_TEMPLATE: &str = include_str!("../templates/asm.hbs");

/// File extension of templates loaded from a template directory.
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Renders documents with a Handlebars registry.
///
/// The registry runs in strict mode, so a template referencing a missing key
/// fails instead of emitting an empty string. Output is never HTML-escaped.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Creates a renderer holding the built-in templates.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(DEFAULT_TEMPLATE, ASM_TEMPLATE)
            .context("Failed to register built-in asm template")?;
        Ok(Self { registry })
    }

    /// Creates a renderer and registers every `*.hbs` file in `dir` under its
    /// file stem, replacing built-in templates of the same name.
    pub fn with_template_dir(dir: &Path) -> Result<Self> {
        let mut renderer = Self::new()?;
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read template directory: {}", dir.display()))?;

        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            renderer.register_file(name, &path)?;
        }
        Ok(renderer)
    }

    /// Registers a single template file under `name`.
    pub fn register_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;
        self.registry
            .register_template_string(name, source)
            .with_context(|| format!("Failed to parse template: {}", path.display()))?;
        tracing::debug!(name, path = %path.display(), "registered template");
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, data: &Value) -> Result<String, RenderError> {
        self.registry
            .render(template, data)
            .map_err(|e| RenderError::from(e.to_string()))
    }
}
