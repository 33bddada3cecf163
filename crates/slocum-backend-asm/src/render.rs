//! Collaborators that turn compiled data into a finished document.
//!
//! The assembler owns neither templating nor date formatting. Hosts supply
//! both through these traits; plain closures implement them too.

use serde_json::Value;

/// Error produced by a template renderer.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Renders a named template with a JSON data bag.
pub trait TemplateRenderer {
    /// Renders `template` with `data`. The returned text is used verbatim.
    fn render(&self, template: &str, data: &Value) -> Result<String, RenderError>;
}

impl<F> TemplateRenderer for F
where
    F: Fn(&str, &Value) -> Result<String, RenderError>,
{
    fn render(&self, template: &str, data: &Value) -> Result<String, RenderError> {
        self(template, data)
    }
}

/// Formats a millisecond Unix timestamp for display in the document header.
pub trait TimestampFormatter {
    fn format_timestamp(&self, millis: i64) -> String;
}

impl<F> TimestampFormatter for F
where
    F: Fn(i64) -> String,
{
    fn format_timestamp(&self, millis: i64) -> String {
        self(millis)
    }
}
