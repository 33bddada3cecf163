//! Timestamp formatting for document headers.

use chrono::DateTime;
use slocum_backend_asm::TimestampFormatter;

/// Default header date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Formats Unix millisecond timestamps as UTC dates.
#[derive(Debug, Clone)]
pub struct ChronoFormatter {
    format: String,
}

impl Default for ChronoFormatter {
    fn default() -> Self {
        Self::new(DATE_FORMAT)
    }
}

impl ChronoFormatter {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl TimestampFormatter for ChronoFormatter {
    fn format_timestamp(&self, millis: i64) -> String {
        match DateTime::from_timestamp_millis(millis) {
            Some(date) => date.format(&self.format).to_string(),
            None => millis.to_string(),
        }
    }
}
