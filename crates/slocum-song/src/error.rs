//! Error types for song conversion and validation.

use thiserror::Error;

/// Error codes for song validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Pattern errors (E001-E004)
    /// E001: Step count does not evenly divide 32
    InvalidStepCount,
    /// E002: Pattern does not have exactly two channels
    WrongChannelCount,
    /// E003: Channel step list length differs from the pattern step count
    StepCountMismatch,
    /// E004: Note name is not a valid note
    InvalidNote,

    // Hi-hat errors (E010-E013)
    /// E010: Hat pattern does not have 32 entries
    HatPatternLength,
    /// E011: Hat pattern entry is not 0 or 1
    HatPatternValue,
    /// E012: Hat volume out of range
    HatVolumeOutOfRange,
    /// E013: Hat pitch out of range
    HatPitchOutOfRange,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidStepCount => "E001",
            ErrorCode::WrongChannelCount => "E002",
            ErrorCode::StepCountMismatch => "E003",
            ErrorCode::InvalidNote => "E004",
            ErrorCode::HatPatternLength => "E010",
            ErrorCode::HatPatternValue => "E011",
            ErrorCode::HatVolumeOutOfRange => "E012",
            ErrorCode::HatPitchOutOfRange => "E013",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for song validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Song has no title
    MissingTitle,
    /// W002: Step count divides 32 but is neither 16 nor 32
    UnusualStepCount,
    /// W003: Song has no patterns
    NoPatterns,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingTitle => "W001",
            WarningCode::UnusualStepCount => "W002",
            WarningCode::NoPatterns => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "patterns\[0\].steps").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Schema error raised while converting untyped JSON into a [`crate::Song`].
///
/// Names the JSON path of the offending value, e.g. `patterns[0].steps`, or
/// `song` when the problem is at the root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at {path})")]
pub struct SchemaError {
    path: String,
    message: String,
}

impl SchemaError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// JSON path of the offending value.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Top-level error type for song operations.
#[derive(Debug, Error)]
pub enum SongError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The JSON parsed but does not describe a song.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Result of song validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Gives hosts a stable code and category for any backend failure without the
/// song crate depending on backend crates.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting, e.g. "ASM_001".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::InvalidStepCount.code(), "E001");
        assert_eq!(ErrorCode::WrongChannelCount.code(), "E002");
        assert_eq!(ErrorCode::HatPatternLength.code(), "E010");
        assert_eq!(ErrorCode::HatPitchOutOfRange.code(), "E013");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::MissingTitle.code(), "W001");
        assert_eq!(WarningCode::NoPatterns.code(), "W003");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::InvalidNote, "unknown note 'H'");
        assert_eq!(err.to_string(), "E004: unknown note 'H'");

        let err_with_path = ValidationError::with_path(
            ErrorCode::InvalidStepCount,
            "steps must divide 32",
            "patterns[0].steps",
        );
        assert_eq!(
            err_with_path.to_string(),
            "E001: steps must divide 32 (at patterns[0].steps)"
        );
    }

    #[test]
    fn test_schema_error_names_path() {
        let err = SchemaError::new("patterns[1].steps", "invalid type: string \"x\", expected u8");
        assert_eq!(err.path(), "patterns[1].steps");
        assert_eq!(
            err.to_string(),
            "invalid type: string \"x\", expected u8 (at patterns[1].steps)"
        );
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::HatPatternLength, "short"));
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 1);
        assert!(result.into_result().is_err());
    }
}
