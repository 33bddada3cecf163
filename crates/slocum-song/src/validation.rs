//! Song validation logic.
//!
//! Validation runs on a typed [`Song`] and is the input boundary of the
//! assembler: a song that fails here is never compiled.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::song::{slot_increment, Pattern, Song, CHANNELS_PER_PATTERN, HAT_PATTERN_LENGTH};

/// Regex pattern for valid note names: a letter A-G with an optional sharp or flat.
const NOTE_PATTERN: &str = r"^[A-G][#b]?$";

/// Maximum hat volume.
pub const MAX_HAT_VOLUME: u8 = 15;

/// Maximum hat pitch.
pub const MAX_HAT_PITCH: u8 = 31;

static NOTE_REGEX: OnceLock<Regex> = OnceLock::new();

fn note_regex() -> &'static Regex {
    NOTE_REGEX.get_or_init(|| Regex::new(NOTE_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `name` is a valid note name (e.g. "C", "F#", "Bb").
pub fn is_valid_note_name(name: &str) -> bool {
    note_regex().is_match(name)
}

/// Validates a song and returns a validation result.
///
/// # Example
/// ```
/// use slocum_song::{Song, validate_song};
///
/// let song = Song::new("demo", 0);
/// let result = validate_song(&song);
/// assert!(result.is_ok());
/// ```
pub fn validate_song(song: &Song) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (idx, pattern) in song.patterns.iter().enumerate() {
        validate_pattern(pattern, &format!("patterns[{}]", idx), &mut result);
    }
    validate_hats(song, &mut result);

    check_warnings(song, &mut result);

    result
}

/// Validates one pattern: step count, channel count, step list lengths, notes.
fn validate_pattern(pattern: &Pattern, path: &str, result: &mut ValidationResult) {
    if slot_increment(pattern.steps).is_none() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidStepCount,
            format!("steps must evenly divide 32, got {}", pattern.steps),
            format!("{}.steps", path),
        ));
    }

    if pattern.channels.len() != CHANNELS_PER_PATTERN {
        result.add_error(ValidationError::with_path(
            ErrorCode::WrongChannelCount,
            format!(
                "pattern must have {} channels, got {}",
                CHANNELS_PER_PATTERN,
                pattern.channels.len()
            ),
            format!("{}.channels", path),
        ));
    }

    for (ch_idx, channel) in pattern.channels.iter().enumerate() {
        let channel_path = format!("{}.channels[{}]", path, ch_idx);

        if channel.steps.len() != pattern.steps as usize {
            result.add_error(ValidationError::with_path(
                ErrorCode::StepCountMismatch,
                format!(
                    "channel has {} steps, pattern declares {}",
                    channel.steps.len(),
                    pattern.steps
                ),
                format!("{}.steps", channel_path),
            ));
        }

        for (step_idx, step) in channel.steps.iter().enumerate() {
            if let Some(ref note) = step.note {
                if !is_valid_note_name(note) {
                    result.add_error(ValidationError::with_path(
                        ErrorCode::InvalidNote,
                        format!("note must match '{}', got '{}'", NOTE_PATTERN, note),
                        format!("{}.steps[{}].note", channel_path, step_idx),
                    ));
                }
            }
        }
    }
}

/// Validates the hi-hat configuration.
fn validate_hats(song: &Song, result: &mut ValidationResult) {
    let hats = &song.hats;

    if hats.pattern.len() != HAT_PATTERN_LENGTH {
        result.add_error(ValidationError::with_path(
            ErrorCode::HatPatternLength,
            format!(
                "hat pattern must have {} entries, got {}",
                HAT_PATTERN_LENGTH,
                hats.pattern.len()
            ),
            "hats.pattern",
        ));
    }

    for (idx, value) in hats.pattern.iter().enumerate() {
        if *value > 1 {
            result.add_error(ValidationError::with_path(
                ErrorCode::HatPatternValue,
                format!("hat pattern entries must be 0 or 1, got {}", value),
                format!("hats.pattern[{}]", idx),
            ));
        }
    }

    if hats.volume > MAX_HAT_VOLUME {
        result.add_error(ValidationError::with_path(
            ErrorCode::HatVolumeOutOfRange,
            format!("volume must be 0-{}, got {}", MAX_HAT_VOLUME, hats.volume),
            "hats.volume",
        ));
    }

    if hats.pitch > MAX_HAT_PITCH {
        result.add_error(ValidationError::with_path(
            ErrorCode::HatPitchOutOfRange,
            format!("pitch must be 0-{}, got {}", MAX_HAT_PITCH, hats.pitch),
            "hats.pitch",
        ));
    }
}

/// Checks for warning conditions.
fn check_warnings(song: &Song, result: &mut ValidationResult) {
    if song.meta.title.trim().is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingTitle,
            "song has no title",
            "meta.title",
        ));
    }

    if song.patterns.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::NoPatterns,
            "song has no patterns; the generated tables will be empty",
            "patterns",
        ));
    }

    for (idx, pattern) in song.patterns.iter().enumerate() {
        if slot_increment(pattern.steps).is_some() && pattern.steps != 16 && pattern.steps != 32 {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnusualStepCount,
                format!("step count {} is neither 16 nor 32", pattern.steps),
                format!("patterns[{}].steps", idx),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::{Channel, Step};

    fn titled_song() -> Song {
        let mut song = Song::new("test", 0);
        song.meta.title = "Test".to_string();
        song
    }

    fn codes(result: &ValidationResult) -> Vec<ErrorCode> {
        result.errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_default_song_is_valid() {
        let result = validate_song(&titled_song());
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_note_names() {
        assert!(is_valid_note_name("C"));
        assert!(is_valid_note_name("F#"));
        assert!(is_valid_note_name("Bb"));
        assert!(!is_valid_note_name("H"));
        assert!(!is_valid_note_name("c"));
        assert!(!is_valid_note_name("C#4"));
    }

    #[test]
    fn test_non_dividing_step_count_rejected() {
        let mut song = titled_song();
        song.patterns[0] = Pattern::empty(12);

        let result = validate_song(&song);
        assert_eq!(codes(&result), vec![ErrorCode::InvalidStepCount]);
        assert_eq!(result.errors[0].path.as_deref(), Some("patterns[0].steps"));
    }

    #[test]
    fn test_zero_step_count_rejected() {
        let mut song = titled_song();
        song.patterns[0] = Pattern::empty(0);

        let result = validate_song(&song);
        assert_eq!(codes(&result), vec![ErrorCode::InvalidStepCount]);
    }

    #[test]
    fn test_unusual_step_count_warns() {
        let mut song = titled_song();
        song.patterns[0] = Pattern::empty(8);

        let result = validate_song(&song);
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, WarningCode::UnusualStepCount);
    }

    #[test]
    fn test_channel_count_and_length() {
        let mut song = titled_song();
        song.patterns[0].channels.push(Channel::empty(16));
        song.patterns[0].channels[0].steps.pop();

        let result = validate_song(&song);
        assert_eq!(
            codes(&result),
            vec![ErrorCode::WrongChannelCount, ErrorCode::StepCountMismatch]
        );
        assert_eq!(
            result.errors[1].path.as_deref(),
            Some("patterns[0].channels[0].steps")
        );
    }

    #[test]
    fn test_invalid_note() {
        let mut song = titled_song();
        song.patterns[0].channels[1].steps[5] = Step::new(2, "X", 1);

        let result = validate_song(&song);
        assert_eq!(codes(&result), vec![ErrorCode::InvalidNote]);
        assert_eq!(
            result.errors[0].path.as_deref(),
            Some("patterns[0].channels[1].steps[5].note")
        );
    }

    #[test]
    fn test_hat_errors() {
        let mut song = titled_song();
        song.hats.pattern = vec![0; 31];
        song.hats.pattern[2] = 2;
        song.hats.volume = 16;
        song.hats.pitch = 32;

        let result = validate_song(&song);
        assert_eq!(
            codes(&result),
            vec![
                ErrorCode::HatPatternLength,
                ErrorCode::HatPatternValue,
                ErrorCode::HatVolumeOutOfRange,
                ErrorCode::HatPitchOutOfRange,
            ]
        );
    }

    #[test]
    fn test_warnings() {
        let mut song = Song::new("test", 0);
        song.patterns.clear();

        let result = validate_song(&song);
        assert!(result.is_ok());
        let warning_codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            warning_codes,
            vec![WarningCode::MissingTitle, WarningCode::NoPatterns]
        );
    }
}
