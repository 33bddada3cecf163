//! Hi-hat pattern encoding.

use crate::pattern::{BYTE_DECL, SLOTS_PER_GROUP};

/// Encodes a hat on/off pattern as binary byte declarations.
///
/// Values are taken 8 at a time; each group becomes one `byte %dddddddd`
/// line. Lines are joined with newlines and the result has no trailing
/// newline. Any nonzero value is written as `1`.
pub fn encode_hat_pattern(pattern: &[u8]) -> String {
    pattern
        .chunks(SLOTS_PER_GROUP)
        .map(|group| {
            let digits: String = group
                .iter()
                .map(|&v| if v == 0 { '0' } else { '1' })
                .collect();
            format!("{}%{}", BYTE_DECL, digits)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_hit(index: usize) -> Vec<u8> {
        let mut pattern = vec![0; 32];
        pattern[index] = 1;
        pattern
    }

    #[test]
    fn test_all_zeros() {
        assert_eq!(
            encode_hat_pattern(&[0; 32]),
            "    byte %00000000\n    byte %00000000\n    byte %00000000\n    byte %00000000"
        );
    }

    #[test]
    fn test_first_slot_of_second_group() {
        let lines: Vec<String> = encode_hat_pattern(&with_hit(8))
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "    byte %10000000");
        assert!(lines.iter().all(|l| l.starts_with("    byte %") && l.len() == 18));
    }

    #[test]
    fn test_last_slot_of_second_group() {
        let encoded = encode_hat_pattern(&with_hit(15));
        assert_eq!(encoded.lines().nth(1), Some("    byte %00000001"));
        assert!(!encoded.ends_with('\n'));
    }

    #[test]
    fn test_nonzero_is_on() {
        let mut pattern = vec![0; 32];
        pattern[0] = 3;
        assert!(encode_hat_pattern(&pattern).starts_with("    byte %10000000"));
    }
}
