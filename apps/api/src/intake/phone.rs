//! Phone canonicalizer — normalizes free-text phone input into the fixed
//! `(DDD) DDD-DDDD` display mask.

/// Formats a raw phone string into the display mask.
///
/// Strips every non-digit character, then:
/// - 0–3 digits: returned bare
/// - 4–6 digits: `(DDD) DDD`
/// - 7+ digits: `(DDD) DDD-DDDD`, digits past the 10th discarded
///
/// Pure and deterministic: the full formatted value is re-derived from the
/// raw input on every call, so it is safe to apply on each keystroke.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..digits.len().min(10)]
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_three_digits_unmodified() {
        assert_eq!(format_phone("615"), "615");
    }

    #[test]
    fn test_partial_number_gets_area_code_parens() {
        assert_eq!(format_phone("615555"), "(615) 555");
    }

    #[test]
    fn test_four_digits() {
        assert_eq!(format_phone("6155"), "(615) 5");
    }

    #[test]
    fn test_full_number() {
        assert_eq!(format_phone("6155551234"), "(615) 555-1234");
    }

    #[test]
    fn test_seven_digits() {
        assert_eq!(format_phone("6155551"), "(615) 555-1");
    }

    #[test]
    fn test_excess_digits_discarded() {
        assert_eq!(format_phone("61555512349999"), "(615) 555-1234");
    }

    #[test]
    fn test_non_digits_stripped() {
        assert_eq!(format_phone("(615) 555-1234"), "(615) 555-1234");
        assert_eq!(format_phone("615.555.1234"), "(615) 555-1234");
        assert_eq!(format_phone("abc615def"), "615");
    }

    #[test]
    fn test_reapplying_is_stable() {
        let once = format_phone("6155551234");
        assert_eq!(format_phone(&once), once);
    }
}
