//! Canonical text form: lowercase, no ASCII punctuation, no digits,
//! single-spaced and trimmed.

use regex::Regex;
use std::sync::OnceLock;

fn digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").expect("digit pattern is valid"))
}

fn whitespace() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Normalize raw message text.
///
/// Steps run in a fixed order:
/// 1. lowercase
/// 2. strip ASCII punctuation
/// 3. strip digits
/// 4. collapse whitespace runs to a single space and trim
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_punct: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    let without_digits = digits().replace_all(&without_punct, "");
    whitespace()
        .replace_all(&without_digits, " ")
        .trim()
        .to_string()
}

/// Normalize a value that may be absent (missing CSV field, null JSON).
pub fn normalize_value(value: Option<&str>) -> String {
    value.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "Hi, see you at 3pm!",
        "WIN money NOW!!! call 12345",
        "Free entry in 2 a wkly comp to win FA Cup final tkts 21st May 2005.",
        "tab\tseparated\nand\r\nnewlines",
        "Ünïcödé CAFÉ — “quotes” ½ price",
        "under_score & ampersand's",
        "１２３ full-width digits ٣",
        "...!!!???",
    ];

    #[test]
    fn test_scenario_ham_message() {
        assert_eq!(normalize("Hi, see you at 3pm!"), "hi see you at pm");
    }

    #[test]
    fn test_scenario_spam_message() {
        assert_eq!(normalize("WIN money NOW!!! call 12345"), "win money now call");
    }

    #[test]
    fn test_idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_output_has_no_punctuation_digits_or_double_spaces() {
        for sample in SAMPLES {
            let out = normalize(sample);
            assert!(!out.chars().any(|c| c.is_ascii_punctuation()), "{:?}", out);
            assert!(!out.chars().any(|c| c.is_ascii_digit()), "{:?}", out);
            assert!(!out.contains("  "), "{:?}", out);
            assert_eq!(out.trim(), out);
        }
    }

    #[test]
    fn test_unicode_digits_removed() {
        assert_eq!(normalize("１２３ full-width digits ٣"), "fullwidth digits");
    }

    #[test]
    fn test_missing_value_is_empty() {
        assert_eq!(normalize_value(None), "");
        assert_eq!(normalize_value(Some("A.B")), "ab");
    }

    #[test]
    fn test_only_punctuation_becomes_empty() {
        assert_eq!(normalize("...!!!???"), "");
    }
}
