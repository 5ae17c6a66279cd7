//! Word tokenisation over normalized text.

use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    // Two or more word characters; single letters are not features
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Split text into tokens of at least two word characters.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    token_pattern().find_iter(text).map(|m| m.as_str())
}
