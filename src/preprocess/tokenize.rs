//! Word tokenizer for the normalization stages.
//!
//! Splits text into word tokens (letters and digits, optionally joined by
//! inner hyphens such as `кто-то`) and standalone punctuation tokens.
//! Whitespace is never part of a token.

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:-\w+)*|[^\w\s]").expect("TOKEN_REGEX: invalid pattern")
});

/// Splits `text` into word and punctuation tokens, in order.
///
/// # Example
///
/// ```
/// use chatsense::preprocess::tokenize;
///
/// assert_eq!(tokenize("Ну, кто-то пришёл!"), vec!["Ну", ",", "кто-то", "пришёл", "!"]);
/// ```
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Returns `true` if the token contains at least one letter.
pub fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
}

/// Lowercases and folds `ё` into `е` for dictionary lookups.
pub(crate) fn fold(word: &str) -> String {
    word.to_lowercase().replace('ё', "е")
}
