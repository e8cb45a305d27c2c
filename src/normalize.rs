//! Text normalization for queries and catalog names.
//!
//! All matching operates on normalized text: NFKD-decomposed, lower-cased,
//! stripped of everything that is not a letter, digit, or whitespace, with
//! whitespace runs collapsed to a single space. Keyword extraction then
//! splits on those single spaces.

use unicode_normalization::UnicodeNormalization;

/// Normalize a string for matching.
///
/// Applies Unicode NFKD decomposition (so accented Latin letters fold to
/// their base letter once the combining marks are dropped), lower-cases,
/// removes all characters that are not letters, digits, or whitespace, and
/// collapses whitespace runs to a single space with no leading or trailing
/// space.
///
/// Empty or punctuation-only input yields an empty string; no input panics.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.nfkd() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lc in c.to_lowercase() {
                out.push(lc);
            }
        } else if c.is_whitespace() {
            pending_space = true;
        }
        // Punctuation, symbols, and combining marks are dropped.
    }
    out
}

/// Extract keywords from an already-normalized string.
///
/// Splits on single spaces and keeps tokens longer than one character;
/// single-letter tokens ("a", "of"-style initials) carry too little signal
/// and are dropped.
#[must_use]
pub fn extract_keywords(normalized: &str) -> Vec<String> {
    normalized
        .split(' ')
        .filter(|t| t.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Concatenate the first letter of each word of an already-normalized string.
///
/// `"acharaya institute of technology"` becomes `"aiot"`. Single-letter words
/// contribute their letter like any other word.
#[must_use]
pub fn first_letters(normalized: &str) -> String {
    normalized
        .split(' ')
        .filter_map(|w| w.chars().next())
        .collect()
}
