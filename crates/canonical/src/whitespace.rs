//! Whitespace and case utilities for business names.
//!
//! Names arrive from user input ("Acme   Rocket\tCo") and are compared against
//! free-form chatbot answers, so both sides are reduced to a single, stable
//! shape before any pattern is built from them.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{collapse_whitespace, fold_case};
//!
//! assert_eq!(collapse_whitespace("  Acme   Rocket\tCo "), "Acme Rocket Co");
//! assert_eq!(fold_case("JPMorgan CHASE"), "jpmorgan chase");
//! ```

/// Collapses repeated whitespace, trims edges, and normalizes newlines to
/// single spaces.
///
/// # Algorithm
///
/// 1. Split the text on any Unicode whitespace (using `split_whitespace()`)
/// 2. Join the resulting segments with single ASCII spaces
/// 3. The result has no leading or trailing whitespace
///
/// Returns an empty string if input is empty or whitespace-only.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Removes all whitespace, joining segments with `separator`.
///
/// `join_segments("Acme Rocket Co", "-")` gives `"Acme-Rocket-Co"`; an empty
/// separator squashes the name into one word.
pub fn join_segments(text: &str, separator: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(separator)
}

/// Locale-free Unicode lowercasing.
///
/// This is the only case normalization the matcher performs; no NFKC or
/// accent folding happens here.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Case-insensitive equality under [`fold_case`].
pub fn eq_folded(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    fold_case(a) == fold_case(b)
}
