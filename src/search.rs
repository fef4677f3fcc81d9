//! One-shot search helpers over text and raw bytes.
//!
//! Every function here builds a fresh [`Automaton`] from the supplied
//! patterns. Callers that query the same pattern set repeatedly should build
//! an automaton once and call its methods instead.
//!
//! Byte inputs are decoded as UTF-8 and matched per code point, exactly like
//! text. Ill-formed sequences are replaced with U+FFFD rather than rejected.

use crate::automaton::{Automaton, IntoPattern};

/// True if `pattern` occurs in `text`.
///
/// ```
/// use libacmatch::search::contains_string;
///
/// assert!(contains_string("banana", "nan"));
/// assert!(!contains_string("banana", "nab"));
/// ```
pub fn contains_string(text: &str, pattern: &str) -> bool {
    Automaton::new([pattern]).is_match(text)
}

/// True if `pattern` occurs in the UTF-8 decoding of `bytes`.
pub fn contains_string_bytes(bytes: &[u8], pattern: &str) -> bool {
    Automaton::new([pattern]).is_match_bytes(bytes)
}

/// True if at least one of `patterns` occurs in `text`.
///
/// ```
/// use libacmatch::search::contains_any;
///
/// assert!(contains_any("ushers", ["he", "she", "his", "hers"]));
/// assert!(!contains_any("bird", ["cat", "dog"]));
/// ```
pub fn contains_any<P: IntoPattern<char>>(text: &str, patterns: impl IntoIterator<Item = P>) -> bool {
    Automaton::new(patterns).is_match(text)
}

/// True if at least one of `patterns` occurs in the UTF-8 decoding of `bytes`.
pub fn contains_any_bytes<P: IntoPattern<char>>(
    bytes: &[u8],
    patterns: impl IntoIterator<Item = P>,
) -> bool {
    Automaton::new(patterns).is_match_bytes(bytes)
}

/// Returns the distinct patterns occurring in `text`, in order of first
/// occurrence.
///
/// ```
/// use libacmatch::search::matched_patterns;
///
/// assert_eq!(matched_patterns("ababab", ["ab"]), ["ab"]);
/// ```
pub fn matched_patterns<P: IntoPattern<char>>(
    text: &str,
    patterns: impl IntoIterator<Item = P>,
) -> Vec<String> {
    Automaton::new(patterns).matched_patterns(text)
}

/// Returns the distinct patterns occurring in the UTF-8 decoding of `bytes`,
/// in order of first occurrence.
pub fn matched_patterns_bytes<P: IntoPattern<char>>(
    bytes: &[u8],
    patterns: impl IntoIterator<Item = P>,
) -> Vec<String> {
    Automaton::new(patterns).matched_patterns_bytes(bytes)
}
