//! # libacmatch
//!
//! Multi-pattern substring matching with an
//! [Aho-Corasick](https://en.wikipedia.org/wiki/Aho%E2%80%93Corasick_algorithm) automaton.
//!
//! The automaton is a trie over all patterns, augmented with failure links and
//! output sets merged along those links. One linear pass over a text reports
//! every pattern that occurs in it, overlapping occurrences included.
//!
//! ## Features
//!
//! - **Generic over symbol type**: works with `char`, `u8`, `u16`, or any type implementing
//!   [`MatchChar`](automaton::MatchChar)
//! - **Code-point matching**: text is matched per `char`; byte input is decoded as UTF-8
//!   (lossily) and matched the same way
//! - **Arena-allocated**: nodes live in an index-addressed arena, failure links are plain
//!   indices
//! - **Thread-safe**: a built [`Automaton`](automaton::Automaton) is immutable and
//!   `Send + Sync`
//!
//! ## Quick Start
//!
//! ```
//! use libacmatch::automaton::Automaton;
//!
//! let automaton = Automaton::new(["he", "she", "his", "hers"]);
//! assert!(automaton.is_match("ushers"));
//! assert_eq!(automaton.matched_patterns("ushers"), ["she", "he", "hers"]);
//! ```
//!
//! For one-off queries the [`search`] module builds the automaton for you:
//!
//! ```
//! use libacmatch::search::{contains_any, matched_patterns};
//!
//! assert!(!contains_any("bird", ["cat", "dog"]));
//! assert_eq!(matched_patterns("ababab", ["ab"]), ["ab"]);
//! ```
//!
//! ## Generic Usage
//!
//! The automaton is generic over the transition label type:
//!
//! ```
//! use libacmatch::automaton::build_automaton;
//!
//! let automaton = build_automaton(vec![vec![1u8, 2, 3], vec![2, 4]]);
//! let ends: Vec<_> = automaton.find_iter([1, 2, 3, 2, 4]).map(|m| m.end()).collect();
//! assert_eq!(ends, [3, 5]);
//! ```
//!
//! ## Cargo features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`Match`](automaton::Match) and
//!   [`PatternId`](automaton::PatternId).

#![warn(missing_docs)]

/// Core automaton: nodes, builder, and search.
pub mod automaton;
/// One-shot containment helpers over text and bytes.
pub mod search;

pub use automaton::{Automaton, Builder, Match, PatternId};
