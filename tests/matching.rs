use std::collections::BTreeSet;

use itertools::Itertools;
use libacmatch::automaton::{Automaton, build_automaton};
use libacmatch::search::{contains_any, contains_any_bytes, matched_patterns, matched_patterns_bytes};
use proptest::prelude::*;

/// Distinct non-empty patterns that occur in `text`, found by brute force.
fn naive_matches(text: &str, patterns: &[String]) -> BTreeSet<String> {
    patterns
        .iter()
        .filter(|p| !p.is_empty() && text.contains(p.as_str()))
        .cloned()
        .collect()
}

/// Every (pattern index, start, end) occurrence, in code points.
fn naive_spans(text: &str, patterns: &[String]) -> Vec<(usize, usize, usize)> {
    let text: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    for (index, pattern) in patterns.iter().enumerate() {
        let pattern: Vec<char> = pattern.chars().collect();
        if pattern.is_empty() || pattern.len() > text.len() {
            continue;
        }
        for start in 0..=text.len() - pattern.len() {
            if text[start..start + pattern.len()] == pattern[..] {
                spans.push((index, start, start + pattern.len()));
            }
        }
    }
    spans.sort_unstable();
    spans
}

fn as_set(found: Vec<String>) -> BTreeSet<String> {
    let len = found.len();
    let set: BTreeSet<String> = found.into_iter().collect();
    assert_eq!(set.len(), len, "matched patterns contain duplicates");
    set
}

proptest! {
    #[test]
    fn contains_any_agrees_with_substring_search(
        patterns in prop::collection::vec("[abc]{0,4}", 0..6),
        text in "[abc]{0,24}",
    ) {
        let expected = !naive_matches(&text, &patterns).is_empty();
        prop_assert_eq!(contains_any(&text, &patterns), expected);
        prop_assert_eq!(contains_any_bytes(text.as_bytes(), &patterns), expected);
    }

    #[test]
    fn matched_patterns_agrees_with_substring_search(
        patterns in prop::collection::vec("[abc]{0,4}", 0..6),
        text in "[abc]{0,24}",
    ) {
        let expected = naive_matches(&text, &patterns);
        prop_assert_eq!(as_set(matched_patterns(&text, &patterns)), expected.clone());
        prop_assert_eq!(as_set(matched_patterns_bytes(text.as_bytes(), &patterns)), expected);
    }

    #[test]
    fn unicode_matches_agree_with_substring_search(
        patterns in prop::collection::vec("[aé日😀]{1,3}", 1..5),
        text in "[aé日😀 ]{0,16}",
    ) {
        prop_assert_eq!(as_set(matched_patterns(&text, &patterns)), naive_matches(&text, &patterns));
    }

    #[test]
    fn every_occurrence_is_reported(
        patterns in prop::collection::vec("[ab日]{1,3}", 1..5),
        text in "[ab日]{0,16}",
    ) {
        let automaton = Automaton::new(&patterns);
        let mut spans: Vec<_> = automaton
            .find_iter_str(&text)
            .map(|m| (m.pattern().as_usize(), m.start(), m.end()))
            .collect();
        prop_assert!(spans.windows(2).all(|w| w[0].2 <= w[1].2));
        spans.sort_unstable();
        prop_assert_eq!(spans, naive_spans(&text, &patterns));
    }
}

#[test]
fn classic_multi_pattern_case() {
    let patterns = ["he", "she", "his", "hers"];
    let found: BTreeSet<_> = matched_patterns("ushers", patterns).into_iter().collect();
    let expected: BTreeSet<String> = ["he", "she", "hers"].map(String::from).into();
    assert_eq!(found, expected);
    assert!(contains_any("ushers", patterns));
}

#[test]
fn no_match_case() {
    assert!(matched_patterns("bird", ["cat", "dog"]).is_empty());
    assert!(!contains_any("bird", ["cat", "dog"]));
}

#[test]
fn repeated_occurrence_case() {
    assert_eq!(matched_patterns("ababab", ["ab"]), ["ab"]);
}

#[test]
fn single_character_case() {
    assert!(contains_any("banana", ["a"]));
}

#[test]
fn empty_pattern_set() {
    for text in ["", "a", "anything at all"] {
        assert!(!contains_any(text, Vec::<&str>::new()));
        assert!(matched_patterns(text, Vec::<&str>::new()).is_empty());
    }
}

#[test]
fn empty_text() {
    assert!(!contains_any("", ["a", "bc"]));
    assert!(matched_patterns("", ["a", "bc"]).is_empty());
}

#[test]
fn matched_set_is_independent_of_pattern_order() {
    let patterns = ["he", "she", "his", "hers", "e", "rs"];
    let text = "ushers of this hershey";
    let expected: BTreeSet<_> = matched_patterns(text, patterns).into_iter().collect();
    for order in patterns.iter().permutations(patterns.len()) {
        let found: BTreeSet<_> = build_automaton(order).matched_patterns(text).into_iter().collect();
        assert_eq!(found, expected);
    }
}

#[test]
fn rebuilding_is_idempotent() {
    let patterns = ["a", "ab", "bab", "bc", "bca", "c", "caa"];
    let text = "abccab";
    let runs: Vec<Vec<_>> = (0..3)
        .map(|_| Automaton::new(patterns).find_iter_str(text).collect())
        .collect();
    assert!(runs.iter().all_equal());
}

#[test]
fn shared_automaton_across_threads() {
    let automaton = std::sync::Arc::new(Automaton::new(["error", "warn", "panic"]));
    let lines = ["all good", "warning: low disk", "thread panicked", "error: boom"];
    let handles: Vec<_> = lines
        .iter()
        .map(|line| {
            let automaton = std::sync::Arc::clone(&automaton);
            let line = line.to_string();
            std::thread::spawn(move || automaton.is_match(&line))
        })
        .collect();
    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, [false, true, true, true]);
}
