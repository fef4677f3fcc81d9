use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can serve as transition labels in an automaton.
///
/// This trait is automatically implemented for any type satisfying all the
/// required bounds (`char`, `u8`, `u16`, `u32`, etc.).
///
/// - `Copy`: transitions store labels by value
/// - `Eq + Ord`: comparing edge labels while walking the trie
/// - `Hash`: deduplicating matched patterns
/// - `Debug`: debug printing of nodes and patterns
pub trait MatchChar: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> MatchChar for T {}
