use hashbrown::HashSet;

use std::borrow::Cow;
use std::slice;
use std::str::Chars;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::builder::{IntoPattern, build_automaton};
use super::char_trait::MatchChar;
use super::children::Node;
use super::node_arena::{NodeArena, NodeId};

/// Identifier of a pattern: its position in the order patterns were added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PatternId(usize);

impl PatternId {
    pub(crate) fn new(index: usize) -> Self {
        PatternId(index)
    }

    /// Returns the pattern's position in the source pattern list.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// One occurrence of a pattern in a searched sequence.
///
/// Offsets count symbols (code points when searching text), `end` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match {
    pattern: PatternId,
    start: usize,
    end: usize,
}

impl Match {
    /// The pattern that occurred.
    #[inline]
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }

    /// Offset of the first symbol of the occurrence.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last symbol of the occurrence.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of symbols covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false: empty patterns never match.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A built Aho-Corasick automaton: a trie over the patterns plus failure links
/// and merged output sets.
///
/// The automaton is immutable once built. Every query keeps its scan state on
/// the stack or in the returned [`FindIter`], so one instance can serve any
/// number of concurrent searches through a shared reference.
///
/// # Examples
///
/// ```
/// use libacmatch::automaton::Automaton;
///
/// let automaton = Automaton::new(["he", "she", "his", "hers"]);
/// assert!(automaton.is_match("ushers"));
///
/// let spans: Vec<_> = automaton
///     .find_iter_str("ushers")
///     .map(|m| (automaton.pattern_str(m.pattern()), m.start(), m.end()))
///     .collect();
/// assert_eq!(
///     spans,
///     [
///         ("she".to_string(), 1, 4),
///         ("he".to_string(), 2, 4),
///         ("hers".to_string(), 2, 6),
///     ]
/// );
/// ```
#[derive(Clone)]
pub struct Automaton<C: MatchChar> {
    arena: NodeArena<C>,
    patterns: Vec<Box<[C]>>,
}

impl<C: MatchChar> Automaton<C> {
    /// Builds an automaton from an iterator of patterns.
    ///
    /// Same as [`build_automaton`].
    pub fn new<P: IntoPattern<C>>(patterns: impl IntoIterator<Item = P>) -> Self {
        build_automaton(patterns)
    }

    pub(crate) fn from_parts(arena: NodeArena<C>, patterns: Vec<Box<[C]>>) -> Self {
        Automaton { arena, patterns }
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node<C> {
        &self.arena[NodeId::ROOT]
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this automaton.
    pub fn node(&self, id: NodeId) -> &Node<C> {
        self.arena
            .get(id)
            .expect("node id does not belong to this automaton")
    }

    /// Follows child transitions from the root along `path`, ignoring failure
    /// links. Returns `None` if `path` is not a prefix of any pattern.
    pub fn walk(&self, path: impl IntoIterator<Item = C>) -> Option<NodeId> {
        path.into_iter()
            .try_fold(NodeId::ROOT, |id, ch| self.arena[id].get(ch))
    }

    /// Returns the symbols of the pattern behind `id`.
    pub fn pattern(&self, id: PatternId) -> &[C] {
        &self.patterns[id.0]
    }

    /// Returns all patterns in insertion order, empty ones and duplicates included.
    pub fn patterns(&self) -> impl ExactSizeIterator<Item = &[C]> + '_ {
        self.patterns.iter().map(|p| &**p)
    }

    /// Returns the number of patterns the automaton was built from.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the number of states, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// True if no pattern can ever match, i.e. every pattern is empty.
    pub fn is_empty(&self) -> bool {
        self.root().child_count() == 0
    }

    /// Advances from `state` on `ch`.
    ///
    /// Falls back along failure links until a transition on `ch` exists. The
    /// root's own transitions are consulted for `ch` before giving up, so a
    /// mismatch deep in the trie never swallows the symbol that caused it.
    #[inline]
    fn next_state(&self, mut state: NodeId, ch: C) -> NodeId {
        loop {
            let node = &self.arena[state];
            if let Some(next) = node.get(ch) {
                return next;
            }
            match node.failure() {
                Some(failure) => state = failure,
                None => return NodeId::ROOT,
            }
        }
    }

    /// Returns an iterator over every pattern occurrence in `haystack`,
    /// overlapping ones included, in ascending order of end offset.
    pub fn find_iter<I: IntoIterator<Item = C>>(&self, haystack: I) -> FindIter<'_, C, I::IntoIter> {
        FindIter {
            automaton: self,
            haystack: haystack.into_iter(),
            state: NodeId::ROOT,
            position: 0,
            pending: [].iter(),
        }
    }

    /// True if at least one pattern occurs in `haystack`. Stops scanning at the
    /// first match.
    pub fn contains_any(&self, haystack: impl IntoIterator<Item = C>) -> bool {
        self.find_iter(haystack).next().is_some()
    }

    /// Returns the ids of all patterns occurring in `haystack`, each reported
    /// once, in order of first occurrence.
    ///
    /// Duplicate patterns keep their own ids, so all of them are reported.
    pub fn matched_pattern_ids(&self, haystack: impl IntoIterator<Item = C>) -> Vec<PatternId> {
        let mut seen = vec![false; self.patterns.len()];
        self.find_iter(haystack)
            .filter_map(|m| {
                let first = !std::mem::replace(&mut seen[m.pattern.0], true);
                first.then_some(m.pattern)
            })
            .collect()
    }

    /// Returns the distinct patterns occurring in `haystack`, in order of first
    /// occurrence. Duplicate patterns are reported once.
    pub fn matched_sequences(&self, haystack: impl IntoIterator<Item = C>) -> Vec<&[C]> {
        let mut seen: HashSet<&[C]> = HashSet::new();
        self.matched_pattern_ids(haystack)
            .into_iter()
            .map(|id| self.pattern(id))
            .filter(|pattern| seen.insert(*pattern))
            .collect()
    }
}

impl Automaton<char> {
    /// Returns the pattern behind `id` as a string.
    pub fn pattern_str(&self, id: PatternId) -> String {
        self.pattern(id).iter().collect()
    }

    /// True if at least one pattern occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.contains_any(text.chars())
    }

    /// Like [`is_match`](Automaton::is_match), decoding `bytes` as UTF-8 first.
    /// Ill-formed sequences become U+FFFD instead of failing.
    pub fn is_match_bytes(&self, bytes: &[u8]) -> bool {
        self.is_match(&decode(bytes))
    }

    /// Returns the distinct patterns occurring in `text`, in order of first
    /// occurrence.
    ///
    /// ```
    /// use libacmatch::automaton::Automaton;
    ///
    /// let automaton = Automaton::new(["ab", "ab", "ba"]);
    /// assert_eq!(automaton.matched_patterns("ababab"), ["ab", "ba"]);
    /// ```
    pub fn matched_patterns(&self, text: &str) -> Vec<String> {
        self.matched_sequences(text.chars())
            .into_iter()
            .map(|pattern| pattern.iter().collect())
            .collect()
    }

    /// Like [`matched_patterns`](Automaton::matched_patterns), decoding `bytes`
    /// as UTF-8 first. Ill-formed sequences become U+FFFD instead of failing.
    pub fn matched_patterns_bytes(&self, bytes: &[u8]) -> Vec<String> {
        self.matched_patterns(&decode(bytes))
    }

    /// Returns every occurrence in `text`, with offsets in code points.
    pub fn find_iter_str<'a>(&'a self, text: &'a str) -> FindIter<'a, char, Chars<'a>> {
        self.find_iter(text.chars())
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

impl<C: MatchChar> std::fmt::Debug for Automaton<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("pattern_count", &self.pattern_count())
            .field("node_count", &self.node_count())
            .finish()
    }
}

/// Iterator over the matches of one scan, created by [`Automaton::find_iter`].
///
/// Holds the scan state so the automaton itself stays untouched.
pub struct FindIter<'a, C: MatchChar, I> {
    automaton: &'a Automaton<C>,
    haystack: I,
    state: NodeId,
    position: usize,
    pending: slice::Iter<'a, PatternId>,
}

impl<C: MatchChar, I: Iterator<Item = C>> Iterator for FindIter<'_, C, I> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        loop {
            if let Some(&pattern) = self.pending.next() {
                let end = self.position;
                return Some(Match {
                    pattern,
                    start: end - self.automaton.pattern(pattern).len(),
                    end,
                });
            }
            let ch = self.haystack.next()?;
            self.state = self.automaton.next_state(self.state, ch);
            self.position += 1;
            self.pending = self.automaton.arena[self.state].outputs().iter();
        }
    }
}
