use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::char_trait::MatchChar;
use super::children::Node;
use super::matcher::{Automaton, PatternId};
use super::node_arena::{NodeArena, NodeId};

/// Trait for types that can be used as a pattern when building an automaton.
///
/// Implemented for common string and sequence types so that [`Builder::add_pattern`]
/// and [`build_automaton`] accept them directly without manual conversion.
pub trait IntoPattern<C: MatchChar> {
    /// Collects this pattern into a symbol buffer.
    fn collect_pattern(self) -> SmallVec<[C; 32]>;
}

// String types → char

impl IntoPattern<char> for &str {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for &&str {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for String {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for &String {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

// Generic sequence types → C

impl<C: MatchChar> IntoPattern<C> for &[C] {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: MatchChar> IntoPattern<C> for Vec<C> {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: MatchChar> IntoPattern<C> for &Vec<C> {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: MatchChar, const N: usize> IntoPattern<C> for [C; N] {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: MatchChar, const N: usize> IntoPattern<C> for &[C; N] {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

/// A builder for constructing an [`Automaton`] from a fixed pattern set.
///
/// Construction happens in two phases. [`add_pattern`](Builder::add_pattern)
/// only extends the trie; failure links and merged outputs are computed once by
/// [`build`](Builder::build), which consumes the builder. A half-built automaton
/// can therefore never be searched.
///
/// Patterns may be added in any order, may repeat, and may be empty. Every
/// pattern gets a [`PatternId`] equal to its position in insertion order. Empty
/// patterns add no transitions and never match.
///
/// # Examples
///
/// ```
/// use libacmatch::automaton::builder::Builder;
///
/// let mut builder = Builder::new();
/// let he = builder.add_pattern("he");
/// let she = builder.add_pattern("she");
/// let automaton = builder.build();
///
/// assert_eq!(automaton.matched_pattern_ids("ushers".chars()), vec![she, he]);
/// ```
pub struct Builder<C: MatchChar> {
    arena: NodeArena<C>,
    patterns: Vec<Box<[C]>>,
}

impl<C: MatchChar> Builder<C> {
    /// Creates a builder holding only the root node.
    pub fn new() -> Self {
        Builder {
            arena: NodeArena::new(),
            patterns: Vec::new(),
        }
    }

    /// Adds a pattern to the trie and returns its identifier.
    ///
    /// The pattern can be any type that implements [`IntoPattern`], including `&str`,
    /// `String`, `&[u8]`, `Vec<u8>`, or fixed-size arrays like `[u8; 3]`.
    pub fn add_pattern(&mut self, pattern: impl IntoPattern<C>) -> PatternId {
        let pattern = pattern.collect_pattern();
        let id = PatternId::new(self.patterns.len());
        if !pattern.is_empty() {
            let end = self.insert_path(&pattern);
            self.arena[end].add_pattern(id);
        }
        self.patterns.push(pattern.as_slice().into());
        id
    }

    /// Returns the number of patterns added so far, empty ones included.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Walks the trie along `pattern`, creating missing transitions, and
    /// returns the node the path ends at.
    fn insert_path(&mut self, pattern: &[C]) -> NodeId {
        let mut current = NodeId::ROOT;
        for &ch in pattern {
            current = match self.arena[current].get(ch) {
                Some(next) => next,
                None => {
                    let next = self.arena.alloc(Node::new());
                    self.arena[current].insert(ch, next);
                    next
                }
            };
        }
        current
    }

    /// Resolves failure links and merges output sets, breadth-first.
    ///
    /// A node's failure target is strictly shallower than the node itself, so
    /// by the time a node is dequeued its failure target's outputs are already
    /// closed over the whole failure chain. Merging one hop is then enough.
    fn build_failure_links(arena: &mut NodeArena<C>) {
        let mut queue = VecDeque::new();
        let root_children: SmallVec<[(C, NodeId); 8]> = arena[NodeId::ROOT].children().collect();
        for (_, child) in root_children {
            arena[child].set_failure(NodeId::ROOT);
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            let fallback = arena[current].failure().unwrap_or(NodeId::ROOT);
            let transitions: SmallVec<[(C, NodeId); 8]> = arena[current].children().collect();
            for (ch, child) in transitions {
                queue.push_back(child);
                let target = Self::longest_suffix_state(arena, fallback, ch);
                arena[child].set_failure(target);
                let inherited: SmallVec<[PatternId; 4]> =
                    arena[target].outputs().iter().copied().collect();
                arena[child].merge_outputs(&inherited);
            }
        }
    }

    /// Follows the failure chain from `state` until a transition on `ch` exists
    /// and returns its target, or the root if the chain runs out.
    fn longest_suffix_state(arena: &NodeArena<C>, mut state: NodeId, ch: C) -> NodeId {
        loop {
            if let Some(next) = arena[state].get(ch) {
                return next;
            }
            match arena[state].failure() {
                Some(failure) => state = failure,
                None => return NodeId::ROOT,
            }
        }
    }

    /// Finalizes construction and returns the searchable automaton.
    pub fn build(mut self) -> Automaton<C> {
        Self::build_failure_links(&mut self.arena);
        debug!(
            patterns = self.patterns.len(),
            nodes = self.arena.len(),
            "built automaton"
        );
        Automaton::from_parts(self.arena, self.patterns)
    }
}

impl<C: MatchChar> Default for Builder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading a pattern file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The pattern file could not be opened or read.
    #[error("failed to read pattern file {}", path.display())]
    Io {
        /// Path of the pattern file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    fn io(path: &Path, source: io::Error) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Builds an automaton from an iterator of patterns.
///
/// Each pattern must implement [`IntoPattern`], allowing this function to accept
/// `&str`, `String`, slices, vectors, arrays, or any other supported pattern type.
///
/// # Examples
///
/// Building from strings:
///
/// ```
/// use libacmatch::automaton::builder::build_automaton;
///
/// let automaton = build_automaton(["he", "she", "his", "hers"]);
/// assert!(automaton.is_match("ushers"));
/// assert_eq!(automaton.matched_patterns("ushers"), ["she", "he", "hers"]);
/// ```
///
/// Building from byte sequences:
///
/// ```
/// use libacmatch::automaton::builder::build_automaton;
///
/// let automaton = build_automaton(vec![vec![1u8, 2, 3], vec![2, 3]]);
/// assert!(automaton.contains_any([0u8, 2, 3]));
/// assert!(!automaton.contains_any([1u8, 2, 4]));
/// ```
pub fn build_automaton<C, P>(patterns: impl IntoIterator<Item = P>) -> Automaton<C>
where
    C: MatchChar,
    P: IntoPattern<C>,
{
    let mut builder = Builder::new();
    for pattern in patterns {
        builder.add_pattern(pattern);
    }
    builder.build()
}

/// Builds an automaton from a pattern file.
///
/// Reads one pattern per line. Trailing whitespace is trimmed, empty lines are
/// skipped and lines starting with '#' are treated as comments. Lines that are
/// not valid UTF-8 are decoded with replacement characters.
///
/// # Examples
///
/// ```no_run
/// use libacmatch::automaton::builder::build_automaton_from_file;
///
/// let automaton = build_automaton_from_file("banned-words.txt").unwrap();
/// ```
pub fn build_automaton_from_file(path: impl AsRef<Path>) -> Result<Automaton<char>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut builder = Builder::new();

    // Reuse one line buffer instead of allocating a fresh one per line.
    let mut buf = Vec::with_capacity(80);
    loop {
        let bytes_read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| LoadError::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let pattern = line.trim_end();
        if is_comment(pattern) {
            trace!(line = pattern, "skipping comment");
        } else if !pattern.is_empty() {
            builder.add_pattern(pattern);
        }
        buf.clear();
    }

    debug!(
        path = %path.display(),
        patterns = builder.pattern_count(),
        "loaded pattern file"
    );
    Ok(builder.build())
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
