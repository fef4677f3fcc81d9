use smallvec::SmallVec;

use super::char_trait::MatchChar;
use super::matcher::PatternId;
use super::node_arena::NodeId;

/// A compact representation of the transitions out of a [`Node`] that doesn't
/// allocate until there are at least three of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Children<C: MatchChar> {
    /// No transitions.
    None,
    /// Exactly one transition (letter, node).
    One((C, NodeId)),
    /// Exactly two transitions (letter1, node1, letter2, node2).
    Two((C, NodeId, C, NodeId)),
    /// Three or more transitions stored in a vector.
    Many(Vec<(C, NodeId)>),
}

impl<C: MatchChar> Children<C> {
    /// Gets the transition at the specified index.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<(C, NodeId)> {
        match self {
            Children::None => None,
            Children::One(child) => match index {
                0 => Some(*child),
                _ => None,
            },
            Children::Two((c1, n1, c2, n2)) => match index {
                0 => Some((*c1, *n1)),
                1 => Some((*c2, *n2)),
                _ => None,
            },
            Children::Many(children) => children.get(index).copied(),
        }
    }

    /// Returns the target of the transition labelled `letter`, if any.
    #[inline]
    pub fn find(&self, letter: C) -> Option<NodeId> {
        match self {
            Children::None => None,
            Children::One((ch, node)) => (*ch == letter).then_some(*node),
            Children::Two((c1, n1, c2, n2)) => {
                if letter == *c1 {
                    Some(*n1)
                } else if letter == *c2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Children::Many(children) => {
                // Unrolling by 2 lets two comparisons issue per iteration, which
                // beats binary search for the small fan-outs typical of tries.
                let chunks = children.chunks_exact(2);
                let remainder = chunks.remainder();
                for chunk in chunks {
                    if chunk[0].0 == letter {
                        return Some(chunk[0].1);
                    }
                    if chunk[1].0 == letter {
                        return Some(chunk[1].1);
                    }
                }
                remainder
                    .iter()
                    .find(|&&(ch, _)| ch == letter)
                    .map(|&(_, node)| node)
            }
        }
    }

    /// Returns the number of transitions.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(children) => children.len(),
        }
    }

    /// True if there are no transitions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Children::None)
    }

    fn push(&mut self, letter: C, node: NodeId) {
        debug_assert!(self.find(letter).is_none(), "push: letter already exists");
        let c = (letter, node);
        match self {
            Children::None => *self = Children::One(c),
            Children::One((c1, n1)) => *self = Children::Two((*c1, *n1, c.0, c.1)),
            Children::Two((c1, n1, c2, n2)) => {
                *self = Children::Many(vec![(*c1, *n1), (*c2, *n2), c])
            }
            Children::Many(children) => children.push(c),
        }
    }
}

/// An iterator over the transitions out of a [`Node`].
#[derive(Clone)]
pub struct ChildIter<'a, C: MatchChar> {
    children: &'a Children<C>,
    index: usize,
}

impl<C: MatchChar> Iterator for ChildIter<'_, C> {
    type Item = (C, NodeId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let next_child = self.children.get(self.index)?;
        self.index += 1;
        Some(next_child)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.children.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<C: MatchChar> ExactSizeIterator for ChildIter<'_, C> {}

/// One state of the automaton.
///
/// The node owns nothing but its transition table; children and the failure
/// target are handles into the automaton's arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<C: MatchChar> {
    children: Children<C>,
    failure: Option<NodeId>,
    outputs: SmallVec<[PatternId; 2]>,
    terminal: bool,
}

impl<C: MatchChar> Node<C> {
    /// Creates a node with no transitions, no failure link and no outputs.
    pub fn new() -> Self {
        Node {
            children: Children::None,
            failure: None,
            outputs: SmallVec::new(),
            terminal: false,
        }
    }

    /// Returns the node that `letter`'s transition leads to, or None if no such transition exists.
    #[inline]
    pub fn get(&self, letter: C) -> Option<NodeId> {
        self.children.find(letter)
    }

    /// Returns the failure target. `None` only for the root.
    #[inline]
    pub fn failure(&self) -> Option<NodeId> {
        self.failure
    }

    /// Patterns recognized when the automaton is in this state, including the
    /// ones inherited along the failure chain.
    #[inline]
    pub fn outputs(&self) -> &[PatternId] {
        &self.outputs
    }

    /// True if at least one pattern ends exactly at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Returns an iterator over all transitions out of this node.
    #[inline]
    pub fn children(&self) -> ChildIter<'_, C> {
        ChildIter {
            children: &self.children,
            index: 0,
        }
    }

    /// Returns the number of transitions.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Adds the transition `letter -> node`.
    pub(crate) fn insert(&mut self, letter: C, node: NodeId) {
        self.children.push(letter, node);
    }

    pub(crate) fn set_failure(&mut self, target: NodeId) {
        self.failure = Some(target);
    }

    /// Records that `pattern` ends exactly here.
    pub(crate) fn add_pattern(&mut self, pattern: PatternId) {
        self.terminal = true;
        self.outputs.push(pattern);
    }

    /// Appends outputs inherited from the failure target.
    pub(crate) fn merge_outputs(&mut self, inherited: &[PatternId]) {
        self.outputs.extend_from_slice(inherited);
    }
}

impl<C: MatchChar> Default for Node<C> {
    fn default() -> Self {
        Self::new()
    }
}
