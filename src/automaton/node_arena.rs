//! An index-addressed arena for automaton nodes.
//!
//! Nodes are only ever appended, never moved out or freed individually, so a
//! [`NodeId`] handed out by [`NodeArena::alloc`] stays valid for as long as the
//! arena lives. Failure links are stored as `NodeId`s and therefore never own
//! the node they point at.

use std::ops::{Index, IndexMut};

use super::char_trait::MatchChar;
use super::children::Node;

/// Handle to a node stored in an automaton's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node. Always the first node allocated in an arena.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the position of this node in allocation order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// True if this is the root node.
    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

/// Append-only storage of trie nodes, addressed by [`NodeId`].
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<C: MatchChar> {
    nodes: Vec<Node<C>>,
}

impl<C: MatchChar> NodeArena<C> {
    /// Creates an arena holding only the root node.
    pub fn new() -> Self {
        NodeArena {
            nodes: vec![Node::new()],
        }
    }

    /// Appends a node and returns its handle.
    pub fn alloc(&mut self, node: Node<C>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node for `id`, or `None` if it belongs to another arena.
    pub fn get(&self, id: NodeId) -> Option<&Node<C>> {
        self.nodes.get(id.0)
    }
}

impl<C: MatchChar> Index<NodeId> for NodeArena<C> {
    type Output = Node<C>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<C> {
        &self.nodes[id.0]
    }
}

impl<C: MatchChar> IndexMut<NodeId> for NodeArena<C> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<C> {
        &mut self.nodes[id.0]
    }
}
