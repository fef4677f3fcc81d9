/// Two-phase construction: trie insertion, then failure links.
pub mod builder;
/// Trait for types that can serve as automaton transition labels.
pub mod char_trait;
/// Automaton states and their compact transition tables.
pub mod children;
/// The built automaton and its search operations.
pub mod matcher;
/// Index-addressed node storage.
pub mod node_arena;

pub use builder::{Builder, IntoPattern, LoadError, build_automaton, build_automaton_from_file};
pub use char_trait::MatchChar;
pub use children::Node;
pub use matcher::{Automaton, FindIter, Match, PatternId};
pub use node_arena::NodeId;
