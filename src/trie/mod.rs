//! The double trie that rules compile into.
//!
//! Every node has two independent edge maps. `forward` edges spell out the
//! source token followed by its right context; `backward` edges hang off the
//! end of that path and spell the left context in reverse.

mod builder;

use std::collections::HashMap;

/// Index of a node in the trie arena.
pub type NodeId = usize;

/// The root node of every trie.
pub const ROOT: NodeId = 0;

/// Key of a trie edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
	Char(char),

	/// Start or end of the word.
	Boundary,
}

/// Output stored on a node where one or more rules terminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
	/// Length of the source token in characters.
	pub covered: usize,

	/// Alternative transcriptions of the source token.
	pub targets: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct Node {
	forward: HashMap<Edge, NodeId>,
	backward: HashMap<Edge, NodeId>,
	output: Option<Output>,
}

/// An arena of nodes linked by forward and backward edges.
///
/// Built once by [`DoubleTrie::build`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct DoubleTrie {
	nodes: Vec<Node>,
	outputs: usize,
}

impl Default for DoubleTrie {
	fn default() -> Self {
		Self {
			nodes: vec![Node::default()],
			outputs: 0,
		}
	}
}

impl DoubleTrie {
	/// Follow a forward edge from `node`.
	pub fn forward(&self, node: NodeId, edge: Edge) -> Option<NodeId> {
		self.nodes[node].forward.get(&edge).copied()
	}

	/// Follow a backward edge from `node`.
	pub fn backward(&self, node: NodeId, edge: Edge) -> Option<NodeId> {
		self.nodes[node].backward.get(&edge).copied()
	}

	/// Output stored on `node`, if any rule terminates there.
	pub fn output(&self, node: NodeId) -> Option<&Output> {
		self.nodes[node].output.as_ref()
	}

	/// Number of nodes, the root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when no rule output is stored anywhere in the trie.
	pub fn is_empty(&self) -> bool {
		self.outputs == 0
	}
}
