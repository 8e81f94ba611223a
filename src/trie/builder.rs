use super::{DoubleTrie, Edge, Node, NodeId, Output, ROOT};
use crate::rules::{BOUNDARY, Context, Rule};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
enum Direction {
	Forward,
	Backward,
}

impl Node {
	fn edges_mut(&mut self, direction: Direction) -> &mut HashMap<Edge, NodeId> {
		match direction {
			Direction::Forward => &mut self.forward,
			Direction::Backward => &mut self.backward,
		}
	}
}

impl DoubleTrie {
	/// Compile rules into a trie, in order.
	///
	/// Tier one is the source token spelled forward from the root. Each right
	/// context token extends it forward into tier two, and each left context
	/// token branches backward from there into tier three, where the rule
	/// output is stored.
	pub fn build(rules: &[Rule]) -> Self {
		let mut trie = Self::default();
		for rule in rules {
			trie.insert(rule);
		}

		tracing::debug!(
			rules = rules.len(),
			nodes = trie.len(),
			outputs = trie.outputs,
			"built double trie"
		);
		trie
	}

	fn insert(&mut self, rule: &Rule) {
		let covered = rule.source.chars().count();
		let tier_one = self.descend(ROOT, Direction::Forward, rule.source.chars().map(Edge::Char));

		for right in alternatives(&rule.right) {
			let tier_two = self.descend(tier_one, Direction::Forward, edges(right));
			for left in alternatives(&rule.left) {
				let tier_three =
					self.descend(tier_two, Direction::Backward, edges(left).into_iter().rev());
				self.store(tier_three, covered, &rule.targets);
			}
		}
	}

	/// Walk `path` from `node`, creating missing children along the way.
	fn descend(
		&mut self,
		mut node: NodeId,
		direction: Direction,
		path: impl IntoIterator<Item = Edge>,
	) -> NodeId {
		for edge in path {
			let existing = self.nodes[node].edges_mut(direction).get(&edge).copied();
			let next = match existing {
				Some(id) => id,
				None => {
					let id = self.nodes.len();
					self.nodes.push(Node::default());
					self.nodes[node].edges_mut(direction).insert(edge, id);
					id
				}
			};
			node = next;
		}
		node
	}

	/// Store a rule output, keeping the longest source token.
	///
	/// An output of equal length replaces the stored one.
	fn store(&mut self, node: NodeId, covered: usize, targets: &[String]) {
		let slot = &mut self.nodes[node].output;
		match slot {
			Some(existing) if existing.covered > covered => return,
			Some(_) => {}
			None => self.outputs += 1,
		}
		*slot = Some(Output {
			covered,
			targets: targets.to_vec(),
		});
	}
}

/// Context tokens to extend by; an unconstrained context adds no edges.
fn alternatives(context: &Context) -> Vec<&str> {
	match context.tokens() {
		None => vec![""],
		Some(tokens) => tokens.iter().map(String::as_str).collect(),
	}
}

fn edges(token: &str) -> Vec<Edge> {
	if token == BOUNDARY {
		vec![Edge::Boundary]
	} else {
		token.chars().map(Edge::Char).collect()
	}
}
