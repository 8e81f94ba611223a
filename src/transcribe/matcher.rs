use crate::trie::{DoubleTrie, Edge, NodeId, Output, ROOT};

/// Find the rule output for the segment starting at `pos`.
///
/// Source and right context are matched greedily forward; on failure the
/// search backs off to shorter paths. Left context is checked backward from
/// the character before `pos`.
pub(crate) fn match_at<'t>(trie: &'t DoubleTrie, word: &[char], pos: usize) -> Option<&'t Output> {
	match_right(trie, word, pos, pos.checked_sub(1), ROOT)
}

fn match_right<'t>(
	trie: &'t DoubleTrie,
	word: &[char],
	front: usize,
	back: Option<usize>,
	node: NodeId,
) -> Option<&'t Output> {
	if let Some(&c) = word.get(front)
		&& let Some(next) = trie.forward(node, Edge::Char(c))
		&& let Some(found) = match_right(trie, word, front + 1, back, next)
	{
		return Some(found);
	}

	if front == word.len()
		&& let Some(end) = trie.forward(node, Edge::Boundary)
		&& let Some(found) = match_left(trie, word, back, end)
	{
		return Some(found);
	}

	match_left(trie, word, back, node)
}

/// `back` is the index of the next character to check, `None` at word start.
fn match_left<'t>(
	trie: &'t DoubleTrie,
	word: &[char],
	back: Option<usize>,
	node: NodeId,
) -> Option<&'t Output> {
	match back {
		Some(idx) => {
			if let Some(next) = trie.backward(node, Edge::Char(word[idx]))
				&& let Some(found) = match_left(trie, word, idx.checked_sub(1), next)
			{
				return Some(found);
			}
		}
		None => {
			// A start-of-word context only counts where a rule terminates.
			if let Some(start) = trie.backward(node, Edge::Boundary)
				&& let Some(found) = trie.output(start)
			{
				return Some(found);
			}
		}
	}

	trie.output(node)
}
