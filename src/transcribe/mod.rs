//! Word transcription for prg2p.
//!
//! This module handles:
//! - Longest-match lookup of rule outputs along a word
//! - Expanding ambiguous segment outputs into whole-word transcriptions

mod combine;
mod matcher;

use crate::error::{G2pError, Result};
use crate::trie::DoubleTrie;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Which transcriptions of a word to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	/// Only the first transcription.
	#[default]
	First,

	/// Every transcription.
	All,

	/// Only the last transcription.
	Last,
}

impl Mode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Mode::First => "first",
			Mode::All => "all",
			Mode::Last => "last",
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown [`Mode`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode {0:?} (expected first, all or last)")]
pub struct ParseModeError(String);

impl FromStr for Mode {
	type Err = ParseModeError;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"first" => Ok(Mode::First),
			"all" => Ok(Mode::All),
			"last" => Ok(Mode::Last),
			_ => Err(ParseModeError(s.to_string())),
		}
	}
}

/// Transcribes words with a compiled rule trie.
///
/// The trie is never modified after construction, so a single transcriber
/// can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Transcriber {
	trie: DoubleTrie,
}

impl Transcriber {
	pub fn new(trie: DoubleTrie) -> Self {
		Self { trie }
	}

	/// Transcriber for the built-in rule set.
	pub fn with_default_rules() -> Result<Self> {
		crate::load_str(crate::rules::DEFAULT_RULES)
	}

	pub fn trie(&self) -> &DoubleTrie {
		&self.trie
	}

	/// Transcribe a single word.
	///
	/// The word is lower-cased first. Fails if any position of the word has
	/// no applicable rule; partial transcriptions are never returned.
	pub fn transcribe(&self, word: &str, mode: Mode) -> Result<Vec<String>> {
		if self.trie.is_empty() {
			return Err(G2pError::Structural);
		}

		let chars: Vec<char> = word.to_lowercase().chars().collect();
		let segments = self.segments(&chars).ok_or_else(|| {
			tracing::trace!(word, "no rule matches");
			G2pError::Match {
				word: word.to_string(),
			}
		})?;

		Ok(match mode {
			Mode::All => combine::expand(&segments),
			Mode::First => vec![combine::first(&segments)],
			Mode::Last => vec![combine::last(&segments)],
		})
	}

	/// Split the word into matched segments and their alternatives.
	fn segments(&self, word: &[char]) -> Option<Vec<&[String]>> {
		if word.is_empty() {
			return None;
		}

		let mut segments = Vec::new();
		let mut pos = 0;
		while pos < word.len() {
			let output = matcher::match_at(&self.trie, word, pos)?;
			segments.push(output.targets.as_slice());
			pos += output.covered;
		}
		Some(segments)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::load_str;

	const BASIC: &str = "
ALL = a, b, l, m, o, t
EMPTY = *
END = $

EMPTY	a	EMPTY	a
EMPTY	l	EMPTY	l
EMPTY	m	EMPTY	m
EMPTY	o	EMPTY	o
EMPTY	t	EMPTY	t
EMPTY	b	END	p, b
EMPTY	b	-END	b
";

	fn basic() -> Transcriber {
		load_str(BASIC).unwrap()
	}

	fn defaults() -> Transcriber {
		Transcriber::with_default_rules().unwrap()
	}

	#[test]
	fn test_single_character_rules() {
		let g2p = basic();
		assert_eq!(g2p.transcribe("ala", Mode::First).unwrap(), ["a l a"]);
		assert_eq!(g2p.transcribe("ma", Mode::First).unwrap(), ["m a"]);
		assert_eq!(g2p.transcribe("tomato", Mode::First).unwrap(), ["t o m a t o"]);
	}

	#[test]
	fn test_ambiguous_end_of_word() {
		let g2p = basic();
		assert_eq!(g2p.transcribe("b", Mode::All).unwrap(), ["p", "b"]);
		assert_eq!(g2p.transcribe("b", Mode::First).unwrap(), ["p"]);
		assert_eq!(g2p.transcribe("b", Mode::Last).unwrap(), ["b"]);
		assert_eq!(g2p.transcribe("bob", Mode::All).unwrap(), ["b o p", "b o b"]);
	}

	#[test]
	fn test_word_is_lowercased() {
		let g2p = basic();
		assert_eq!(g2p.transcribe("ALA", Mode::First).unwrap(), ["a l a"]);
	}

	#[test]
	fn test_match_errors() {
		let g2p = basic();
		for word in ["", "5432", "al a", "ala,"] {
			match g2p.transcribe(word, Mode::First) {
				Err(G2pError::Match { word: failed }) => assert_eq!(failed, word),
				other => panic!("Expected Match error for {word:?}, got {other:?}"),
			}
		}
	}

	#[test]
	fn test_unbuilt_trie_is_structural_error() {
		let g2p = Transcriber::default();
		assert!(matches!(
			g2p.transcribe("ala", Mode::First),
			Err(G2pError::Structural)
		));

		let g2p = Transcriber::new(DoubleTrie::build(&[]));
		assert!(matches!(g2p.transcribe("", Mode::All), Err(G2pError::Structural)));
	}

	#[test]
	fn test_combination_count_and_order() {
		let g2p = load_str(
			"EMPTY = *\nEMPTY\tx\tEMPTY\tx1, x2\nEMPTY\ty\tEMPTY\ty1, y2, y3\nEMPTY\tz\tEMPTY\tz\n",
		)
		.unwrap();

		let all = g2p.transcribe("xyzx", Mode::All).unwrap();
		assert_eq!(all.len(), 2 * 3 * 2);
		assert_eq!(all[0], "x1 y1 z x1");
		assert_eq!(all[1], "x1 y1 z x2");
		assert_eq!(all[2], "x1 y2 z x1");
		assert_eq!(all[11], "x2 y3 z x2");

		assert_eq!(g2p.transcribe("xyzx", Mode::First).unwrap(), [all[0].clone()]);
		assert_eq!(g2p.transcribe("xyzx", Mode::Last).unwrap(), [all[11].clone()]);
	}

	#[test]
	fn test_exclusion_context() {
		let g2p = load_str(
			"
ALL = a, b, p, q
EMPTY = *
X = p, q
EMPTY	a	-X	free
EMPTY	a	X	blocked
EMPTY	b	EMPTY	b
EMPTY	p	EMPTY	p
EMPTY	q	EMPTY	q
",
		)
		.unwrap();

		assert_eq!(g2p.transcribe("ap", Mode::First).unwrap(), ["blocked p"]);
		assert_eq!(g2p.transcribe("aq", Mode::First).unwrap(), ["blocked q"]);
		assert_eq!(g2p.transcribe("ab", Mode::First).unwrap(), ["free b"]);
		assert_eq!(g2p.transcribe("a", Mode::First).unwrap(), ["free"]);
	}

	#[test]
	fn test_default_rules() {
		let g2p = defaults();
		let cases: &[(&str, Mode, &[&str])] = &[
			("ala", Mode::First, &["a l a"]),
			("ma", Mode::First, &["m a"]),
			("ma", Mode::All, &["m a"]),
			("Kota", Mode::First, &["k o t a"]),
			("Chcę", Mode::All, &["h c e", "h c e_"]),
			("mówię", Mode::All, &["m u w j e", "m u w j e_"]),
			("b", Mode::All, &["p", "b"]),
			("y", Mode::First, &["j"]),
			("my", Mode::First, &["m y"]),
		];

		for (word, mode, want) in cases {
			assert_eq!(
				g2p.transcribe(word, *mode).unwrap(),
				*want,
				"word {word:?} mode {mode}"
			);
		}
	}

	#[test]
	fn test_default_rules_reject_non_letters() {
		let g2p = defaults();
		for word in ["5432", "wiedzie,", "i tak", "i tak...", ""] {
			assert!(
				matches!(g2p.transcribe(word, Mode::First), Err(G2pError::Match { .. })),
				"word {word:?} should fail"
			);
		}
	}

	#[test]
	fn test_concurrent_transcription() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<Transcriber>();

		let g2p = basic();
		std::thread::scope(|scope| {
			let handles: Vec<_> = ["ala", "ma", "tomato", "bob"]
				.into_iter()
				.map(|word| {
					let g2p = &g2p;
					scope.spawn(move || g2p.transcribe(word, Mode::All))
				})
				.collect();
			for handle in handles {
				assert!(handle.join().unwrap().is_ok());
			}
		});
	}

	#[test]
	fn test_mode_from_str() {
		assert_eq!("first".parse::<Mode>().unwrap(), Mode::First);
		assert_eq!("ALL".parse::<Mode>().unwrap(), Mode::All);
		assert_eq!("last".parse::<Mode>().unwrap(), Mode::Last);
		assert!("some".parse::<Mode>().is_err());
		assert_eq!(Mode::default(), Mode::First);
	}
}
