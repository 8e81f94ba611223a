//! prg2p - rule-based grapheme-to-phoneme converter.
//!
//! This library provides the core functionality for prg2p, including:
//! - Interpreting the rewrite-rule language into variables and rules
//! - Compiling rules into a double trie keyed by source, right and left context
//! - Transcribing words by longest context-sensitive match
//! - Configuration file discovery for the command-line tool
//!
//! # Example
//!
//! ```
//! use prg2p::{Mode, Transcriber};
//!
//! let g2p = Transcriber::with_default_rules().unwrap();
//! assert_eq!(g2p.transcribe("kota", Mode::First).unwrap(), ["k o t a"]);
//!
//! let all = g2p.transcribe("chcę", Mode::All).unwrap();
//! assert_eq!(all, ["h c e", "h c e_"]);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod rules;
pub mod transcribe;
pub mod trie;

pub use error::{G2pError, ParseErrorKind, Result};
pub use rules::{Interpreter, Rule};
pub use transcribe::{Mode, Transcriber};
pub use trie::DoubleTrie;

use std::io::BufRead;

/// Read rules from `reader` and compile them into a transcriber.
///
/// Fails on the first malformed line.
pub fn load<R: BufRead>(reader: R) -> Result<Transcriber> {
	let mut interp = Interpreter::new();
	interp.scan(reader)?;
	let trie = DoubleTrie::build(&interp.into_rules());
	Ok(Transcriber::new(trie))
}

/// Compile rules from a string.
pub fn load_str(rules: &str) -> Result<Transcriber> {
	load(rules.as_bytes())
}

/// Compile rules from a file on disk.
pub fn load_file(path: &std::path::Path) -> Result<Transcriber> {
	let file = std::fs::File::open(path).map_err(|source| G2pError::RulesFileRead {
		path: path.to_path_buf(),
		source,
	})?;
	load(std::io::BufReader::new(file))
}
