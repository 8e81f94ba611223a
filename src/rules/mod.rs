//! Rule language interpretation for prg2p.
//!
//! This module handles:
//! - Variable assignments (`NAME = v1, v2, ...`)
//! - Tab-separated rule statements (`LEFT	SOURCE	RIGHT	TARGETS`)
//! - Resolving context expressions into token sets

pub mod context;
pub mod interpreter;

pub use context::{ALL, BOUNDARY, Context, WILDCARD};
pub use interpreter::{Interpreter, Rule};

/// Default Polish grapheme-to-phoneme rules.
pub const DEFAULT_RULES: &str = include_str!("default_rules.txt");
