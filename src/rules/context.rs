use crate::error::ParseErrorKind;
use std::collections::HashMap;

/// Name of the variable holding every token the rule set recognizes.
pub const ALL: &str = "ALL";

/// Token marking the start or end of a word.
pub const BOUNDARY: &str = "$";

/// Sole value of a variable that stands for "any context".
pub const WILDCARD: &str = "*";

/// A resolved left or right context of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
	/// No constraint, word boundaries included.
	Any,

	/// Only the listed tokens are allowed.
	Include(Vec<String>),

	/// Everything in `ALL` except the excluded tokens; holds what remains.
	Exclude(Vec<String>),
}

impl Context {
	/// Tokens this context admits, or `None` when it is unconstrained.
	pub fn tokens(&self) -> Option<&[String]> {
		match self {
			Context::Any => None,
			Context::Include(tokens) | Context::Exclude(tokens) => Some(tokens),
		}
	}
}

/// Resolve a context expression against the variable table.
pub(crate) fn resolve(
	expr: &str,
	vars: &HashMap<String, Vec<String>>,
) -> Result<Context, ParseErrorKind> {
	if let Some(values) = vars.get(expr)
		&& matches!(values.as_slice(), [only] if only == WILDCARD)
	{
		return Ok(Context::Any);
	}

	// Every constrained form is computed relative to ALL.
	let all = vars.get(ALL).ok_or(ParseErrorKind::AllNotSet)?;

	let context = if let Some(rest) = expr.strip_prefix('-') {
		if rest.starts_with('(') {
			let removed = literal_list(rest)?;
			Context::Exclude(difference(all, &removed))
		} else {
			let mut remaining = all.clone();
			for name in rest.split('-') {
				remaining = difference(&remaining, lookup(vars, name)?);
			}
			Context::Exclude(remaining)
		}
	} else if expr.starts_with('(') {
		Context::Include(literal_list(expr)?)
	} else {
		let mut tokens = Vec::new();
		for name in expr.split('+') {
			tokens.extend(lookup(vars, name)?.iter().cloned());
		}
		Context::Include(tokens)
	};

	if context.tokens().is_some_and(<[String]>::is_empty) {
		return Err(ParseErrorKind::EmptyContext(expr.to_string()));
	}
	Ok(context)
}

/// Split a comma-separated list into trimmed, non-empty tokens.
pub(crate) fn split_list(input: &str) -> Result<Vec<String>, ParseErrorKind> {
	input
		.split(',')
		.map(str::trim)
		.map(|token| {
			if token.is_empty() {
				Err(ParseErrorKind::EmptyValue)
			} else {
				Ok(token.to_string())
			}
		})
		.collect()
}

/// Parse a parenthesized literal list such as `(b, g)`.
fn literal_list(expr: &str) -> Result<Vec<String>, ParseErrorKind> {
	let inner = expr
		.strip_prefix('(')
		.and_then(|s| s.strip_suffix(')'))
		.ok_or_else(|| ParseErrorKind::UnmatchedParen(expr.to_string()))?;
	split_list(inner)
}

fn lookup<'a>(
	vars: &'a HashMap<String, Vec<String>>,
	name: &str,
) -> Result<&'a [String], ParseErrorKind> {
	let name = name.trim();
	vars.get(name)
		.map(Vec::as_slice)
		.ok_or_else(|| ParseErrorKind::UnknownVariable(name.to_string()))
}

/// Keep the tokens of `from` that do not appear in `remove`.
fn difference(from: &[String], remove: &[String]) -> Vec<String> {
	from.iter()
		.filter(|token| !remove.contains(token))
		.cloned()
		.collect()
}
