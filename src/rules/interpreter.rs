use crate::error::{G2pError, ParseErrorKind, Result};
use crate::rules::context::{self, ALL, BOUNDARY, Context};
use regex::Regex;
use std::collections::HashMap;
use std::io::BufRead;
use std::sync::LazyLock;

/// A name starting with an exclusion or list operator could never be looked up.
static VARIABLE_NAME: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^(-]").expect("variable name pattern compiles"));

/// A contextual rewrite rule.
///
/// ```text
/// SB	rz	EMPTY	sz
/// EMPTY	n	(ni, ci, dzi)	n, ni
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	/// Context required before the source token.
	pub left: Context,

	/// Grapheme sequence matched verbatim.
	pub source: String,

	/// Context required after the source token.
	pub right: Context,

	/// Alternative transcriptions in authoring order.
	pub targets: Vec<String>,
}

/// Interprets rule text into a variable table and an ordered rule list.
#[derive(Debug, Default)]
pub struct Interpreter {
	vars: HashMap<String, Vec<String>>,
	rules: Vec<Rule>,
}

impl Interpreter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Evaluate every line from `reader`, stopping at the first malformed one.
	///
	/// On error the interpreter may hold a partial rule set and should be
	/// discarded.
	pub fn scan<R: BufRead>(&mut self, reader: R) -> Result<()> {
		for (idx, line) in reader.lines().enumerate() {
			let line = line.map_err(|source| G2pError::ReadRules { source })?;
			self.eval(&line).map_err(|kind| G2pError::Parse {
				line: idx + 1,
				content: line.trim().to_string(),
				kind,
			})?;
		}

		tracing::debug!(
			variables = self.vars.len(),
			rules = self.rules.len(),
			"interpreted rule set"
		);
		Ok(())
	}

	/// Evaluate a single line as a comment, an assignment or a rule.
	pub fn eval(&mut self, line: &str) -> std::result::Result<(), ParseErrorKind> {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			return Ok(());
		}
		if line.contains('=') {
			self.assign(line)
		} else {
			self.rule(line)
		}
	}

	/// Look up the values of a variable.
	pub fn variable(&self, name: &str) -> Option<&[String]> {
		self.vars.get(name).map(Vec::as_slice)
	}

	/// All variables defined so far.
	pub fn variables(&self) -> &HashMap<String, Vec<String>> {
		&self.vars
	}

	/// Rules in definition order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn into_rules(self) -> Vec<Rule> {
		self.rules
	}

	fn assign(&mut self, line: &str) -> std::result::Result<(), ParseErrorKind> {
		let (name, values) = line.split_once('=').ok_or(ParseErrorKind::NoValues)?;
		if values.contains('=') {
			return Err(ParseErrorKind::MultipleAssignments);
		}

		let name = name.trim();
		if name.is_empty() {
			return Err(ParseErrorKind::EmptyVariableName);
		}
		if !VARIABLE_NAME.is_match(name) {
			return Err(ParseErrorKind::InvalidVariableName(name.to_string()));
		}
		if values.trim().is_empty() {
			return Err(ParseErrorKind::NoValues);
		}

		let mut values = context::split_list(values)?;
		if name == ALL && !values.iter().any(|v| v == BOUNDARY) {
			values.push(BOUNDARY.to_string());
		}
		self.vars.insert(name.to_string(), values);
		Ok(())
	}

	fn rule(&mut self, line: &str) -> std::result::Result<(), ParseErrorKind> {
		let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
		let [left, source, right, targets] = fields.as_slice() else {
			return Err(ParseErrorKind::FieldCount(fields.len()));
		};

		if source.is_empty() {
			return Err(ParseErrorKind::EmptySource);
		}
		let left = context::resolve(left, &self.vars)?;
		let right = context::resolve(right, &self.vars)?;
		let targets =
			context::split_list(targets).map_err(|_| ParseErrorKind::EmptyTarget)?;

		self.rules.push(Rule {
			left,
			source: source.to_string(),
			right,
			targets,
		});
		Ok(())
	}
}
