use std::path::PathBuf;

/// Library-level structured errors for prg2p.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum G2pError {
	#[error("Failed to parse rules at line {line}: {content}")]
	Parse {
		line: usize,
		content: String,
		#[source]
		kind: ParseErrorKind,
	},

	#[error("Failed to read rules")]
	ReadRules {
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read rule file: {path}")]
	RulesFileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Transcription trie is empty; no rules were loaded")]
	Structural,

	#[error("Failed to transcribe {word:?}")]
	Match { word: String },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Reasons a single line of rule text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
	#[error("multiple assignments on one line")]
	MultipleAssignments,

	#[error("missing variable name")]
	EmptyVariableName,

	#[error("invalid variable name {0:?}")]
	InvalidVariableName(String),

	#[error("no values to assign")]
	NoValues,

	#[error("empty value in list")]
	EmptyValue,

	#[error("expected 4 tab-separated fields, found {0}")]
	FieldCount(usize),

	#[error("variable \"ALL\" not set")]
	AllNotSet,

	#[error("expected \")\" in {0:?}")]
	UnmatchedParen(String),

	#[error("variable {0:?} not found")]
	UnknownVariable(String),

	#[error("context {0:?} resolves to an empty set")]
	EmptyContext(String),

	#[error("empty source token")]
	EmptySource,

	#[error("empty target")]
	EmptyTarget,
}

/// Result type alias using G2pError.
pub type Result<T> = std::result::Result<T, G2pError>;
