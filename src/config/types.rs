use crate::transcribe::Mode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration from a `.prg2p.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// If true, stop directory cascade and jump directly to ~/.prg2p.toml.
	#[serde(default)]
	pub root: bool,

	/// Rule file to load instead of the built-in rules.
	/// Relative paths are resolved against the directory of the config file.
	#[serde(default)]
	pub rules: Option<PathBuf>,

	/// Default transcription mode: "first", "all" or "last".
	#[serde(default)]
	pub mode: Option<Mode>,
}

impl Config {
	/// The rule file path, resolved against the config file location.
	pub fn rules_path(&self, config_path: &Path) -> Option<PathBuf> {
		let rules = self.rules.as_ref()?;
		if rules.is_absolute() {
			return Some(rules.clone());
		}
		let base = config_path.parent().unwrap_or_else(|| Path::new("."));
		Some(base.join(rules))
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Effective settings after merging the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// Resolved rule file path, if any config sets one.
	pub rules: Option<PathBuf>,

	/// Transcription mode, if any config sets one.
	pub mode: Option<Mode>,

	/// Config files that contributed, most specific first.
	pub sources: Vec<PathBuf>,
}
