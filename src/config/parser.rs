use crate::config::types::Config;
use crate::error::{G2pError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| G2pError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	toml::from_str(content).map_err(|source| G2pError::ConfigParseError {
		path: path.to_path_buf(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transcribe::Mode;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let content = "";
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(!config.root);
		assert!(config.rules.is_none());
		assert!(config.mode.is_none());
	}

	#[test]
	fn test_parse_full_config() {
		let content = r#"
root = true
rules = "rules/polish.txt"
mode = "all"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.root);
		assert_eq!(config.rules, Some(PathBuf::from("rules/polish.txt")));
		assert_eq!(config.mode, Some(Mode::All));
	}

	#[test]
	fn test_parse_invalid_mode() {
		let content = r#"mode = "sometimes""#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		match result.unwrap_err() {
			G2pError::ConfigParseError { path, .. } => {
				assert_eq!(path, PathBuf::from("test.toml"));
			}
			_ => panic!("Expected ConfigParseError"),
		}
	}

	#[test]
	fn test_parse_unknown_key() {
		let content = r#"rule = "typo.txt""#;
		let path = PathBuf::from("test.toml");
		assert!(parse_config_str(content, &path).is_err());
	}

	#[test]
	fn test_parse_config_file_missing() {
		let path = PathBuf::from("/nonexistent/.prg2p.toml");
		assert!(matches!(
			parse_config_file(&path),
			Err(G2pError::ConfigReadError { .. })
		));
	}
}
