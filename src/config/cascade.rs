use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig};
use crate::error::{G2pError, Result};
use std::path::{Path, PathBuf};

/// File name looked up in every directory of the cascade.
pub const CONFIG_FILE_NAME: &str = ".prg2p.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.prg2p.toml`
/// 2. If found and `root = true`, skip to user config only
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.prg2p.toml
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	// Walk up the directory tree
	loop {
		let config_path = current_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			let config = parse_config_file(&config_path)?;
			let root = config.root;

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if root {
				break;
			}
		}

		// Move to parent directory
		if let Some(parent) = current_dir.parent() {
			current_dir = parent.to_path_buf();
		} else {
			break;
		}
	}

	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	tracing::debug!(count = configs.len(), "discovered config files");
	Ok(configs)
}

/// Load the user's ~/.prg2p.toml if it exists and was not already visited.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	let user_config_path = user_config_path()?;

	if existing_configs.iter().any(|loaded| loaded.path == user_config_path) {
		return Ok(None);
	}

	if user_config_path.exists() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Merge multiple configs into a single effective config.
///
/// Each setting is taken from the most specific config that sets it.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();

	for loaded in configs {
		if merged.rules.is_none() {
			merged.rules = loaded.config.rules_path(&loaded.path);
		}
		if merged.mode.is_none() {
			merged.mode = loaded.config.mode;
		}
		merged.sources.push(loaded.path.clone());
	}

	merged
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(G2pError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::Config;
	use crate::transcribe::Mode;

	fn loaded(path: &str, config: Config) -> LoadedConfig {
		LoadedConfig {
			config,
			path: PathBuf::from(path),
		}
	}

	#[test]
	fn test_merge_most_specific_wins() {
		let configs = vec![
			loaded(
				"/home/user/project/.prg2p.toml",
				Config {
					mode: Some(Mode::All),
					..Default::default()
				},
			),
			loaded(
				"/home/user/.prg2p.toml",
				Config {
					rules: Some(PathBuf::from("rules.txt")),
					mode: Some(Mode::Last),
					..Default::default()
				},
			),
		];

		let merged = merge_configs(&configs);
		assert_eq!(merged.mode, Some(Mode::All));
		assert_eq!(merged.rules, Some(PathBuf::from("/home/user/rules.txt")));
		assert_eq!(merged.sources.len(), 2);
	}

	#[test]
	fn test_merge_empty() {
		let merged = merge_configs(&[]);
		assert!(merged.rules.is_none());
		assert!(merged.mode.is_none());
		assert!(merged.sources.is_empty());
	}

	#[test]
	fn test_user_config_path() {
		let path = user_config_path();
		assert!(path.is_ok());
		let path = path.unwrap();
		assert!(path.ends_with(".prg2p.toml"));
	}

	#[test]
	fn test_discover_stops_at_root() {
		let temp_dir = tempfile::tempdir().unwrap();
		let outer = temp_dir.path();
		let inner = outer.join("inner");
		std::fs::create_dir(&inner).unwrap();

		std::fs::write(outer.join(CONFIG_FILE_NAME), "mode = \"last\"\n").unwrap();
		std::fs::write(inner.join(CONFIG_FILE_NAME), "root = true\nmode = \"all\"\n").unwrap();

		let configs = discover_configs(&inner).unwrap();
		assert_eq!(configs[0].path, inner.join(CONFIG_FILE_NAME));
		assert!(configs.iter().all(|c| c.path != outer.join(CONFIG_FILE_NAME)));
	}

	#[test]
	fn test_discover_walks_up() {
		let temp_dir = tempfile::tempdir().unwrap();
		let outer = temp_dir.path();
		let inner = outer.join("inner");
		std::fs::create_dir(&inner).unwrap();

		std::fs::write(outer.join(CONFIG_FILE_NAME), "root = true\nrules = \"r.txt\"\n").unwrap();
		std::fs::write(inner.join(CONFIG_FILE_NAME), "mode = \"all\"\n").unwrap();

		let merged = load_merged_config(&inner).unwrap();
		assert_eq!(merged.mode, Some(Mode::All));
		assert_eq!(merged.rules, Some(outer.join("r.txt")));
	}
}
