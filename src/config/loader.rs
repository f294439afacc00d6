use std::fs;
use std::path::{Path, PathBuf};

use super::SemanticConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".semmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<SemanticConfig> {
    let config = toml::from_str::<SemanticConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a configuration file at an explicit path.
pub fn load_config_from_path(path: &Path) -> Result<SemanticConfig> {
    let contents = fs::read_to_string(path)?;
    parse_and_validate_config(&contents).map_err(|e| match e {
        Error::Toml(inner) => Error::configuration(format!(
            "Failed to parse {}: {}",
            path.display(),
            inner
        )),
        other => other,
    })
}

fn try_load_config_from_path(config_path: &Path) -> Option<SemanticConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Missing files are the normal case while walking up the tree
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!(
                "Ignoring invalid config {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for the first valid config file.
pub(crate) fn load_config_from(start: PathBuf) -> SemanticConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            SemanticConfig::default()
        })
}

/// Load `.semmap.toml` from the current directory or its ancestors.
pub fn load_config() -> SemanticConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            SemanticConfig::default()
        }
    }
}
