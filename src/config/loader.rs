//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::StaircaseConfig;
use crate::error::{Result, StaircaseError};

/// File names looked for when no path is given, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".staircase.yml", "staircase.yml"];

/// Find a config file in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load an explicit config file, or the one discovered in `dir`.
///
/// With no explicit path and nothing discovered, the defaults are returned.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<StaircaseConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => match find_config(dir) {
            Some(path) => load_config_file(&path),
            None => Ok(StaircaseConfig::default()),
        },
    }
}

/// Load a single config file and parse it into StaircaseConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<StaircaseConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StaircaseError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StaircaseError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into StaircaseConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<StaircaseConfig> {
    if content.trim().is_empty() {
        return Ok(StaircaseConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| StaircaseError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
