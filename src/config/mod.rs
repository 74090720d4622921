//! Configuration loading for staircase suites.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use staircase::config::{load_config, ColorMode};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("staircase.yml"), "color: never").unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! assert_eq!(config.color, ColorMode::Never);
//! assert_eq!(config.restart_retries, 1);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAMES};
pub use schema::{ColorMode, StaircaseConfig};
