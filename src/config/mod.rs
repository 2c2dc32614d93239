//! Configuration file handling
//!
//! `config.toml` holds exactly two keys:
//!
//! ```toml
//! game_dir = "Games/overwatch/drive_c/Program Files (x86)/Overwatch/_retail_"
//!
//! [repos]
//! somebody = "https://example.com/Overwatch.dxvk-cache"
//! ```
//!
//! Validation produces a [`ConfigValidation`] instead of failing, so callers
//! decide what to do with a broken file (see [`bootstrap`]).

pub mod bootstrap;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error, fs as fs_error};
use crate::paths::backup_path;

pub use bootstrap::{AssumeYes, ConfirmPolicy, PromptConfirm, ensure_work_dir, load_or_bootstrap};

/// Initial configuration written on first run
pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Top-level keys a configuration must have, no more and no less
pub const CONFIG_KEYS: [&str; 2] = ["game_dir", "repos"];

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Game directory relative to the home directory
    pub game_dir: String,

    /// Source name -> URL of its cache file
    pub repos: BTreeMap<String, String>,
}

/// Outcome of validating a configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidation {
    Valid(Config),
    Invalid(String),
}

/// Validate configuration file content
pub fn validate(content: &str) -> ConfigValidation {
    let table: toml::Table = match toml::from_str(content) {
        Ok(table) => table,
        Err(e) => return ConfigValidation::Invalid(format!("not valid TOML: {}", e.message())),
    };

    let found: BTreeSet<&str> = table.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = CONFIG_KEYS.into_iter().collect();
    if found != expected {
        let missing: Vec<&str> = expected.difference(&found).copied().collect();
        let unexpected: Vec<&str> = found.difference(&expected).copied().collect();
        let mut reasons = Vec::new();
        if !missing.is_empty() {
            reasons.push(format!("missing keys: {}", missing.join(", ")));
        }
        if !unexpected.is_empty() {
            reasons.push(format!("unexpected keys: {}", unexpected.join(", ")));
        }
        return ConfigValidation::Invalid(reasons.join("; "));
    }

    match toml::Value::Table(table).try_into::<Config>() {
        Ok(config) => ConfigValidation::Valid(config),
        Err(e) => ConfigValidation::Invalid(e.message().to_string()),
    }
}

/// Read and validate the configuration file at `path`
pub fn load(path: &Path) -> Result<ConfigValidation> {
    if !path.exists() {
        return Err(config_error::not_found(path.display().to_string()));
    }
    let content = fs::read_to_string(path).map_err(|e| fs_error::read_failed(path, e))?;
    Ok(validate(&content))
}

/// Write the initial configuration to `path`, replacing any existing file
pub fn write_initial(path: &Path) -> Result<()> {
    fs::write(path, DEFAULT_CONFIG).map_err(|e| fs_error::write_failed(path, e))
}

/// Copy the configuration to `config.toml.old`
pub fn backup(path: &Path) -> Result<()> {
    let target = backup_path(path);
    fs::copy(path, &target).map_err(|e| fs_error::copy_failed(path, &target, e))?;
    Ok(())
}
