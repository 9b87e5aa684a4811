//! Ambient system configuration. None of this is consumed by the sketch
//! or connectivity core; it exists so that a surrounding deployment (an
//! ingest-worker pool, an on-disk buffer tree) has a single place to load
//! its settings from, exactly as `spec.md` §6 describes.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// The three values a surrounding system reads at startup, before
/// constructing its buffer tree or spinning up graph workers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Whether stream updates are staged through an on-disk buffer tree
    /// rather than applied directly.
    pub use_guttertree: bool,
    /// Whether buffer tree backups are kept in memory rather than
    /// flushed to `disk_dir`.
    pub in_memory_backups: bool,
    /// Path prefix under which buffer tree data is stored.
    pub disk_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            use_guttertree: false,
            in_memory_backups: true,
            disk_dir: "./data".to_owned(),
        }
    }
}

/// Loads configuration from a TOML file at `path`. Missing fields fall
/// back to [`SystemConfig::default`]; a missing file entirely also falls
/// back to the default rather than erroring, since callers before this
/// one never required a config file to exist.
pub fn load(path: &Path) -> Result<SystemConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(SystemConfig::default()),
        Err(err) => Err(err.into()),
    }
}
