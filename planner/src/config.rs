//! Planner configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_STORAGE_DIR: &str = ".hexmap";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_AUTOSAVE_SECS: u64 = 30;
pub const DEFAULT_MAP_NAME: &str = "My Hex Map";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Directory backing the map library.
    pub storage_dir: PathBuf,
    /// Directory scanned for `*.json` map templates.
    pub templates_dir: PathBuf,
    /// Period of the auto-save timer.
    pub autosave_interval: Duration,
    /// Name given to the map a fresh session starts with.
    pub default_map_name: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_SECS),
            default_map_name: DEFAULT_MAP_NAME.to_owned(),
        }
    }
}

impl PlannerConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `HEXMAP_STORAGE_DIR`: default `.hexmap`
    /// - `HEXMAP_TEMPLATES_DIR`: default `templates`
    /// - `HEXMAP_AUTOSAVE_SECS`: default 30
    /// - `HEXMAP_DEFAULT_NAME`: default `My Hex Map`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build config from an arbitrary variable source.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Self {
        let autosave_secs = env_parse(&lookup, "HEXMAP_AUTOSAVE_SECS", DEFAULT_AUTOSAVE_SECS);
        Self {
            storage_dir: env_parse(&lookup, "HEXMAP_STORAGE_DIR", PathBuf::from(DEFAULT_STORAGE_DIR)),
            templates_dir: env_parse(&lookup, "HEXMAP_TEMPLATES_DIR", PathBuf::from(DEFAULT_TEMPLATES_DIR)),
            autosave_interval: Duration::from_secs(autosave_secs),
            default_map_name: match lookup("HEXMAP_DEFAULT_NAME") {
                Ok(name) if !name.trim().is_empty() => name.trim().to_owned(),
                _ => DEFAULT_MAP_NAME.to_owned(),
            },
        }
    }
}

fn env_parse<T: FromStr>(lookup: &impl Fn(&str) -> Result<String, VarError>, key: &str, default: T) -> T {
    match lookup(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or(default),
        _ => default,
    }
}
