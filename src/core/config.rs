//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::store::DEFAULT_DATA_FILE;
use crate::entities::item::DEFAULT_UNIT;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".stn.yaml";

/// Reorder level offered for new items when none is given
pub const DEFAULT_REORDER_LEVEL: u32 = 10;

/// stn configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Inventory CSV file
    pub data_file: Option<PathBuf>,

    /// Directory that `stn export` writes backups into
    pub export_dir: Option<PathBuf>,

    /// Reorder level for `stn add` when `--reorder-level` is omitted
    pub default_reorder_level: Option<u32>,

    /// Unit pre-filled by `stn add`
    pub default_unit: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_from(&cwd)
    }

    /// Same as [`Config::load`] with `dir` standing in for the working directory
    pub fn load_from(dir: &Path) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (accessor fallbacks)

        // 2. Global user config (~/.config/stn/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (./.stn.yaml)
        if let Some(local) = Self::read_file(&dir.join(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(data_file) = std::env::var("STN_DATA_FILE") {
            config.data_file = Some(PathBuf::from(data_file));
        }
        if let Ok(export_dir) = std::env::var("STN_EXPORT_DIR") {
            config.export_dir = Some(PathBuf::from(export_dir));
        }

        config
    }

    /// Parse a YAML config file, ignoring missing or malformed files
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stn")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.export_dir.is_some() {
            self.export_dir = other.export_dir;
        }
        if other.default_reorder_level.is_some() {
            self.default_reorder_level = other.default_reorder_level;
        }
        if other.default_unit.is_some() {
            self.default_unit = other.default_unit;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Apply a command-line override of the data file
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if data_file.is_some() {
            self.data_file = data_file;
        }
        self
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn default_reorder_level(&self) -> u32 {
        self.default_reorder_level.unwrap_or(DEFAULT_REORDER_LEVEL)
    }

    pub fn default_unit(&self) -> String {
        self.default_unit
            .clone()
            .unwrap_or_else(|| DEFAULT_UNIT.to_string())
    }
}
