//! Configuration for flatkv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a Store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file holding every record of the store
    pub data_path: PathBuf,

    /// Permission bits used when the backing file is created (Unix only)
    pub file_mode: u32,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// fdatasync after every persist, not just on close
    pub sync_on_persist: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./flatkv.db"),
            file_mode: 0o644,
            sync_on_persist: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_path = path.into();
        self
    }

    /// Set the creation mode of the backing file
    pub fn file_mode(mut self, mode: u32) -> Self {
        self.config.file_mode = mode;
        self
    }

    /// Sync file data after every persist
    pub fn sync_on_persist(mut self, enabled: bool) -> Self {
        self.config.sync_on_persist = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
