//! # Configuration Management
//!
//! Locates the ticketfetch configuration directory (XDG base directory aware)
//! and reads or initializes the TOML configuration file kept there.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::consts::CONFIG_FILE_NAME;

/// Represents the configuration directories for ticketfetch
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs =
      ProjectDirs::from("dev", "ticketfetch", "ticketfetch").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Build a ConfigDirs rooted at an explicit directory
  pub fn at<P: AsRef<Path>>(config_dir: P) -> Self {
    Self {
      config_dir: config_dir.as_ref().to_path_buf(),
    }
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Load the configuration file, or `T::default()` when it does not exist
  pub fn load<T: DeserializeOwned + Default>(&self) -> Result<T> {
    let config_path = self.config_path();

    if !config_path.exists() {
      debug!("No config file at {}, using defaults", config_path.display());
      return Ok(T::default());
    }

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

    let config: T =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    debug!("Loaded config from {}", config_path.display());
    Ok(config)
  }

  /// Write `template` to the configuration file unless one already exists.
  ///
  /// Returns `true` when the file was created.
  pub fn init(&self, template: &str) -> Result<bool> {
    let config_path = self.config_path();
    if config_path.exists() {
      return Ok(false);
    }

    fs::create_dir_all(&self.config_dir)
      .with_context(|| format!("Failed to create config directory {}", self.config_dir.display()))?;
    fs::write(&config_path, template)
      .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(true)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}
