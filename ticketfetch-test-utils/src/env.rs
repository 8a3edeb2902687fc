//! Environment variable management for testing
//!
//! RAII guards that set environment variables for the duration of a test and
//! restore the previous values when dropped.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// Restores a single environment variable to its original value on drop
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Capture the current value of `name`
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Set the variable for the lifetime of the guard
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}

/// A test environment that points XDG_CONFIG_HOME at a per-test temporary
/// directory
pub struct EnvTestGuard {
  /// The temporary directory backing XDG_CONFIG_HOME
  pub temp_dir: TempDir,
  config_home: EnvVarGuard,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";

  /// Create a new test environment with an overridden config home
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config_home = EnvVarGuard::new(Self::XDG_CONFIG_HOME);

    let config_dir = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_dir).expect("Failed to create config directory");
    config_home.set(&config_dir.to_string_lossy());

    Self { temp_dir, config_home }
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }
}
