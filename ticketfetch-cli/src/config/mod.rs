//! # Configuration File
//!
//! Shape of `config.toml` and how its values combine with flags, environment
//! variables and `.netrc`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use ticketfetch_core::{ConfigDirs, get_config_dirs, lookup_jira_credentials};
use ticketfetch_jira::{FetchCredentials, FieldNames, FilterSpec};
use tracing::debug;

/// Commented template written by `ticketfetch config --init`
pub const CONFIG_TEMPLATE: &str = r#"# ticketfetch configuration
#
# Flags and FL_JIRA_* environment variables override anything set here.

[jira]
# url = "https://company.atlassian.net"
# username = "me@company.com"
# Prefer FL_JIRA_PASSWORD or ~/.netrc over storing the token here.
# password = ""

[filters]
# projects = ["APP"]
# status = "In Progress"
# labels = ["backend", "needs review"]
# custom_jql = "assignee = currentUser()"

[fields]
# Some Jira schemas name the sprint field "Sprint".
# sprint = "sprint"
"#;

/// Connection settings from the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraSection {
  pub url: Option<String>,
  pub username: Option<String>,
  #[serde(skip_serializing)]
  pub password: Option<String>,
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
  pub jira: JiraSection,
  pub filters: FilterSpec,
  pub fields: FieldNames,
}

impl FileConfig {
  /// Load the config file from the given directories
  pub fn load(dirs: &ConfigDirs) -> Result<Self> {
    dirs.load()
  }

  /// Render as TOML, leaving out the password
  pub fn to_toml(&self) -> Result<String> {
    toml::to_string_pretty(self).context("Failed to serialize configuration")
  }
}

/// Load the config file from the user's config directory
pub fn load_file_config() -> Result<(ConfigDirs, FileConfig)> {
  let dirs = get_config_dirs()?;
  let config = FileConfig::load(&dirs)?;
  Ok((dirs, config))
}

/// The user's home directory, where `.netrc` lives
pub fn home_dir() -> Option<PathBuf> {
  BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Combine explicit connection settings with the config file and, for a still
/// missing username or password, `.netrc` entries for the site.
pub fn resolve_credentials(
  explicit: FetchCredentials,
  file: &JiraSection,
  home: Option<&Path>,
) -> Result<FetchCredentials> {
  let mut creds = FetchCredentials {
    url: non_blank(explicit.url).or_else(|| file.url.clone()),
    username: non_blank(explicit.username).or_else(|| file.username.clone()),
    password: non_blank(explicit.password).or_else(|| file.password.clone()),
  };

  let needs_netrc = creds.username.is_none() || creds.password.is_none();
  if let (true, Some(home), Some(url)) = (needs_netrc, home, creds.url.as_deref())
    && let Some(found) = lookup_jira_credentials(home, url)?
  {
    debug!("Filling missing Jira credentials from .netrc");
    creds.username.get_or_insert(found.username);
    creds.password.get_or_insert(found.password);
  }

  Ok(creds)
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;
  use ticketfetch_test_utils::NetrcGuard;

  use super::*;

  #[test]
  fn test_template_parses_to_defaults() {
    let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
    assert_eq!(config, FileConfig::default());
  }

  #[test]
  fn test_load_full_config() {
    let temp_dir = TempDir::new().unwrap();
    let dirs = ConfigDirs::at(temp_dir.path());
    fs::write(
      dirs.config_path(),
      r#"
[jira]
url = "https://company.atlassian.net"
username = "me@company.com"

[filters]
projects = ["APP", "WEB"]
status = "In Progress"
custom_jql = "assignee = currentUser()"

[fields]
sprint = "Sprint"
"#,
    )
    .unwrap();

    let config = FileConfig::load(&dirs).unwrap();
    assert_eq!(config.jira.url.as_deref(), Some("https://company.atlassian.net"));
    assert_eq!(config.filters.projects, Some(vec!["APP".to_string(), "WEB".to_string()]));
    assert_eq!(config.filters.status.as_deref(), Some("In Progress"));
    assert_eq!(config.fields.sprint, "Sprint");
    assert_eq!(config.fields.project, "project");
  }

  #[test]
  fn test_to_toml_omits_password() {
    let config = FileConfig {
      jira: JiraSection {
        url: Some("https://x.atlassian.net".to_string()),
        username: Some("me".to_string()),
        password: Some("secret-token".to_string()),
      },
      ..Default::default()
    };

    let rendered = config.to_toml().unwrap();
    assert!(rendered.contains("https://x.atlassian.net"));
    assert!(!rendered.contains("secret-token"));
  }

  #[test]
  fn test_explicit_values_win_over_file() {
    let file = JiraSection {
      url: Some("https://file.atlassian.net".to_string()),
      username: Some("file-user".to_string()),
      password: Some("file-pass".to_string()),
    };
    let explicit = FetchCredentials {
      url: Some("https://flag.atlassian.net".to_string()),
      username: None,
      password: Some("flag-pass".to_string()),
    };

    let creds = resolve_credentials(explicit, &file, None).unwrap();
    assert_eq!(creds.url.as_deref(), Some("https://flag.atlassian.net"));
    assert_eq!(creds.username.as_deref(), Some("file-user"));
    assert_eq!(creds.password.as_deref(), Some("flag-pass"));
  }

  #[test]
  fn test_blank_explicit_values_fall_through() {
    let file = JiraSection {
      url: Some("https://file.atlassian.net".to_string()),
      ..Default::default()
    };
    let explicit = FetchCredentials {
      url: Some("   ".to_string()),
      ..Default::default()
    };

    let creds = resolve_credentials(explicit, &file, None).unwrap();
    assert_eq!(creds.url.as_deref(), Some("https://file.atlassian.net"));
  }

  #[test]
  fn test_netrc_fills_only_missing_values() {
    let guard = NetrcGuard::new("machine company.atlassian.net login netrc-user password netrc-pass\n");
    let explicit = FetchCredentials {
      url: Some("https://company.atlassian.net".to_string()),
      username: Some("flag-user".to_string()),
      password: None,
    };

    let creds = resolve_credentials(explicit, &JiraSection::default(), Some(guard.home_dir())).unwrap();
    assert_eq!(creds.username.as_deref(), Some("flag-user"));
    assert_eq!(creds.password.as_deref(), Some("netrc-pass"));
  }

  #[test]
  fn test_missing_url_skips_netrc() {
    let guard = NetrcGuard::new("machine atlassian.net login netrc-user password netrc-pass\n");

    let creds =
      resolve_credentials(FetchCredentials::default(), &JiraSection::default(), Some(guard.home_dir())).unwrap();
    assert_eq!(creds, FetchCredentials::default());
  }
}
