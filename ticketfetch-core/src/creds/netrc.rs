//! Helpers for reading credentials stored in `.netrc` files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::creds::Credentials;

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// ```
/// use std::path::Path;
/// use ticketfetch_core::creds::netrc::get_netrc_path;
///
/// let path = get_netrc_path(Path::new("/home/user"));
/// assert_eq!(path, Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted, since the format is whitespace-token based. Entries
/// missing either `login` or `password` are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(parse_netrc(&content, target_machine))
}

/// Token-level `.netrc` lookup over already loaded content.
///
/// Only lines whose first non-blank character is `#` are comments; a `#`
/// inside a token belongs to the token.
pub fn parse_netrc(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut tokens = content
    .lines()
    .filter(|line| !line.trim_start().starts_with('#'))
    .flat_map(str::split_whitespace);

  let mut in_target = false;
  let mut login: Option<&str> = None;
  let mut password: Option<&str> = None;

  while let Some(token) = tokens.next() {
    match token {
      "machine" => {
        if let Some(found) = complete(in_target, login, password) {
          return Some(found);
        }
        in_target = tokens.next() == Some(target_machine);
        login = None;
        password = None;
      }
      "login" if in_target => login = tokens.next(),
      "password" if in_target => password = tokens.next(),
      _ => {}
    }
  }

  complete(in_target, login, password)
}

fn complete(in_target: bool, login: Option<&str>, password: Option<&str>) -> Option<Credentials> {
  match (in_target, login, password) {
    (true, Some(username), Some(password)) => Some(Credentials {
      username: username.to_string(),
      password: password.to_string(),
    }),
    _ => None,
  }
}
