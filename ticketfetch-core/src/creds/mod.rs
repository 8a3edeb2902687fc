//! # Credential Management
//!
//! Fallback credential discovery for the Jira site. Explicit flags,
//! environment variables and the config file always win; `.netrc` only fills
//! in a username or password that is still missing.

pub mod netrc;

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::consts::NETRC_FALLBACK_MACHINE;
use crate::url::site_host;

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Look up `.netrc` credentials for a Jira site.
///
/// Tries the site's own host first and then the generic `atlassian.net`
/// machine. A missing `.netrc` file is not an error.
pub fn lookup_jira_credentials(home: &Path, site: &str) -> Result<Option<Credentials>> {
  let netrc_path = netrc::get_netrc_path(home);
  if !netrc_path.exists() {
    debug!("No .netrc at {}", netrc_path.display());
    return Ok(None);
  }

  let mut machines = Vec::with_capacity(2);
  if let Some(host) = site_host(site) {
    machines.push(host);
  }
  machines.push(NETRC_FALLBACK_MACHINE.to_string());

  for machine in machines {
    if let Some(creds) = netrc::parse_netrc_file(&netrc_path, &machine)? {
      debug!("Using .netrc credentials for machine '{machine}'");
      return Ok(Some(creds));
    }
  }

  Ok(None)
}
