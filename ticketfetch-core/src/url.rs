//! URL helpers for the Jira site setting.
//!
//! Users tend to type the site as `company.atlassian.net`,
//! `https://company.atlassian.net/` or `http:/jira.local`; these helpers turn
//! any of those into one canonical base URL and extract the host used for
//! credential lookup.

use anyhow::{Result, anyhow};
use url::{Position, Url};

/// Ensure a site URL has a proper scheme (http:// or https://) and no trailing
/// slash.
///
/// If the input doesn't include a scheme, assumes https://. Also repairs
/// malformed schemes like "http:/example.com" (missing slash).
pub fn normalize_site_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow!("Site URL cannot be empty"));
  }

  let candidate = match split_scheme(trimmed) {
    Some((scheme, rest)) => format!("{scheme}://{}", rest.trim_start_matches('/')),
    None => format!("https://{trimmed}"),
  };

  let url = Url::parse(&candidate).map_err(|e| anyhow!("Failed to parse site URL '{input}': {e}"))?;
  if url.host_str().is_none() {
    return Err(anyhow!("Site URL '{input}' has no host"));
  }

  Ok(strip_trailing_slash(&url))
}

/// Extract `host[:port]` from a site URL, used as the `.netrc` machine name.
pub fn site_host(site: &str) -> Option<String> {
  let url = Url::parse(&normalize_site_url(site).ok()?).ok()?;
  let host = url.host_str()?;
  Some(match url.port() {
    Some(port) => format!("{host}:{port}"),
    None => host.to_string(),
  })
}

/// Split off an http/https scheme, case-insensitively, tolerating missing
/// slashes after the colon.
fn split_scheme(input: &str) -> Option<(&'static str, &str)> {
  let (scheme, rest) = input.split_once(':')?;
  if scheme.eq_ignore_ascii_case("https") {
    Some(("https", rest))
  } else if scheme.eq_ignore_ascii_case("http") {
    Some(("http", rest))
  } else {
    None
  }
}

fn strip_trailing_slash(url: &Url) -> String {
  let mut result = url[..Position::AfterPath].trim_end_matches('/').to_string();
  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }
  result
}
