use anyhow::{Context, Result};
use reqwest::Client;
use ticketfetch_core::normalize_site_url;
use tokio::runtime::Runtime;

use crate::models::JiraAuth;

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client for an already normalized base URL
  pub fn new(base_url: &str, auth: JiraAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    }
  }

  /// The site URL requests are sent to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

/// Create a Jira client from credentials, normalizing the site URL first
pub fn create_jira_client(site: &str, username: &str, api_token: &str) -> Result<JiraClient> {
  let base_url = normalize_site_url(site).context("Invalid Jira site URL")?;
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  Ok(JiraClient::new(&base_url, auth))
}

/// Creates a tokio runtime for driving the client from synchronous code
pub fn create_jira_runtime() -> Result<Runtime> {
  Runtime::new().context("Failed to create async runtime")
}
