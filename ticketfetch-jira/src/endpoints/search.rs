//! # Jira Search Endpoint
//!
//! JQL search over `/rest/api/2/search`. One request per call; the server's
//! default page size applies.

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, trace};

use crate::client::JiraClient;
use crate::consts::{SEARCH_PATH, USER_AGENT as CLIENT_USER_AGENT};
use crate::models::{JiraErrorResponse, SearchResponse};

impl JiraClient {
  /// Run a JQL search and return the decoded response body
  pub async fn search_issues(&self, jql: &str) -> Result<SearchResponse> {
    let url = format!("{}{}", self.base_url, SEARCH_PATH);
    debug!("Searching Jira at {url} with JQL '{jql}'");

    let response = self
      .client
      .get(&url)
      .query(&[("jql", jql)])
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .header(ACCEPT, "application/json")
      .header(USER_AGENT, CLIENT_USER_AGENT)
      .send()
      .await
      .context("Failed to send Jira search request")?;

    let status = response.status();
    trace!("Jira search responded with HTTP {status}");

    match status {
      StatusCode::OK => {
        let body = response
          .json::<SearchResponse>()
          .await
          .context("Failed to parse Jira search response")?;
        debug!("Jira search returned {} issues", body.issues.len());
        Ok(body)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        Err(anyhow!("Authentication failed. Please check your Jira credentials."))
      }
      StatusCode::BAD_REQUEST => {
        let body = response.json::<JiraErrorResponse>().await.unwrap_or_default();
        Err(anyhow!("Jira rejected the query: {}", body.error_messages.join("; ")))
      }
      _ => Err(anyhow!(
        "Unexpected error: HTTP {} - {}",
        status,
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
