//! # Ticket Fetching
//!
//! Validates credentials, assembles the JQL query, runs the search and
//! normalizes the returned issues into [`IssueRecord`]s. The records are both
//! returned and published to the caller's [`FetchContext`].

use std::future::Future;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::client::{JiraClient, create_jira_client};
use crate::jql::{FieldNames, FilterSpec, QueryBuilder};
use crate::models::IssueRecord;

/// Well-known key under which fetched tickets are published
pub const FETCH_RESULT_KEY: &str = "JIRA_FETCH_TICKETS_RESULT";

/// Errors that can occur while fetching tickets
#[derive(Debug, Error)]
pub enum FetchError {
  /// A required connection setting is empty or absent. Raised before any
  /// query is built or request sent.
  #[error("No value found for '{0}'")]
  MissingRequiredInput(&'static str),
  /// Anything that went wrong talking to Jira
  #[error("Failed to fetch Jira tickets: {0:#}")]
  RemoteRequest(anyhow::Error),
}

/// Capability to run a JQL search and return raw issue objects
pub trait IssueSearch {
  fn search(&self, jql: &str) -> impl Future<Output = anyhow::Result<Vec<Value>>> + Send;
}

impl IssueSearch for JiraClient {
  async fn search(&self, jql: &str) -> anyhow::Result<Vec<Value>> {
    Ok(self.search_issues(jql).await?.issues)
  }
}

/// Connection settings as supplied by the user; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchCredentials {
  pub url: Option<String>,
  pub username: Option<String>,
  pub password: Option<String>,
}

/// Connection settings that passed validation
#[derive(Debug, Clone, Copy)]
pub struct ValidatedCredentials<'a> {
  pub url: &'a str,
  pub username: &'a str,
  pub password: &'a str,
}

impl FetchCredentials {
  /// Check url, username and password, in that order. Each must be non-empty
  /// after trimming.
  pub fn validate(&self) -> Result<ValidatedCredentials<'_>, FetchError> {
    Ok(ValidatedCredentials {
      url: required("url", self.url.as_deref())?.trim(),
      username: required("username", self.username.as_deref())?,
      password: required("password", self.password.as_deref())?,
    })
  }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, FetchError> {
  match value {
    Some(value) if !value.trim().is_empty() => Ok(value),
    _ => Err(FetchError::MissingRequiredInput(field)),
  }
}

/// Everything needed for one fetch
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
  pub credentials: FetchCredentials,
  pub filters: FilterSpec,
  pub fields: FieldNames,
}

impl FetchRequest {
  /// The JQL query this request will run
  pub fn jql(&self) -> String {
    QueryBuilder::new(self.fields.clone()).build(&self.filters)
  }
}

/// Result slot shared with later steps of a pipeline.
///
/// Written once per fetch; readers get the tickets directly or as JSON keyed
/// by [`FETCH_RESULT_KEY`].
#[derive(Debug, Default)]
pub struct FetchContext {
  tickets: Option<Vec<IssueRecord>>,
}

impl FetchContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Store the tickets of the latest fetch
  pub fn publish(&mut self, tickets: Vec<IssueRecord>) {
    self.tickets = Some(tickets);
  }

  /// Tickets of the latest fetch, if one completed
  pub fn tickets(&self) -> Option<&[IssueRecord]> {
    self.tickets.as_deref()
  }

  /// Published result as `{ "JIRA_FETCH_TICKETS_RESULT": [...] }`, or `null`
  /// under the key when nothing was fetched
  pub fn to_json(&self) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(
      FETCH_RESULT_KEY.to_string(),
      serde_json::to_value(&self.tickets).unwrap_or(Value::Null),
    );
    Value::Object(map)
  }
}

/// Fetch tickets from the Jira site named in the request.
///
/// Credentials are validated before the client is built or any request is
/// sent.
pub async fn fetch_tickets(request: &FetchRequest, ctx: &mut FetchContext) -> Result<Vec<IssueRecord>, FetchError> {
  let login = request.credentials.validate()?;
  let client = create_jira_client(login.url, login.username, login.password).map_err(FetchError::RemoteRequest)?;

  run_search(&client, request, ctx).await
}

/// Fetch tickets through an arbitrary search capability
pub async fn fetch_tickets_with<S: IssueSearch>(
  search: &S,
  request: &FetchRequest,
  ctx: &mut FetchContext,
) -> Result<Vec<IssueRecord>, FetchError> {
  request.credentials.validate()?;

  run_search(search, request, ctx).await
}

async fn run_search<S: IssueSearch>(
  search: &S,
  request: &FetchRequest,
  ctx: &mut FetchContext,
) -> Result<Vec<IssueRecord>, FetchError> {
  let jql = request.jql();
  info!("JQL query is '{jql}'");

  let issues = search.search(&jql).await.map_err(FetchError::RemoteRequest)?;
  let tickets = issues
    .into_iter()
    .map(IssueRecord::from_raw)
    .collect::<anyhow::Result<Vec<_>>>()
    .map_err(FetchError::RemoteRequest)?;

  debug!("Fetched {} tickets", tickets.len());
  ctx.publish(tickets.clone());
  Ok(tickets)
}
