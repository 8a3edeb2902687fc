//! # Jira Ticket Fetching
//!
//! JQL assembly from filter inputs, a minimal Jira REST client for the search
//! endpoint, and the fetch flow that ties them together.

mod client;
mod consts;
mod endpoints;
pub mod fetch;
pub mod jql;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client, create_jira_runtime};
pub use fetch::{
  FETCH_RESULT_KEY, FetchContext, FetchCredentials, FetchError, FetchRequest, IssueSearch, fetch_tickets,
  fetch_tickets_with,
};
pub use jql::{Dimension, FieldNames, FilterSpec, QueryBuilder, build_jql, needs_quoting};
// Re-export models
pub use models::{IssueRecord, JiraAuth, SearchResponse};
