use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Body of a `/rest/api/2/search` response.
///
/// Issues are kept as raw JSON so callers see every attribute the server
/// returned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
  #[serde(default)]
  pub start_at: Option<u64>,
  #[serde(default)]
  pub max_results: Option<u64>,
  #[serde(default)]
  pub total: Option<u64>,
  #[serde(default)]
  pub issues: Vec<Value>,
}

/// Error body returned by Jira for rejected requests
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraErrorResponse {
  #[serde(default)]
  pub error_messages: Vec<String>,
}

/// A fetched ticket: its key plus the untouched issue payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
  pub key: String,
  pub issue: Value,
}

impl IssueRecord {
  /// Wrap a raw issue object. The issue must carry a string `key`.
  pub fn from_raw(issue: Value) -> Result<Self> {
    let key = issue
      .get("key")
      .and_then(Value::as_str)
      .ok_or_else(|| anyhow!("Jira returned an issue without a key"))?
      .to_string();

    Ok(Self { key, issue })
  }

  /// `fields.summary`, when the server included it
  pub fn summary(&self) -> Option<&str> {
    self.issue.pointer("/fields/summary").and_then(Value::as_str)
  }

  /// `fields.status.name`, when the server included it
  pub fn status(&self) -> Option<&str> {
    self.issue.pointer("/fields/status/name").and_then(Value::as_str)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_search_response_deserialization() {
    let json = json!({
        "expand": "schema,names",
        "startAt": 0,
        "maxResults": 50,
        "total": 57290,
        "issues": [{ "key": "KEY-230" }]
    });

    let response: SearchResponse = serde_json::from_value(json).unwrap();

    assert_eq!(response.start_at, Some(0));
    assert_eq!(response.max_results, Some(50));
    assert_eq!(response.total, Some(57290));
    assert_eq!(response.issues, vec![json!({ "key": "KEY-230" })]);
  }

  #[test]
  fn test_search_response_without_issues() {
    let response: SearchResponse = serde_json::from_value(json!({ "total": 0 })).unwrap();
    assert!(response.issues.is_empty());
  }

  #[test]
  fn test_issue_record_keeps_payload() {
    let raw = json!({
        "id": "10000",
        "key": "PROJ-123",
        "fields": {
            "summary": "Test issue",
            "status": { "name": "In Progress" }
        }
    });

    let record = IssueRecord::from_raw(raw.clone()).unwrap();

    assert_eq!(record.key, "PROJ-123");
    assert_eq!(record.issue, raw);
    assert_eq!(record.summary(), Some("Test issue"));
    assert_eq!(record.status(), Some("In Progress"));
  }

  #[test]
  fn test_issue_record_requires_key() {
    assert!(IssueRecord::from_raw(json!({ "id": "1" })).is_err());
    assert!(IssueRecord::from_raw(json!({ "key": 7 })).is_err());
  }

  #[test]
  fn test_issue_record_serialization() {
    let record = IssueRecord::from_raw(json!({ "key": "KEY-230" })).unwrap();

    assert_eq!(
      serde_json::to_value(&record).unwrap(),
      json!({
          "key": "KEY-230",
          "issue": { "key": "KEY-230" }
      })
    );
  }

  #[test]
  fn test_error_response_deserialization() {
    let body: JiraErrorResponse = serde_json::from_value(json!({
        "errorMessages": ["Field 'sprnt' does not exist"],
        "errors": {}
    }))
    .unwrap();

    assert_eq!(body.error_messages, vec!["Field 'sprnt' does not exist"]);
  }
}
