//! # JQL Assembly
//!
//! Builds the JQL search string from a [`FilterSpec`]. Dimensions are emitted
//! in a fixed order (project, status, labels, sprint, fix version) and joined
//! with `AND`; an optional raw custom clause is appended last, verbatim.
//!
//! For every dimension the plural (list) form takes precedence over the
//! singular form as soon as it is *present*, even when the list is empty. An
//! empty list therefore renders as `field in ()` and suppresses the singular
//! value; the remote service decides what to make of it.
//!
//! Values containing a space or a parenthesis are wrapped in double quotes,
//! for singular values and list elements alike. Everything else is emitted
//! unquoted. Inside a quoted value, embedded `"` and `\` are backslash-escaped
//! so the literal stays well-formed; unquoted values and the custom clause are
//! never escaped.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Joins consecutive clauses.
const AND: &str = " AND ";

/// One filterable attribute of a Jira issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
  Project,
  Status,
  Labels,
  Sprint,
  FixVersion,
}

impl Dimension {
  /// All dimensions in emission order
  pub const ALL: [Dimension; 5] = [
    Dimension::Project,
    Dimension::Status,
    Dimension::Labels,
    Dimension::Sprint,
    Dimension::FixVersion,
  ];

  /// JQL field name used when no override is configured
  pub fn default_field(self) -> &'static str {
    DEFAULT_FIELD_NAMES
      .iter()
      .find_map(|(dimension, field)| (*dimension == self).then_some(*field))
      .unwrap_or_default()
  }

  /// Name of the singular option (e.g. `status`)
  pub const fn singular_option(self) -> &'static str {
    match self {
      Dimension::Project => "project",
      Dimension::Status => "status",
      Dimension::Labels => "label",
      Dimension::Sprint => "sprint",
      Dimension::FixVersion => "fix-version",
    }
  }

  /// Name of the plural option (e.g. `statuses`)
  pub const fn plural_option(self) -> &'static str {
    match self {
      Dimension::Project => "projects",
      Dimension::Status => "statuses",
      Dimension::Labels => "labels",
      Dimension::Sprint => "sprints",
      Dimension::FixVersion => "fix-versions",
    }
  }
}

/// Dimension to JQL field mapping.
///
/// Some Jira schemas expose the sprint field as `Sprint`; override it through
/// [`FieldNames`] rather than editing this table.
pub const DEFAULT_FIELD_NAMES: [(Dimension, &str); 5] = [
  (Dimension::Project, "project"),
  (Dimension::Status, "status"),
  (Dimension::Labels, "labels"),
  (Dimension::Sprint, "sprint"),
  (Dimension::FixVersion, "fixversion"),
];

/// Per-builder JQL field names, defaulting to [`DEFAULT_FIELD_NAMES`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
  pub project: String,
  pub status: String,
  pub labels: String,
  pub sprint: String,
  pub fix_version: String,
}

impl Default for FieldNames {
  fn default() -> Self {
    Self {
      project: Dimension::Project.default_field().to_string(),
      status: Dimension::Status.default_field().to_string(),
      labels: Dimension::Labels.default_field().to_string(),
      sprint: Dimension::Sprint.default_field().to_string(),
      fix_version: Dimension::FixVersion.default_field().to_string(),
    }
  }
}

impl FieldNames {
  /// Field name for a dimension
  pub fn get(&self, dimension: Dimension) -> &str {
    match dimension {
      Dimension::Project => &self.project,
      Dimension::Status => &self.status,
      Dimension::Labels => &self.labels,
      Dimension::Sprint => &self.sprint,
      Dimension::FixVersion => &self.fix_version,
    }
  }
}

/// Resolved value source of one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue<'a> {
  Absent,
  Single(&'a str),
  Many(&'a [String]),
}

/// Filter inputs for a ticket search.
///
/// Each dimension has a plural and a singular form; see the module docs for
/// how they interact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
  pub projects: Option<Vec<String>>,
  pub project: Option<String>,
  pub statuses: Option<Vec<String>>,
  pub status: Option<String>,
  pub labels: Option<Vec<String>>,
  pub label: Option<String>,
  pub sprints: Option<Vec<String>>,
  pub sprint: Option<String>,
  pub fix_versions: Option<Vec<String>>,
  pub fix_version: Option<String>,
  /// Raw JQL appended after all other clauses, without any escaping
  pub custom_jql: Option<String>,
}

impl FilterSpec {
  fn forms(&self, dimension: Dimension) -> (Option<&Vec<String>>, Option<&String>) {
    match dimension {
      Dimension::Project => (self.projects.as_ref(), self.project.as_ref()),
      Dimension::Status => (self.statuses.as_ref(), self.status.as_ref()),
      Dimension::Labels => (self.labels.as_ref(), self.label.as_ref()),
      Dimension::Sprint => (self.sprints.as_ref(), self.sprint.as_ref()),
      Dimension::FixVersion => (self.fix_versions.as_ref(), self.fix_version.as_ref()),
    }
  }

  fn forms_mut(&mut self, dimension: Dimension) -> (&mut Option<Vec<String>>, &mut Option<String>) {
    match dimension {
      Dimension::Project => (&mut self.projects, &mut self.project),
      Dimension::Status => (&mut self.statuses, &mut self.status),
      Dimension::Labels => (&mut self.labels, &mut self.label),
      Dimension::Sprint => (&mut self.sprints, &mut self.sprint),
      Dimension::FixVersion => (&mut self.fix_versions, &mut self.fix_version),
    }
  }

  /// Resolve the value source of a dimension. A present list wins over the
  /// singular value, even when the list is empty.
  pub fn value(&self, dimension: Dimension) -> FilterValue<'_> {
    match self.forms(dimension) {
      (Some(values), _) => FilterValue::Many(values),
      (None, Some(value)) => FilterValue::Single(value),
      (None, None) => FilterValue::Absent,
    }
  }

  /// Dimensions where a singular value is set but shadowed by the list form
  pub fn shadowed_singulars(&self) -> Vec<Dimension> {
    Dimension::ALL
      .into_iter()
      .filter(|dimension| matches!(self.forms(*dimension), (Some(_), Some(_))))
      .collect()
  }

  /// Layer `self` over `base`.
  ///
  /// A dimension set in `self` (in either form) replaces both forms of that
  /// dimension in `base`, so a singular value never merges with a list
  /// inherited from elsewhere.
  pub fn layered_over(mut self, mut base: FilterSpec) -> FilterSpec {
    for dimension in Dimension::ALL {
      let (many, one) = self.forms_mut(dimension);
      if many.is_none() && one.is_none() {
        let (base_many, base_one) = base.forms_mut(dimension);
        *many = base_many.take();
        *one = base_one.take();
      }
    }
    if self.custom_jql.is_none() {
      self.custom_jql = base.custom_jql.take();
    }
    self
  }

  /// Whether no dimension and no custom clause is set
  pub fn is_empty(&self) -> bool {
    self.custom_jql.is_none()
      && Dimension::ALL
        .into_iter()
        .all(|dimension| self.value(dimension) == FilterValue::Absent)
  }
}

/// One boolean condition of the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause<'a> {
  /// `field = value`
  Equals { field: &'a str, value: &'a str },
  /// `field in (v1, v2, ...)`
  In { field: &'a str, values: &'a [String] },
}

impl fmt::Display for Clause<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Clause::Equals { field, value } => write!(f, "{field} = {}", format_value(value)),
      Clause::In { field, values } => {
        let values: Vec<Cow<'_, str>> = values.iter().map(|value| format_value(value)).collect();
        write!(f, "{field} in ({})", values.join(", "))
      }
    }
  }
}

/// Whether a value must be wrapped in double quotes: it contains a space or a
/// parenthesis.
pub fn needs_quoting(value: &str) -> bool {
  value.contains([' ', '(', ')'])
}

/// Format one value for use inside a clause.
///
/// Quoted values get embedded `"` and `\` backslash-escaped.
pub fn format_value(value: &str) -> Cow<'_, str> {
  if !needs_quoting(value) {
    return Cow::Borrowed(value);
  }

  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for ch in value.chars() {
    if matches!(ch, '"' | '\\') {
      quoted.push('\\');
    }
    quoted.push(ch);
  }
  quoted.push('"');
  Cow::Owned(quoted)
}

/// Assembles JQL from filter inputs
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
  fields: FieldNames,
}

impl QueryBuilder {
  /// Create a builder with custom field names
  pub fn new(fields: FieldNames) -> Self {
    Self { fields }
  }

  /// The clauses produced for `spec`, in emission order, excluding the custom
  /// clause
  pub fn clauses<'a>(&'a self, spec: &'a FilterSpec) -> Vec<Clause<'a>> {
    Dimension::ALL
      .into_iter()
      .filter_map(|dimension| {
        let field = self.fields.get(dimension);
        match spec.value(dimension) {
          FilterValue::Many(values) => Some(Clause::In { field, values }),
          FilterValue::Single(value) => Some(Clause::Equals { field, value }),
          FilterValue::Absent => None,
        }
      })
      .collect()
  }

  /// Build the full query string. Never fails; an empty spec yields an empty
  /// string.
  pub fn build(&self, spec: &FilterSpec) -> String {
    let mut jql = String::new();
    for clause in self.clauses(spec) {
      append_clause(&mut jql, &clause.to_string());
    }
    if let Some(custom) = &spec.custom_jql {
      append_clause(&mut jql, custom);
    }
    jql
  }
}

/// Build a query with the default field names
pub fn build_jql(spec: &FilterSpec) -> String {
  QueryBuilder::default().build(spec)
}

fn append_clause(jql: &mut String, clause: &str) {
  if !jql.is_empty() {
    jql.push_str(AND);
  }
  jql.push_str(clause);
}

#[cfg(test)]
mod tests {
  use insta::assert_snapshot;

  use super::*;

  fn list(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
  }

  fn one(value: &str) -> Option<String> {
    Some(value.to_string())
  }

  #[test]
  fn test_empty_spec_builds_empty_query() {
    assert_eq!(build_jql(&FilterSpec::default()), "");
    assert!(FilterSpec::default().is_empty());
  }

  #[test]
  fn test_all_singular_values_with_custom_clause() {
    let spec = FilterSpec {
      project: one("my_project"),
      status: one("my_status"),
      label: one("my_label"),
      sprint: one("my_sprint"),
      custom_jql: one("my_custom_jql"),
      ..Default::default()
    };

    assert_snapshot!(
      build_jql(&spec),
      @"project = my_project AND status = my_status AND labels = my_label AND sprint = my_sprint AND my_custom_jql"
    );
  }

  #[test]
  fn test_all_list_values() {
    let spec = FilterSpec {
      projects: list(&["project_one", "project_two"]),
      statuses: list(&["status_one", "status_two"]),
      ..Default::default()
    };

    assert_snapshot!(
      build_jql(&spec),
      @"project in (project_one, project_two) AND status in (status_one, status_two)"
    );
  }

  #[test]
  fn test_every_dimension_as_list_with_custom() {
    let spec = FilterSpec {
      projects: list(&["project_one", "project_two"]),
      statuses: list(&["status_one", "status_two"]),
      labels: list(&["label_one", "label_two"]),
      sprints: list(&["sprint_one", "sprint_two"]),
      fix_versions: list(&["1.0", "1.1"]),
      custom_jql: one("my_custom_jql"),
      ..Default::default()
    };

    assert_snapshot!(
      build_jql(&spec),
      @"project in (project_one, project_two) AND status in (status_one, status_two) AND labels in (label_one, label_two) AND sprint in (sprint_one, sprint_two) AND fixversion in (1.0, 1.1) AND my_custom_jql"
    );
  }

  #[test]
  fn test_single_dimension_scalar_for_each_field() {
    let cases = [
      (
        FilterSpec {
          project: one("APP"),
          ..Default::default()
        },
        "project = APP",
      ),
      (
        FilterSpec {
          status: one("Done"),
          ..Default::default()
        },
        "status = Done",
      ),
      (
        FilterSpec {
          label: one("backend"),
          ..Default::default()
        },
        "labels = backend",
      ),
      (
        FilterSpec {
          sprint: one("42"),
          ..Default::default()
        },
        "sprint = 42",
      ),
      (
        FilterSpec {
          fix_version: one("2.3.0"),
          ..Default::default()
        },
        "fixversion = 2.3.0",
      ),
    ];

    for (spec, expected) in cases {
      assert_eq!(build_jql(&spec), expected);
    }
  }

  #[test]
  fn test_single_dimension_list_preserves_order() {
    let spec = FilterSpec {
      labels: list(&["zeta", "alpha", "mid"]),
      ..Default::default()
    };

    assert_eq!(build_jql(&spec), "labels in (zeta, alpha, mid)");
  }

  #[test]
  fn test_plural_overrides_singular() {
    let spec = FilterSpec {
      projects: list(&["ONE"]),
      project: one("IGNORED"),
      statuses: list(&["Open", "Done"]),
      status: one("Also Ignored"),
      ..Default::default()
    };

    assert_eq!(build_jql(&spec), "project in (ONE) AND status in (Open, Done)");
    assert_eq!(spec.shadowed_singulars(), vec![Dimension::Project, Dimension::Status]);
  }

  #[test]
  fn test_empty_list_suppresses_singular() {
    let spec = FilterSpec {
      sprints: Some(vec![]),
      sprint: one("fallback"),
      ..Default::default()
    };

    assert_eq!(build_jql(&spec), "sprint in ()");
  }

  #[test]
  fn test_quotes_values_with_spaces_or_parentheses() {
    let spec = FilterSpec {
      status: one("In Progress"),
      labels: list(&["plain", "needs (review)", "two words"]),
      fix_version: one("v1(beta)"),
      ..Default::default()
    };

    assert_snapshot!(
      build_jql(&spec),
      @r#"status = "In Progress" AND labels in (plain, "needs (review)", "two words") AND fixversion = "v1(beta)""#
    );
  }

  #[test]
  fn test_quoted_values_escape_embedded_quotes() {
    assert_eq!(format_value(r#"say "hi" now"#), r#""say \"hi\" now""#);
    assert_eq!(format_value(r"back\slash here"), r#""back\\slash here""#);
    assert_eq!(format_value(r#"no"space"#), r#"no"space"#);
  }

  #[test]
  fn test_needs_quoting() {
    assert!(needs_quoting("In Progress"));
    assert!(needs_quoting("(x"));
    assert!(needs_quoting("x)"));
    assert!(!needs_quoting("PROJ-1"));
    assert!(!needs_quoting(""));
    assert!(!needs_quoting("tab\tseparated"));
  }

  #[test]
  fn test_custom_clause_only_is_verbatim() {
    let spec = FilterSpec {
      custom_jql: one("assignee = currentUser() ORDER BY created DESC"),
      ..Default::default()
    };

    assert_eq!(build_jql(&spec), "assignee = currentUser() ORDER BY created DESC");
  }

  #[test]
  fn test_custom_clause_is_not_escaped() {
    let spec = FilterSpec {
      project: one("APP"),
      custom_jql: one("summary ~ \"crash (android)\""),
      ..Default::default()
    };

    assert_eq!(build_jql(&spec), "project = APP AND summary ~ \"crash (android)\"");
  }

  #[test]
  fn test_empty_custom_clause_is_present() {
    let alone = FilterSpec {
      custom_jql: one(""),
      ..Default::default()
    };
    assert_eq!(build_jql(&alone), "");
    assert!(!alone.is_empty());

    let after_project = FilterSpec {
      project: one("APP"),
      custom_jql: one(""),
      ..Default::default()
    };
    assert_eq!(build_jql(&after_project), "project = APP AND ");
  }

  #[test]
  fn test_joining_has_no_leading_or_trailing_operator() {
    let spec = FilterSpec {
      status: one("Open"),
      fix_version: one("1.0"),
      ..Default::default()
    };

    let jql = build_jql(&spec);
    assert_eq!(jql, "status = Open AND fixversion = 1.0");
    assert!(!jql.starts_with(" AND"));
    assert!(!jql.ends_with("AND "));
  }

  #[test]
  fn test_custom_field_names() {
    let builder = QueryBuilder::new(FieldNames {
      sprint: "Sprint".to_string(),
      ..Default::default()
    });
    let spec = FilterSpec {
      sprints: list(&["S1", "S2"]),
      ..Default::default()
    };

    assert_eq!(builder.build(&spec), "Sprint in (S1, S2)");
  }

  #[test]
  fn test_default_field_table() {
    let fields: Vec<&str> = Dimension::ALL.iter().map(|d| d.default_field()).collect();
    assert_eq!(fields, vec!["project", "status", "labels", "sprint", "fixversion"]);
    assert_eq!(FieldNames::default().get(Dimension::FixVersion), "fixversion");
  }

  #[test]
  fn test_clauses_in_fixed_order() {
    let spec = FilterSpec {
      fix_version: one("1.0"),
      project: one("APP"),
      label: one("ui"),
      ..Default::default()
    };

    let builder = QueryBuilder::default();
    let clauses = builder.clauses(&spec);
    assert_eq!(
      clauses,
      vec![
        Clause::Equals {
          field: "project",
          value: "APP"
        },
        Clause::Equals {
          field: "labels",
          value: "ui"
        },
        Clause::Equals {
          field: "fixversion",
          value: "1.0"
        },
      ]
    );
  }

  #[test]
  fn test_layered_over_replaces_whole_dimension() {
    let base = FilterSpec {
      statuses: list(&["Open", "Done"]),
      project: one("BASE"),
      custom_jql: one("base_custom"),
      ..Default::default()
    };
    let top = FilterSpec {
      status: one("Blocked"),
      ..Default::default()
    };

    let merged = top.layered_over(base);
    assert_eq!(merged.statuses, None);
    assert_eq!(merged.status.as_deref(), Some("Blocked"));
    assert_eq!(merged.project.as_deref(), Some("BASE"));
    assert_eq!(merged.custom_jql.as_deref(), Some("base_custom"));
    assert_eq!(build_jql(&merged), "project = BASE AND status = Blocked AND base_custom");
  }

  #[test]
  fn test_filter_spec_deserializes_with_missing_fields() {
    let spec: FilterSpec = serde_json::from_value(serde_json::json!({
      "projects": ["A", "B"],
      "status": "Open",
    }))
    .unwrap();

    assert_eq!(
      spec.value(Dimension::Project),
      FilterValue::Many(&["A".to_string(), "B".to_string()])
    );
    assert_eq!(spec.value(Dimension::Status), FilterValue::Single("Open"));
    assert_eq!(spec.value(Dimension::Sprint), FilterValue::Absent);
  }
}
