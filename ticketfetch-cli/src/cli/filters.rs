//! # Filter Options
//!
//! Filter flags shared by `fetch` and `jql`, with their environment variable
//! fallbacks.

use clap::Args;
use ticketfetch_core::consts::{
  ENV_JQL_CUSTOM, ENV_JQL_FIX_VERSION, ENV_JQL_FIX_VERSIONS, ENV_JQL_LABEL, ENV_JQL_LABELS, ENV_JQL_PROJECT,
  ENV_JQL_PROJECTS, ENV_JQL_SPRINT, ENV_JQL_SPRINTS, ENV_JQL_STATUS, ENV_JQL_STATUSES,
};
use ticketfetch_core::print_info;
use ticketfetch_jira::FilterSpec;

use crate::config::FileConfig;

/// Project, status, label, sprint and fix-version filters
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
  /// Projects to match (comma-separated)
  #[arg(long, env = ENV_JQL_PROJECTS, value_delimiter = ',', num_args = 0.., value_name = "PROJECTS")]
  pub projects: Option<Vec<String>>,

  /// Single project to match, ignored when --projects is given
  #[arg(long, env = ENV_JQL_PROJECT)]
  pub project: Option<String>,

  /// Statuses to match (comma-separated)
  #[arg(long, env = ENV_JQL_STATUSES, value_delimiter = ',', num_args = 0.., value_name = "STATUSES")]
  pub statuses: Option<Vec<String>>,

  /// Single status to match, ignored when --statuses is given
  #[arg(long, env = ENV_JQL_STATUS)]
  pub status: Option<String>,

  /// Labels to match (comma-separated)
  #[arg(long, env = ENV_JQL_LABELS, value_delimiter = ',', num_args = 0.., value_name = "LABELS")]
  pub labels: Option<Vec<String>>,

  /// Single label to match, ignored when --labels is given
  #[arg(long, env = ENV_JQL_LABEL)]
  pub label: Option<String>,

  /// Sprints to match (comma-separated)
  #[arg(long, env = ENV_JQL_SPRINTS, value_delimiter = ',', num_args = 0.., value_name = "SPRINTS")]
  pub sprints: Option<Vec<String>>,

  /// Single sprint to match, ignored when --sprints is given
  #[arg(long, env = ENV_JQL_SPRINT)]
  pub sprint: Option<String>,

  /// Fix versions to match (comma-separated)
  #[arg(long, env = ENV_JQL_FIX_VERSIONS, value_delimiter = ',', num_args = 0.., value_name = "FIX_VERSIONS")]
  pub fix_versions: Option<Vec<String>>,

  /// Single fix version to match, ignored when --fix-versions is given
  #[arg(long, env = ENV_JQL_FIX_VERSION)]
  pub fix_version: Option<String>,

  /// Raw JQL appended after all other clauses, unescaped
  #[arg(long, env = ENV_JQL_CUSTOM, value_name = "JQL")]
  pub custom_jql: Option<String>,
}

impl FilterArgs {
  /// Convert the parsed options into a [`FilterSpec`].
  ///
  /// Empty scalars count as absent. Lists keep their presence even when every
  /// element is blank, so `--statuses ""` still shadows `--status`.
  pub fn to_spec(&self) -> FilterSpec {
    FilterSpec {
      projects: list(&self.projects),
      project: scalar(&self.project),
      statuses: list(&self.statuses),
      status: scalar(&self.status),
      labels: list(&self.labels),
      label: scalar(&self.label),
      sprints: list(&self.sprints),
      sprint: scalar(&self.sprint),
      fix_versions: list(&self.fix_versions),
      fix_version: scalar(&self.fix_version),
      custom_jql: scalar(&self.custom_jql),
    }
  }
}

fn list(values: &Option<Vec<String>>) -> Option<Vec<String>> {
  values.as_ref().map(|values| {
    values
      .iter()
      .map(|value| value.trim())
      .filter(|value| !value.is_empty())
      .map(str::to_string)
      .collect()
  })
}

fn scalar(value: &Option<String>) -> Option<String> {
  value.as_ref().filter(|value| !value.is_empty()).cloned()
}

/// Layer the command-line filters over the config file.
///
/// Prints an info line for every singular option shadowed by its list form.
pub fn resolve_filters(args: &FilterArgs, file_config: &FileConfig) -> FilterSpec {
  let filters = args.to_spec().layered_over(file_config.filters.clone());

  for dimension in filters.shadowed_singulars() {
    print_info(&format!(
      "Ignoring --{} in favor of --{}",
      dimension.singular_option(),
      dimension.plural_option()
    ));
  }

  filters
}
