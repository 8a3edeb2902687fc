//! Core constants shared across ticketfetch components.

/// Environment variable for the Jira site URL.
pub const ENV_JIRA_SITE: &str = "FL_JIRA_SITE";

/// Environment variable for the Jira username.
pub const ENV_JIRA_USERNAME: &str = "FL_JIRA_USERNAME";

/// Environment variable for the Jira password or API token.
pub const ENV_JIRA_PASSWORD: &str = "FL_JIRA_PASSWORD";

pub const ENV_JQL_PROJECTS: &str = "FL_JIRA_FETCH_JQL_PROJECTS";
pub const ENV_JQL_PROJECT: &str = "FL_JIRA_FETCH_JQL_PROJECT";
pub const ENV_JQL_STATUSES: &str = "FL_JIRA_FETCH_JQL_STATUSES";
pub const ENV_JQL_STATUS: &str = "FL_JIRA_FETCH_JQL_STATUS";
pub const ENV_JQL_LABELS: &str = "FL_JIRA_FETCH_JQL_LABELS";
pub const ENV_JQL_LABEL: &str = "FL_JIRA_FETCH_JQL_LABEL";
pub const ENV_JQL_SPRINTS: &str = "FL_JIRA_FETCH_JQL_SPRINTS";
pub const ENV_JQL_SPRINT: &str = "FL_JIRA_FETCH_JQL_SPRINT";
pub const ENV_JQL_FIX_VERSIONS: &str = "FL_JIRA_FETCH_JQL_FIX_VERSIONS";
pub const ENV_JQL_FIX_VERSION: &str = "FL_JIRA_FETCH_JQL_FIX_VERSION";
pub const ENV_JQL_CUSTOM: &str = "FL_JIRA_FETCH_JQL_CUSTOM";

/// File name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Fallback `.netrc` machine used when no entry matches the Jira host.
pub const NETRC_FALLBACK_MACHINE: &str = "atlassian.net";
