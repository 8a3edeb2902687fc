//! # ticketfetch Core Library
//!
//! Shared building blocks for the ticketfetch crates: configuration directory
//! handling, Jira site URL normalization, `.netrc` credential fallback and
//! terminal output helpers.

pub mod config;
pub mod consts;
pub mod creds;
pub mod output;
pub mod url;

// Re-export main types
pub use config::{ConfigDirs, get_config_dirs};
pub use creds::{Credentials, lookup_jira_credentials};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use url::{normalize_site_url, site_host};
