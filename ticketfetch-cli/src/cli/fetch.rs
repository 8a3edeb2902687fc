//! # Fetch Command
//!
//! Resolves connection settings and filters, runs the search and prints the
//! fetched tickets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use ticketfetch_core::consts::{ENV_JIRA_PASSWORD, ENV_JIRA_SITE, ENV_JIRA_USERNAME};
use ticketfetch_core::{print_success, print_warning};
use ticketfetch_jira::{FetchContext, FetchCredentials, FetchRequest, IssueRecord, create_jira_runtime, fetch_tickets};
use tracing::debug;

use super::filters::{FilterArgs, resolve_filters};
use crate::config::{FileConfig, home_dir, load_file_config, resolve_credentials};

/// How fetched tickets are printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
  /// JSON array of `{ "key", "issue" }` records
  #[default]
  Json,
  /// Key, summary and status table
  Table,
}

/// Jira site and login
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
  /// Jira site URL (e.g. https://company.atlassian.net)
  #[arg(long, env = ENV_JIRA_SITE)]
  pub url: Option<String>,

  /// Jira username
  #[arg(long, env = ENV_JIRA_USERNAME)]
  pub username: Option<String>,

  /// Jira password or API token
  #[arg(long, env = ENV_JIRA_PASSWORD, hide_env_values = true)]
  pub password: Option<String>,
}

impl ConnectionArgs {
  fn to_credentials(&self) -> FetchCredentials {
    FetchCredentials {
      url: self.url.clone(),
      username: self.username.clone(),
      password: self.password.clone(),
    }
  }
}

/// Arguments for the fetch command
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
  #[command(flatten)]
  pub connection: ConnectionArgs,

  #[command(flatten)]
  pub filters: FilterArgs,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
  pub format: OutputFormat,

  /// Also write the result as { "JIRA_FETCH_TICKETS_RESULT": [...] } to this file
  #[arg(long, value_name = "PATH")]
  pub publish: Option<PathBuf>,
}

/// Handle the fetch command
pub fn handle_fetch_command(args: FetchArgs) -> Result<()> {
  let (_, file_config) = load_file_config()?;
  let request = build_request(&args, &file_config, home_dir().as_deref())?;

  let runtime = create_jira_runtime()?;
  let mut ctx = FetchContext::new();
  let tickets = runtime.block_on(fetch_tickets(&request, &mut ctx))?;

  match args.format {
    OutputFormat::Json => println!("{}", render_json(&tickets)?),
    OutputFormat::Table => print_table(&tickets),
  }

  if let Some(path) = &args.publish {
    publish(&ctx, path)?;
  }

  print_success(&format!("Successfully fetched {} Jira tickets!", tickets.len()));
  Ok(())
}

/// Merge flags, config file and `.netrc` into a fetch request
fn build_request(args: &FetchArgs, file_config: &FileConfig, home: Option<&Path>) -> Result<FetchRequest> {
  let credentials = resolve_credentials(args.connection.to_credentials(), &file_config.jira, home)?;
  let filters = resolve_filters(&args.filters, file_config);

  Ok(FetchRequest {
    credentials,
    filters,
    fields: file_config.fields.clone(),
  })
}

fn render_json(tickets: &[IssueRecord]) -> Result<String> {
  serde_json::to_string_pretty(tickets).context("Failed to serialize tickets")
}

#[derive(Tabled)]
struct TicketRow {
  #[tabled(rename = "Key")]
  key: String,
  #[tabled(rename = "Summary")]
  summary: String,
  #[tabled(rename = "Status")]
  status: String,
}

fn print_table(tickets: &[IssueRecord]) {
  if tickets.is_empty() {
    print_warning("No tickets matched the query.");
    return;
  }

  let rows = tickets.iter().map(|ticket| TicketRow {
    key: ticket.key.clone(),
    summary: ticket.summary().unwrap_or_default().to_string(),
    status: ticket.status().unwrap_or("-").to_string(),
  });

  println!("{}", Table::new(rows).with(Style::sharp()));
}

fn publish(ctx: &FetchContext, path: &Path) -> Result<()> {
  let content = serde_json::to_string_pretty(&ctx.to_json()).context("Failed to serialize fetch result")?;
  fs::write(path, content).with_context(|| format!("Failed to write fetch result to {}", path.display()))?;
  debug!("Published fetch result to {}", path.display());
  Ok(())
}
