//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the command handlers.

mod config;
mod fetch;
pub mod filters;
mod jql;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use ticketfetch_core::ColorMode;

/// Top-level CLI command for ticketfetch
#[derive(Parser)]
#[command(name = "ticketfetch")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Fetch Jira tickets matching project, status, label, sprint and fix-version filters")]
#[command(
  long_about = "ticketfetch builds a JQL query from filter options and fetches the matching\n\
        Jira tickets in a single search request.\n\n\
        Every option can also be given through an FL_JIRA_* environment variable or\n\
        the config file. Credentials fall back to ~/.netrc."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages, including the JQL query\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for ticketfetch
#[derive(Subcommand)]
pub enum Commands {
  /// Fetch tickets matching the filters
  #[command(long_about = "Assemble the JQL query and fetch the matching tickets from Jira.\n\n\
            The site URL, username and API token are required. They are read from\n\
            the options below, FL_JIRA_SITE / FL_JIRA_USERNAME / FL_JIRA_PASSWORD,\n\
            the [jira] section of the config file and finally ~/.netrc.")]
  Fetch(fetch::FetchArgs),

  /// Print the JQL query without contacting Jira
  #[command(long_about = "Print the JQL query the fetch command would send.\n\n\
            No credentials are needed and no request is made.")]
  Jql(jql::JqlArgs),

  /// Show or initialize the configuration file
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Fetch(args) => fetch::handle_fetch_command(args),
    Commands::Jql(args) => jql::handle_jql_command(args),
    Commands::Config(args) => config::handle_config_command(args),
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_verbose_is_global() {
    let cli = Cli::try_parse_from(["ticketfetch", "jql", "-vv"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Commands::Jql(_)));
  }
}
