//! # JQL Command
//!
//! Prints the assembled query without contacting Jira.

use anyhow::Result;
use clap::Args;
use ticketfetch_jira::QueryBuilder;

use super::filters::{FilterArgs, resolve_filters};
use crate::config::load_file_config;

/// Arguments for the jql command
#[derive(Args, Debug, Clone)]
pub struct JqlArgs {
  #[command(flatten)]
  pub filters: FilterArgs,
}

/// Handle the jql command
pub fn handle_jql_command(args: JqlArgs) -> Result<()> {
  let (_, file_config) = load_file_config()?;
  let filters = resolve_filters(&args.filters, &file_config);

  println!("{}", QueryBuilder::new(file_config.fields).build(&filters));
  Ok(())
}
