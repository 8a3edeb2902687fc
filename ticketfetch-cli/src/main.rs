//! # ticketfetch CLI Entry Point
//!
//! Fetches Jira tickets matching a JQL query assembled from filter flags,
//! environment variables and the config file.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use ticketfetch_cli::cli::{Cli, handle_cli};
use ticketfetch_core::print_error;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
  let cmd = Cli::parse();

  let level = match cmd.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  // Logs go to stderr; stdout is reserved for command output
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  match handle_cli(cmd) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
