//! # Config Command
//!
//! Shows or initializes the configuration file.

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use ticketfetch_core::output::format_command;
use ticketfetch_core::{print_info, print_success, print_warning};

use crate::config::{CONFIG_TEMPLATE, load_file_config};

/// Arguments for the config command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
  /// Print the config file location and its resolved contents
  #[arg(long, conflicts_with = "init")]
  pub show: bool,

  /// Write a commented template if no config file exists yet
  #[arg(long)]
  pub init: bool,
}

/// Handle the config command
pub fn handle_config_command(args: ConfigArgs) -> Result<()> {
  let (dirs, file_config) = load_file_config()?;
  let path = dirs.config_path();

  if args.init {
    if dirs.init(CONFIG_TEMPLATE)? {
      print_success(&format!("Created config file at {}", path.display()));
    } else {
      print_warning(&format!("Config file already exists at {}", path.display()));
    }
    return Ok(());
  }

  if args.show {
    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
      print_info(&format!(
        "No config file yet. Run {} to create one.",
        format_command("ticketfetch config --init")
      ));
    }
    println!();
    print!("{}", file_config.to_toml()?);
  }

  Ok(())
}
