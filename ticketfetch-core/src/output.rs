//! # Output Formatting
//!
//! Colored, emoji-prefixed status lines for user-facing messages. Status lines
//! go to stderr so that stdout carries only command results (JSON, tables,
//! queries) and stays pipeable.

use owo_colors::{OwoColorize, Stream, Style};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the process-wide color override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave owo-colors to detect the terminal itself
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  eprintln!(
    "{} {}",
    check.if_supports_color(Stream::Stderr, |t| t.style(Style::new().green().bold())),
    message
  );
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!(
    "{} {}",
    cross.if_supports_color(Stream::Stderr, |t| t.style(Style::new().red().bold())),
    message
  );
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  eprintln!(
    "{} {}",
    warning.if_supports_color(Stream::Stderr, |t| t.style(Style::new().yellow().bold())),
    message
  );
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  eprintln!(
    "{} {}",
    info.if_supports_color(Stream::Stderr, |t| t.style(Style::new().blue().bold())),
    message
  );
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.purple().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    let result = get_emoji_or_default("check_mark", "✓");
    assert!(!result.is_empty());

    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_format_command_keeps_text() {
    assert!(format_command("ticketfetch jql").contains("ticketfetch jql"));
  }
}
