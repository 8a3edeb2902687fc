//! # ticketfetch CLI
//!
//! Command definitions and handlers for the `ticketfetch` binary.

pub mod cli;
pub mod config;
