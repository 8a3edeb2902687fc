//! Test utilities shared across the ticketfetch workspace
//!
//! - environment variable isolation ([`EnvVarGuard`], [`EnvTestGuard`])
//! - throwaway `.netrc` homes ([`NetrcGuard`])
//!
//! The dead_code lint is disabled for this crate because not every test uses
//! every helper, and usage across dev-dependency boundaries is invisible to
//! the compiler.

#![allow(dead_code)]

pub mod env;
pub mod netrc;

// Re-export commonly used items
pub use env::{EnvTestGuard, EnvVarGuard};
pub use netrc::NetrcGuard;
