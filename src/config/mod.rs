//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, ports, report naming)
//! - CLI option types and parsing, with the usage-error exit policy
//! - Resolver settings derived from the CLI

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use cli::{parse_cli, CliExit, USAGE};
pub use types::{Config, LogFormat, LogLevel, ResolverSettings, Transport};
