//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dnsexpose` library that handles:
//! - Command-line argument parsing and the usage-error exit policy
//! - Logger initialization
//! - Mapping fatal errors to a non-zero exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use std::process;

use dnsexpose::initialization::init_logger_with;
use dnsexpose::{parse_cli, run_scan};

#[tokio::main]
async fn main() -> Result<()> {
    // Usage errors exit before any network activity
    let config = match parse_cli(std::env::args_os()) {
        Ok(config) => config,
        Err(exit) => {
            println!("{}", exit.message);
            process::exit(exit.code);
        }
    };

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run_scan(config).await {
        eprintln!("dnsexpose error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
