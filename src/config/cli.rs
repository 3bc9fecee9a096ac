//! Command-line parsing with the process exit policy applied.

use std::ffi::OsString;

use structopt::clap::ErrorKind;
use structopt::StructOpt;

use super::types::Config;

/// One-line usage summary.
pub const USAGE: &str = "Usage: dnsexpose [OPTIONS] <DOMAIN>";

/// Parsing stopped the program: print `message` to standard output and exit with `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliExit {
    /// Process exit status
    pub code: i32,
    /// Text for standard output
    pub message: String,
}

/// Parses and validates the command line.
///
/// `--help` and `--version` exit 0. A wrong number of positional arguments,
/// an unknown flag or an invalid value is a usage error with exit status 1.
pub fn parse_cli<I, T>(args: I) -> Result<Config, CliExit>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config = Config::from_iter_safe(args).map_err(|e| match e.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => CliExit {
            code: 0,
            message: e.message,
        },
        _ => CliExit {
            code: 1,
            message: e.message,
        },
    })?;

    config.validate().map_err(|e| CliExit {
        code: 1,
        message: format!("error: {e}\n\n{USAGE}"),
    })?;

    Ok(config)
}
