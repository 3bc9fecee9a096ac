//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use strum_macros::{Display as StrumDisplay, EnumString};
use structopt::StructOpt;

use crate::config::constants::AXFR_TIMEOUT_SECS;
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Transport used by the resolver for ordinary record queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    /// UDP with TCP fallback on truncation
    Udp,
    /// TCP only
    Tcp,
}

/// Resolver configuration handed to resolver initialization.
///
/// An empty `nameservers` list means "use the system configuration".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Explicit upstream servers (port 53)
    pub nameservers: Vec<IpAddr>,
    /// Per-query timeout; `None` keeps the resolver default
    pub timeout: Option<Duration>,
    /// Query transport
    pub transport: Transport,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            timeout: None,
            transport: Transport::Udp,
        }
    }
}

/// Scan configuration, parsed from the command line.
///
/// Can also be built programmatically starting from `Default`:
///
/// ```no_run
/// use dnsexpose::Config;
///
/// let config = Config {
///     domain: "example.com".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "dnsexpose",
    about = "DNS recon: record enumeration, AXFR probing, DNSSEC and TXT cross-checks"
)]
pub struct Config {
    /// Target domain to scan
    #[structopt(name = "DOMAIN")]
    pub domain: String,

    /// Log level: error, warn, info, debug or trace (overrides RUST_LOG)
    #[structopt(long, default_value = "warn")]
    pub log_level: LogLevel,

    /// Log format: plain or json
    #[structopt(long, default_value = "plain")]
    pub log_format: LogFormat,

    /// Upstream resolver to query instead of the system configuration (repeatable)
    #[structopt(short = "n", long = "nameserver", number_of_values = 1)]
    pub nameservers: Vec<IpAddr>,

    /// Send resolver queries over TCP only
    #[structopt(long)]
    pub tcp: bool,

    /// Resolver query timeout in seconds
    #[structopt(long = "dns-timeout")]
    pub dns_timeout_secs: Option<u64>,

    /// Per-server zone transfer timeout in seconds
    #[structopt(long = "axfr-timeout", default_value = "5")]
    pub axfr_timeout_secs: u64,

    /// Directory the JSON report is written to
    #[structopt(short = "o", long, parse(from_os_str), default_value = ".")]
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            nameservers: Vec::new(),
            tcp: false,
            dns_timeout_secs: None,
            axfr_timeout_secs: AXFR_TIMEOUT_SECS,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Domain with surrounding whitespace and a single trailing root dot removed.
    pub fn normalized_domain(&self) -> String {
        let trimmed = self.domain.trim();
        trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
    }

    /// Checks values that the argument parser cannot express.
    ///
    /// The domain ends up in the report file name, so anything that would
    /// escape the output directory is rejected here.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let domain = self.normalized_domain();
        if domain.is_empty() {
            return Err(ConfigValidationError::new(
                "domain",
                "domain must not be empty",
            ));
        }
        if domain.chars().any(char::is_whitespace) {
            return Err(ConfigValidationError::new(
                "domain",
                format!("domain '{domain}' must not contain whitespace"),
            ));
        }
        if domain.contains('/') || domain.contains('\\') || domain.starts_with('.') {
            return Err(ConfigValidationError::new(
                "domain",
                format!("domain '{domain}' is not a valid DNS name"),
            ));
        }
        if self.axfr_timeout_secs == 0 {
            return Err(ConfigValidationError::new(
                "axfr_timeout_secs",
                "zone transfer timeout must be greater than 0 seconds",
            ));
        }
        if self.dns_timeout_secs == Some(0) {
            return Err(ConfigValidationError::new(
                "dns_timeout_secs",
                "DNS timeout must be greater than 0 seconds",
            ));
        }
        Ok(())
    }

    /// Zone transfer bound as a `Duration`.
    pub fn axfr_timeout(&self) -> Duration {
        Duration::from_secs(self.axfr_timeout_secs)
    }

    /// Resolver settings derived from the CLI options.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            nameservers: self.nameservers.clone(),
            timeout: self.dns_timeout_secs.map(Duration::from_secs),
            transport: if self.tcp {
                Transport::Tcp
            } else {
                Transport::Udp
            },
        }
    }
}
