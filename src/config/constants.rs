//! Configuration constants.
//!
//! This module defines the defaults and fixed strings used throughout the scan:
//! timeouts, ports, output naming, and the failure texts that end up in reports.

use std::time::Duration;

// Network operation timeouts
/// Zone transfer timeout in seconds, applied to each name server independently.
/// Covers resolution of the server address, the TCP connect and the full transfer.
pub const AXFR_TIMEOUT_SECS: u64 = 5;
/// Default zone transfer timeout as a `Duration`.
pub const AXFR_TIMEOUT: Duration = Duration::from_secs(AXFR_TIMEOUT_SECS);

/// Port used for DNS over TCP when talking to authoritative servers.
pub const DNS_PORT: u16 = 53;

// Output
/// Prefix of the JSON report file; the full name is `dnsexpose_<domain>.json`.
pub const REPORT_FILE_PREFIX: &str = "dnsexpose_";
/// Extension of the JSON report file.
pub const REPORT_FILE_EXTENSION: &str = "json";

// Failure texts embedded in the report
/// Prefix for a record query failure inside a record list.
pub const RECORD_ERROR_PREFIX: &str = "Error: ";
/// Prefix for a failed or refused zone transfer.
pub const AXFR_FAILURE_PREFIX: &str = "Zone transfer failed or not allowed: ";

/// Node name used for the zone apex in transfer results.
pub const ZONE_APEX_NODE: &str = "@";
