//! Error type definitions.
//!
//! Every per-query error here is contained by the scan and folded into the
//! report. Only initialization and configuration errors stop a run.

use std::time::Duration;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// A configuration value that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable explanation
    pub message: String,
}

impl ConfigValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Outcome of a failed record lookup.
///
/// `NoData` covers every "nothing there" answer (no records of that type,
/// NXDOMAIN, no usable name servers) and is not treated as a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name has no records of the requested type.
    #[error("no records found")]
    NoData,

    /// The query itself failed (timeout, network error, malformed response).
    #[error("{0}")]
    Query(String),
}

impl LookupError {
    /// Returns `true` for the no-data condition.
    pub fn is_no_data(&self) -> bool {
        matches!(self, LookupError::NoData)
    }
}

/// Reasons a zone transfer attempt against one name server failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The name server hostname did not resolve to an address.
    #[error("could not resolve name server {server}: {reason}")]
    Resolve {
        /// Name server hostname
        server: String,
        /// Underlying resolver error
        reason: String,
    },

    /// TCP connection or I/O failure.
    #[error("connection to {server} failed: {reason}")]
    Connect {
        /// Server address
        server: String,
        /// Underlying I/O error
        reason: String,
    },

    /// The attempt exceeded its time bound.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-NOERROR response code.
    #[error("server responded with {0}")]
    Refused(String),

    /// The response could not be encoded or decoded.
    #[error("malformed response: {0}")]
    Protocol(String),

    /// The server answered without any records.
    #[error("empty response")]
    Empty,

    /// The stream closed before the closing SOA record.
    #[error("transfer ended before the closing SOA record ({0} records received)")]
    Incomplete(usize),
}

/// Failure running an external query tool.
#[derive(Error, Debug)]
pub enum ExternalQueryError {
    /// The program could not be started (e.g. not on PATH).
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully.
    #[error("{program} exited with {status}")]
    ExitStatus {
        /// Program name
        program: String,
        /// Exit status description
        status: String,
    },
}
