//! External query tools.
//!
//! `dig` and `nslookup` are run for the target's TXT records as a cross-check
//! of the library resolver. Their output is reported verbatim; a failure only
//! replaces the output with a fixed message and never affects the scan.

mod process;

use async_trait::async_trait;
use log::warn;
use serde::Serialize;

use crate::error_handling::ExternalQueryError;

// Re-export public API
pub use process::{run_command, ProcessTextQuery};

/// The supported external tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTool {
    /// ISC `dig`
    Dig,
    /// `nslookup`
    Nslookup,
}

impl ExternalTool {
    /// Executable name.
    pub fn program(self) -> &'static str {
        match self {
            ExternalTool::Dig => "dig",
            ExternalTool::Nslookup => "nslookup",
        }
    }

    /// Command-line arguments for a `record_type` query of `domain`.
    pub fn args(self, domain: &str, record_type: &str) -> Vec<String> {
        match self {
            ExternalTool::Dig => vec![domain.to_string(), record_type.to_string()],
            ExternalTool::Nslookup => vec![format!("-type={record_type}"), domain.to_string()],
        }
    }

    /// Text reported in place of the output when the tool fails.
    pub fn failure_text(self) -> String {
        format!("{} failed", self.program())
    }
}

/// Runs a record query through an external tool.
#[async_trait]
pub trait TextQuery: Send + Sync {
    /// Returns the tool's standard output for a `record_type` query of `domain`.
    async fn text_query(
        &self,
        tool: ExternalTool,
        domain: &str,
        record_type: &str,
    ) -> Result<String, ExternalQueryError>;
}

/// Captured output of the TXT cross-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalQueries {
    /// `dig <domain> TXT`
    pub dig_txt: String,
    /// `nslookup -type=TXT <domain>`
    pub nslookup_txt: String,
}

/// Runs one tool, replacing any failure with the tool's fixed failure text.
pub async fn query_txt(tool: ExternalTool, domain: &str, runner: &dyn TextQuery) -> String {
    match runner.text_query(tool, domain, "TXT").await {
        Ok(output) => output,
        Err(e) => {
            warn!("{} TXT query for {domain} failed: {e}", tool.program());
            tool.failure_text()
        }
    }
}

/// Runs `dig` then `nslookup` for the TXT records of `domain`.
pub async fn run_external_queries(domain: &str, runner: &dyn TextQuery) -> ExternalQueries {
    ExternalQueries {
        dig_txt: query_txt(ExternalTool::Dig, domain, runner).await,
        nslookup_txt: query_txt(ExternalTool::Nslookup, domain, runner).await,
    }
}
