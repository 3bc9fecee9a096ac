//! Process-backed text queries.

use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::error_handling::ExternalQueryError;

use super::{ExternalTool, TextQuery};

/// Runs the real `dig` and `nslookup` binaries found on `PATH`.
#[derive(Debug, Clone)]
pub struct ProcessTextQuery {
    dig_program: String,
    nslookup_program: String,
}

impl ProcessTextQuery {
    /// Uses `dig` and `nslookup` from `PATH`.
    pub fn new() -> Self {
        Self::with_programs(ExternalTool::Dig.program(), ExternalTool::Nslookup.program())
    }

    /// Uses the given executables instead of the default names.
    pub fn with_programs(dig: impl Into<String>, nslookup: impl Into<String>) -> Self {
        Self {
            dig_program: dig.into(),
            nslookup_program: nslookup.into(),
        }
    }

    fn program_for(&self, tool: ExternalTool) -> &str {
        match tool {
            ExternalTool::Dig => &self.dig_program,
            ExternalTool::Nslookup => &self.nslookup_program,
        }
    }
}

impl Default for ProcessTextQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextQuery for ProcessTextQuery {
    async fn text_query(
        &self,
        tool: ExternalTool,
        domain: &str,
        record_type: &str,
    ) -> Result<String, ExternalQueryError> {
        run_command(self.program_for(tool), &tool.args(domain, record_type)).await
    }
}

/// Runs `program` to completion and returns its trimmed standard output.
///
/// # Errors
///
/// `ExternalQueryError::Spawn` if the program cannot be started,
/// `ExternalQueryError::ExitStatus` if it exits unsuccessfully.
pub async fn run_command(program: &str, args: &[String]) -> Result<String, ExternalQueryError> {
    debug!("Running {program} {}", args.join(" "));
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| ExternalQueryError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ExternalQueryError::ExitStatus {
            program: program.to_string(),
            status: output.status.to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_a_spawn_error() {
        let err = run_command("dnsexpose-no-such-binary", &[]).await.unwrap_err();
        assert!(matches!(err, ExternalQueryError::Spawn { .. }));
        assert!(err.to_string().contains("dnsexpose-no-such-binary"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_output_is_trimmed() {
        let output = run_command("echo", &["  hello  ".to_string()]).await.unwrap();
        assert_eq!(output, "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_reported() {
        let err = run_command("false", &[]).await.unwrap_err();
        assert!(matches!(err, ExternalQueryError::ExitStatus { .. }));
    }
}
