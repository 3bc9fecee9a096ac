//! JSON report file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::config::{REPORT_FILE_EXTENSION, REPORT_FILE_PREFIX};

use super::ScanReport;

/// Path of the report for `domain` inside `output_dir`: `dnsexpose_<domain>.json`.
pub fn report_path(output_dir: &Path, domain: &str) -> PathBuf {
    output_dir.join(format!(
        "{REPORT_FILE_PREFIX}{domain}.{REPORT_FILE_EXTENSION}"
    ))
}

/// Serializes `report` with two-space indentation and writes it to `output_dir`.
///
/// # Errors
///
/// Fails if serialization fails or the file cannot be written; this is fatal
/// for the run.
pub async fn write_report(report: &ScanReport, output_dir: &Path) -> Result<PathBuf> {
    let path = report_path(output_dir, &report.domain);
    let json = serde_json::to_string_pretty(report).context("Failed to serialize scan report")?;

    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;

    info!("Report written to {}", path.display());
    Ok(path)
}
