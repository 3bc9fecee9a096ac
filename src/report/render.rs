//! Console rendering.
//!
//! The console layout is for people, not parsers; the JSON file is the
//! machine-readable output.

use std::fmt::Write as _;

use colored::*;

use crate::zone_transfer::AxfrOutcome;

use super::ScanReport;

const BANNER: &str = r"
  ____  _   _ ____  _____
 |  _ \| \ | / ___|| ____|_  ___ __   ___  ___  ___
 | | | |  \| \___ \|  _| \ \/ / '_ \ / _ \/ __|/ _ \
 | |_| | |\  |___) | |___ >  <| |_) | (_) \__ \  __/
 |____/|_| \_|____/|_____/_/\_\ .__/ \___/|___/\___|
                              |_|
        DNS recon & AXFR scanner
";

/// Startup banner.
pub fn banner() -> &'static str {
    BANNER
}

/// Section header line, e.g. `[*] AXFR Results:`.
pub fn section(title: &str) -> String {
    format!("{} {title}", "[*]".cyan().bold())
}

/// Two-column table with a 1-based index column.
///
/// ```text
///   #  A
/// ---  -------------
///   1  93.184.216.34
/// ```
pub fn render_table(header: &str, values: &[String]) -> String {
    let index_width = values.len().to_string().len().max(3);
    let value_width = values
        .iter()
        .flat_map(|v| v.lines())
        .map(|line| line.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{:>index_width$}  {header}", "#");
    let _ = writeln!(out, "{}  {}", "-".repeat(index_width), "-".repeat(value_width));
    for (i, value) in values.iter().enumerate() {
        let _ = writeln!(out, "{:>index_width$}  {value}", i + 1);
    }
    out
}

/// Full scan summary: records, AXFR results, DNSSEC verdict and external output.
pub fn render_summary(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}\n", section("DNS Enumeration Summary:"));
    for (kind, answer) in report.records.iter() {
        let _ = writeln!(out, "{kind} Records:");
        let entries = answer.entries();
        if entries.is_empty() {
            let _ = writeln!(out, "  No records found.\n");
        } else {
            let _ = writeln!(out, "{}", render_table(&kind.to_string(), &entries));
        }
    }

    let _ = writeln!(out, "{}\n", section("AXFR Results:"));
    if report.zone_transfer.is_empty() {
        let _ = writeln!(out, "  No name servers to test.\n");
    }
    for (nameserver, outcome) in report.zone_transfer.iter() {
        let _ = writeln!(out, "NS: {nameserver}");
        match outcome {
            AxfrOutcome::Transferred(nodes) => {
                let _ = writeln!(
                    out,
                    "  {}",
                    format!("Zone transfer allowed: {} node(s) exposed", nodes.len())
                        .red()
                        .bold()
                );
                let _ = writeln!(out, "{}", render_table("Node", nodes));
            }
            AxfrOutcome::Failed(reason) => {
                let _ = writeln!(out, "  {reason}\n");
            }
        }
    }

    let _ = writeln!(out, "{}", section("DNSSEC Support:"));
    if report.dnssec.is_enabled() {
        let _ = writeln!(
            out,
            "  {}\n",
            format!("✔ DNSSEC is enabled for {}", report.domain).green()
        );
    } else {
        let _ = writeln!(
            out,
            "  {}\n",
            format!("✘ DNSSEC is not enabled for {}", report.domain).red()
        );
    }

    let _ = writeln!(out, "{}\n", section("External Query Results (dig/nslookup):"));
    let _ = writeln!(out, "-- dig_txt --\n{}\n", report.external.dig_txt);
    let _ = writeln!(out, "-- nslookup_txt --\n{}\n", report.external.nslookup_txt);

    out
}
