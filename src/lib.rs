//! dnsexpose library: DNS reconnaissance of a single domain.
//!
//! A scan enumerates the fixed record types (A, AAAA, CNAME, HINFO, ISDN, MX,
//! NS, PTR, SOA, TXT), attempts a zone transfer (AXFR) against every name
//! server found, checks for DNSKEY records and cross-checks TXT records with
//! the external `dig` and `nslookup` tools. Results are printed and written to
//! `dnsexpose_<domain>.json`.
//!
//! # Example
//!
//! ```no_run
//! use dnsexpose::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domain: "example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! let outcome = run_scan(config).await?;
//! println!("{} name server(s) probed", outcome.report.zone_transfer.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod external;
pub mod initialization;
pub mod report;
pub mod zone_transfer;

// Re-export public API
pub use config::{parse_cli, CliExit, Config, LogFormat, LogLevel};
pub use report::ScanReport;
pub use run::{run_scan, ScanOutcome, Scanner};

// Internal run module (contains the scan sequence)
mod run {
    use std::io::{self, Write};
    use std::path::PathBuf;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::{info, warn};

    use crate::config::Config;
    use crate::dns::{check_dnssec, enumerate_records, DnsLookup};
    use crate::external::{run_external_queries, ProcessTextQuery, TextQuery};
    use crate::initialization::{default_resolver_timeout, init_resolver};
    use crate::report::{banner, render_summary, section, write_report, ScanReport};
    use crate::zone_transfer::{probe_zone_transfers, AxfrClient, ZoneTransfer};

    /// Result of a completed run.
    #[derive(Debug, Clone)]
    pub struct ScanOutcome {
        /// Everything the scan found
        pub report: ScanReport,
        /// Where the JSON report was written
        pub report_path: PathBuf,
    }

    /// The scan sequence, written against injectable capabilities.
    ///
    /// Every step runs to completion before the next starts. No step can fail
    /// the scan: lookups, transfers and external tools fold their errors into
    /// the report.
    pub struct Scanner {
        resolver: Arc<dyn DnsLookup>,
        transfer: Arc<dyn ZoneTransfer>,
        text_query: Arc<dyn TextQuery>,
    }

    impl Scanner {
        /// Creates a scanner from its three capabilities.
        pub fn new(
            resolver: Arc<dyn DnsLookup>,
            transfer: Arc<dyn ZoneTransfer>,
            text_query: Arc<dyn TextQuery>,
        ) -> Self {
            Self {
                resolver,
                transfer,
                text_query,
            }
        }

        /// Production scanner: the configured resolver, a TCP AXFR client
        /// sharing that resolver, and the real `dig`/`nslookup` binaries.
        ///
        /// # Errors
        ///
        /// Fails if the resolver cannot be initialized.
        pub fn from_config(config: &Config) -> Result<Self> {
            let settings = config.resolver_settings();
            info!(
                "Resolver timeout: {:?}",
                settings.timeout.unwrap_or_else(default_resolver_timeout)
            );
            let resolver: Arc<dyn DnsLookup> = Arc::new(
                init_resolver(&settings).context("Failed to initialize DNS resolver")?,
            );
            let transfer = AxfrClient::new(Arc::clone(&resolver), config.axfr_timeout());
            info!(
                "Zone transfer timeout: {:?} per name server",
                transfer.timeout()
            );
            Ok(Self::new(
                resolver,
                Arc::new(transfer),
                Arc::new(ProcessTextQuery::new()),
            ))
        }

        /// Scans `domain`: records, zone transfers, external TXT queries, DNSSEC.
        pub async fn scan(&self, domain: &str) -> ScanReport {
            self.scan_with_progress(domain, &mut io::sink()).await
        }

        /// Like [`Scanner::scan`], writing a `[*]` line to `progress` as each
        /// network phase starts.
        pub async fn scan_with_progress<W: Write + Send>(
            &self,
            domain: &str,
            progress: &mut W,
        ) -> ScanReport {
            let records = enumerate_records(domain, self.resolver.as_ref()).await;

            let nameservers = records.nameservers();
            let _ = writeln!(progress, "{}\n", section("Testing for AXFR on NS servers..."));
            info!(
                "Testing {} name server(s) for AXFR on {domain}",
                nameservers.len()
            );
            let zone_transfer =
                probe_zone_transfers(domain, &nameservers, self.transfer.as_ref()).await;

            let _ = writeln!(
                progress,
                "{}\n",
                section("Running dig and nslookup for TXT records...")
            );
            let external = run_external_queries(domain, self.text_query.as_ref()).await;

            let dnssec = check_dnssec(domain, self.resolver.as_ref()).await;

            let exposed = zone_transfer.vulnerable_servers();
            if !exposed.is_empty() {
                warn!(
                    "{domain}: {} name server(s) allow zone transfers: {}",
                    exposed.len(),
                    exposed.join(", ")
                );
            }

            ScanReport {
                domain: domain.to_string(),
                records,
                zone_transfer,
                dnssec,
                external,
            }
        }
    }

    /// Runs a full scan with the provided configuration.
    ///
    /// Prints the banner and the summary to standard output and writes the
    /// JSON report to the configured output directory.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration is invalid
    /// - The DNS resolver cannot be initialized
    /// - The report file cannot be written
    pub async fn run_scan(config: Config) -> Result<ScanOutcome> {
        config.validate().context("Invalid configuration")?;
        let domain = config.normalized_domain();
        let scanner = Scanner::from_config(&config)?;

        println!("{}", banner());
        println!("{}\n", section(&format!("Enumerating DNS records for: {domain}")));

        let report = scanner
            .scan_with_progress(&domain, &mut io::stdout())
            .await;

        print!("{}", render_summary(&report));

        let report_path = write_report(&report, &config.output_dir)
            .await
            .context("Failed to save scan results")?;
        println!(
            "{}",
            section(&format!("Results saved to {}", report_path.display()))
        );

        Ok(ScanOutcome {
            report,
            report_path,
        })
    }
}
