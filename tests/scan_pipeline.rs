//! End-to-end scan sequence against scripted resolver, AXFR and tool doubles.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use trust_dns_resolver::proto::rr::RecordType;

use dnsexpose::dns::{DnsLookup, DnssecStatus, RecordAnswer, RecordKind};
use dnsexpose::error_handling::{ExternalQueryError, LookupError, TransferError};
use dnsexpose::external::{ExternalTool, TextQuery};
use dnsexpose::zone_transfer::{AxfrOutcome, ZoneTransfer};
use dnsexpose::Scanner;

/// Answers from a fixed table; anything missing is "no data".
#[derive(Default)]
struct FakeResolver {
    answers: HashMap<RecordType, Result<Vec<String>, LookupError>>,
}

impl FakeResolver {
    fn with(mut self, record_type: RecordType, values: &[&str]) -> Self {
        self.answers.insert(
            record_type,
            Ok(values.iter().map(|v| v.to_string()).collect()),
        );
        self
    }

    fn failing(mut self, record_type: RecordType, reason: &str) -> Self {
        self.answers
            .insert(record_type, Err(LookupError::Query(reason.to_string())));
        self
    }
}

#[async_trait]
impl DnsLookup for FakeResolver {
    async fn lookup(
        &self,
        _domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, LookupError> {
        self.answers
            .get(&record_type)
            .cloned()
            .unwrap_or(Err(LookupError::NoData))
    }

    async fn lookup_ip(&self, _host: &str) -> Result<Vec<IpAddr>, LookupError> {
        Err(LookupError::NoData)
    }
}

/// Records every server it was asked about and refuses unless told otherwise.
#[derive(Default)]
struct FakeTransfer {
    open: HashMap<String, Vec<String>>,
    attempts: Mutex<Vec<String>>,
}

#[async_trait]
impl ZoneTransfer for FakeTransfer {
    async fn transfer(&self, _zone: &str, nameserver: &str) -> Result<Vec<String>, TransferError> {
        self.attempts.lock().unwrap().push(nameserver.to_string());
        match self.open.get(nameserver) {
            Some(nodes) => Ok(nodes.clone()),
            None => Err(TransferError::Refused("Refused".to_string())),
        }
    }
}

struct FakeTools {
    available: bool,
}

#[async_trait]
impl TextQuery for FakeTools {
    async fn text_query(
        &self,
        tool: ExternalTool,
        domain: &str,
        record_type: &str,
    ) -> Result<String, ExternalQueryError> {
        if !self.available {
            return Err(ExternalQueryError::Spawn {
                program: tool.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        Ok(format!("{} {domain} {record_type}", tool.program()))
    }
}

fn scanner(resolver: FakeResolver, transfer: Arc<FakeTransfer>, tools_available: bool) -> Scanner {
    Scanner::new(
        Arc::new(resolver),
        transfer,
        Arc::new(FakeTools {
            available: tools_available,
        }),
    )
}

#[tokio::test]
async fn test_scan_with_refusing_name_servers() {
    let resolver = FakeResolver::default()
        .with(RecordType::A, &["93.184.216.34"])
        .with(RecordType::NS, &["ns1.example.com.", "ns2.example.com."]);
    let transfer = Arc::new(FakeTransfer::default());

    let report = scanner(resolver, Arc::clone(&transfer), true)
        .scan("example.com")
        .await;

    assert_eq!(report.domain, "example.com");
    assert_eq!(
        report.records.get(RecordKind::A),
        Some(&RecordAnswer::Values(vec!["93.184.216.34".to_string()]))
    );
    assert_eq!(
        *transfer.attempts.lock().unwrap(),
        vec!["ns1.example.com", "ns2.example.com"]
    );
    assert_eq!(report.zone_transfer.len(), 2);
    for (_, outcome) in report.zone_transfer.iter() {
        match outcome {
            AxfrOutcome::Failed(reason) => {
                assert!(reason.starts_with("Zone transfer failed or not allowed: "))
            }
            other => panic!("expected a failed transfer, got {other:?}"),
        }
    }
    assert!(report.zone_transfer.vulnerable_servers().is_empty());
    assert_eq!(report.dnssec, DnssecStatus::NotEnabled);
    assert_eq!(report.external.dig_txt, "dig example.com TXT");
    assert_eq!(report.external.nslookup_txt, "nslookup example.com TXT");
}

#[tokio::test]
async fn test_scan_reports_open_zone_transfer() {
    let resolver = FakeResolver::default()
        .with(RecordType::NS, &["ns1.example.com.", "ns2.example.com."])
        .with(RecordType::DNSKEY, &["257 3 13 AAAA"]);
    let mut transfer = FakeTransfer::default();
    transfer.open.insert(
        "ns2.example.com".to_string(),
        vec!["@".to_string(), "www".to_string(), "mail".to_string()],
    );

    let report = scanner(resolver, Arc::new(transfer), true)
        .scan("example.com")
        .await;

    assert_eq!(
        report.zone_transfer.vulnerable_servers(),
        vec!["ns2.example.com"]
    );
    assert_eq!(
        report.zone_transfer.get("ns2.example.com"),
        Some(&AxfrOutcome::Transferred(vec![
            "@".to_string(),
            "www".to_string(),
            "mail".to_string()
        ]))
    );
    assert_eq!(report.dnssec, DnssecStatus::Enabled);
}

#[tokio::test]
async fn test_scan_of_nonexistent_domain() {
    let transfer = Arc::new(FakeTransfer::default());

    let report = scanner(FakeResolver::default(), Arc::clone(&transfer), false)
        .scan("does-not-exist.invalid")
        .await;

    assert_eq!(report.records.iter().count(), 10);
    assert!(report.records.iter().all(|(_, answer)| answer.is_empty()));
    assert!(report.zone_transfer.is_empty());
    assert!(transfer.attempts.lock().unwrap().is_empty());
    assert_eq!(report.dnssec, DnssecStatus::NotEnabled);
    assert_eq!(report.external.dig_txt, "dig failed");
    assert_eq!(report.external.nslookup_txt, "nslookup failed");
}

#[tokio::test]
async fn test_failed_ns_lookup_skips_zone_transfers() {
    let resolver = FakeResolver::default()
        .with(RecordType::MX, &["10 mail.example.com."])
        .failing(RecordType::NS, "request timed out");
    let transfer = Arc::new(FakeTransfer::default());

    let report = scanner(resolver, Arc::clone(&transfer), true)
        .scan("example.com")
        .await;

    assert_eq!(
        report.records.get(RecordKind::Ns).map(RecordAnswer::entries),
        Some(vec!["Error: request timed out".to_string()])
    );
    assert_eq!(
        report.records.get(RecordKind::Mx).map(RecordAnswer::entries),
        Some(vec!["10 mail.example.com.".to_string()])
    );
    assert!(report.zone_transfer.is_empty());
    assert!(transfer.attempts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_progress_lines_announce_each_phase() {
    let resolver = FakeResolver::default().with(RecordType::NS, &["ns1.example.com."]);
    let mut progress = Vec::new();

    scanner(resolver, Arc::new(FakeTransfer::default()), true)
        .scan_with_progress("example.com", &mut progress)
        .await;

    let progress = String::from_utf8(progress).unwrap();
    let axfr = progress
        .find("Testing for AXFR on NS servers...")
        .expect("AXFR phase line");
    let external = progress
        .find("Running dig and nslookup for TXT records...")
        .expect("external tool phase line");
    assert!(axfr < external);
}
