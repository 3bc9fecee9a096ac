//! DNSSEC presence check.

use log::debug;
use serde::Serialize;
use trust_dns_resolver::proto::rr::RecordType;

use super::lookup::DnsLookup;

/// Whether the zone publishes DNSKEY records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DnssecStatus {
    /// A non-empty DNSKEY set was returned
    #[serde(rename = "Enabled")]
    Enabled,
    /// No DNSKEY set, or the query failed
    #[serde(rename = "Not enabled")]
    NotEnabled,
}

impl DnssecStatus {
    /// `true` for [`DnssecStatus::Enabled`].
    pub fn is_enabled(self) -> bool {
        self == DnssecStatus::Enabled
    }
}

impl From<bool> for DnssecStatus {
    fn from(enabled: bool) -> Self {
        if enabled {
            DnssecStatus::Enabled
        } else {
            DnssecStatus::NotEnabled
        }
    }
}

/// Checks for a DNSKEY record set at `domain`.
///
/// A failed query counts as "not enabled"; the two cases are not distinguished.
pub async fn check_dnssec(domain: &str, resolver: &dyn DnsLookup) -> DnssecStatus {
    match resolver.lookup(domain, RecordType::DNSKEY).await {
        Ok(keys) => DnssecStatus::from(!keys.is_empty()),
        Err(e) => {
            debug!("DNSKEY lookup for {domain} failed: {e}");
            DnssecStatus::NotEnabled
        }
    }
}
