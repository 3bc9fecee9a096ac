//! Report data model.

use serde::Serialize;

use crate::dns::{DnssecStatus, RecordSet};
use crate::external::ExternalQueries;
use crate::zone_transfer::ZoneTransferResults;

/// Everything a scan found, keyed by the target domain.
///
/// Serializes to the flat report layout:
/// `domain`, `records`, `zone_transfer`, `dnssec`, `dig_txt`, `nslookup_txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Target domain
    pub domain: String,
    /// Answers per record type
    pub records: RecordSet,
    /// AXFR outcome per name server
    pub zone_transfer: ZoneTransferResults,
    /// DNSKEY presence
    pub dnssec: DnssecStatus,
    /// `dig` / `nslookup` TXT output
    #[serde(flatten)]
    pub external: ExternalQueries,
}
