//! DNS resolution and record querying.
//!
//! This module provides async DNS operations using `trust-dns-resolver`:
//! - Enumeration of the fixed record types (A, AAAA, CNAME, HINFO, ISDN, MX, NS, PTR, SOA, TXT)
//! - DNSSEC presence detection (DNSKEY records)
//! - The [`DnsLookup`] abstraction the rest of the scan is written against
//!
//! All operations run sequentially and never fail the scan; errors are folded
//! into the per-type answers.

mod dnssec;
mod lookup;
mod records;

// Re-export public API
pub use dnssec::{check_dnssec, DnssecStatus};
pub use lookup::{rdata_to_text, DnsLookup};
pub use records::{enumerate_records, lookup_records, RecordAnswer, RecordKind, RecordSet};
