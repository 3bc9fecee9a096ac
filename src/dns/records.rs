//! Record enumeration.
//!
//! Queries the fixed set of record types for a domain, one at a time. Each
//! type is isolated: a failed query is recorded against that type only.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{Display as StrumDisplay, EnumIter};
use trust_dns_resolver::proto::rr::RecordType;

use crate::config::RECORD_ERROR_PREFIX;
use crate::error_handling::LookupError;

use super::lookup::DnsLookup;

/// ISDN (RFC 1183) has no named variant in the resolver's type table.
pub(crate) const ISDN_TYPE_CODE: u16 = 20;

/// The record types enumerated for every target, in report order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    StrumDisplay,
    Serialize,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecordKind {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Host information
    Hinfo,
    /// ISDN address
    Isdn,
    /// Mail exchanger
    Mx,
    /// Authoritative name server
    Ns,
    /// Domain name pointer
    Ptr,
    /// Start of authority
    Soa,
    /// Text
    Txt,
}

impl RecordKind {
    /// Resolver record type for this kind.
    pub fn record_type(self) -> RecordType {
        match self {
            RecordKind::A => RecordType::A,
            RecordKind::Aaaa => RecordType::AAAA,
            RecordKind::Cname => RecordType::CNAME,
            RecordKind::Hinfo => RecordType::HINFO,
            RecordKind::Isdn => RecordType::Unknown(ISDN_TYPE_CODE),
            RecordKind::Mx => RecordType::MX,
            RecordKind::Ns => RecordType::NS,
            RecordKind::Ptr => RecordType::PTR,
            RecordKind::Soa => RecordType::SOA,
            RecordKind::Txt => RecordType::TXT,
        }
    }
}

/// Answer for one record type.
///
/// Serialized as a list of strings: the record values, or a single
/// `"Error: <reason>"` entry when the query failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAnswer {
    /// Record values in answer order (possibly empty)
    Values(Vec<String>),
    /// The query failed; carries the resolver's description
    Failed(String),
}

impl RecordAnswer {
    /// Folds a lookup result into an answer; no-data becomes an empty list.
    pub fn from_lookup(result: Result<Vec<String>, LookupError>) -> Self {
        match result {
            Ok(values) => RecordAnswer::Values(values),
            Err(LookupError::NoData) => RecordAnswer::Values(Vec::new()),
            Err(LookupError::Query(reason)) => RecordAnswer::Failed(reason),
        }
    }

    /// Successfully resolved values; empty for a failed query.
    pub fn values(&self) -> &[String] {
        match self {
            RecordAnswer::Values(values) => values,
            RecordAnswer::Failed(_) => &[],
        }
    }

    /// Lines as they appear in the report.
    pub fn entries(&self) -> Vec<String> {
        match self {
            RecordAnswer::Values(values) => values.clone(),
            RecordAnswer::Failed(reason) => vec![format!("{RECORD_ERROR_PREFIX}{reason}")],
        }
    }

    /// `true` when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        matches!(self, RecordAnswer::Values(values) if values.is_empty())
    }
}

impl Serialize for RecordAnswer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}

/// Answers for every enumerated record type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet(BTreeMap<RecordKind, RecordAnswer>);

impl RecordSet {
    /// Records an answer for `kind`, replacing any previous one.
    pub fn insert(&mut self, kind: RecordKind, answer: RecordAnswer) {
        self.0.insert(kind, answer);
    }

    /// Answer for `kind`, if it was queried.
    pub fn get(&self, kind: RecordKind) -> Option<&RecordAnswer> {
        self.0.get(&kind)
    }

    /// Answers in report order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordKind, &RecordAnswer)> {
        self.0.iter().map(|(kind, answer)| (*kind, answer))
    }

    /// Name server hostnames from a successful NS query.
    pub fn nameservers(&self) -> Vec<String> {
        self.get(RecordKind::Ns)
            .map(|answer| answer.values().to_vec())
            .unwrap_or_default()
    }
}

/// Queries a single record type.
///
/// Never fails: errors are folded into the returned answer.
pub async fn lookup_records(
    domain: &str,
    kind: RecordKind,
    resolver: &dyn DnsLookup,
) -> RecordAnswer {
    let result = resolver.lookup(domain, kind.record_type()).await;
    match &result {
        Ok(values) => debug!("{kind} lookup for {domain}: {} record(s)", values.len()),
        Err(LookupError::NoData) => debug!("{kind} lookup for {domain}: no records"),
        Err(LookupError::Query(reason)) => {
            warn!("Failed to lookup {kind} records for {domain}: {reason}")
        }
    }
    RecordAnswer::from_lookup(result)
}

/// Queries every [`RecordKind`] for `domain`, sequentially.
pub async fn enumerate_records(domain: &str, resolver: &dyn DnsLookup) -> RecordSet {
    info!("Enumerating DNS records for {domain}");
    let mut records = RecordSet::default();
    for kind in RecordKind::iter() {
        let answer = lookup_records(domain, kind, resolver).await;
        records.insert(kind, answer);
    }
    records
}
