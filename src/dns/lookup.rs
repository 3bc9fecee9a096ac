//! Resolver abstraction.
//!
//! The scan talks to DNS through [`DnsLookup`] so that tests can substitute a
//! canned resolver. The production implementation is `TokioAsyncResolver`.

use std::net::IpAddr;

use async_trait::async_trait;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::rr::{RData, RecordType};
use trust_dns_resolver::proto::serialize::binary::BinEncodable;
use trust_dns_resolver::TokioAsyncResolver;

use crate::error_handling::LookupError;

use super::records::ISDN_TYPE_CODE;

/// Record and address lookups against a configured resolver.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Returns the textual values of the `record_type` records at `domain`.
    ///
    /// No-data answers (no records, NXDOMAIN, no usable name servers) come back
    /// as `LookupError::NoData`; anything else as `LookupError::Query`.
    async fn lookup(&self, domain: &str, record_type: RecordType)
        -> Result<Vec<String>, LookupError>;

    /// Resolves a hostname to its addresses.
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, LookupError>;
}

#[async_trait]
impl DnsLookup for TokioAsyncResolver {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, LookupError> {
        let lookup = TokioAsyncResolver::lookup(self, domain, record_type)
            .await
            .map_err(|e| classify_resolve_error(&e))?;

        // Only the answer set itself; CNAME hops collected on the way are dropped
        Ok(lookup
            .record_iter()
            .filter(|record| record.record_type() == record_type)
            .filter_map(|record| record.data())
            .map(rdata_to_text)
            .collect())
    }

    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        let response = TokioAsyncResolver::lookup_ip(self, host)
            .await
            .map_err(|e| classify_resolve_error(&e))?;
        Ok(response.iter().collect())
    }
}

/// Splits resolver errors into "nothing there" and real failures.
pub(crate) fn classify_resolve_error(err: &ResolveError) -> LookupError {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } | ResolveErrorKind::NoConnections => {
            LookupError::NoData
        }
        _ => {
            log::debug!("Resolver error: {err}");
            LookupError::Query(err.to_string())
        }
    }
}

/// Presentation format of a record value.
///
/// TXT and ISDN character-strings are quoted, escaped and space-joined, the
/// way zone files show them; everything else uses the library's presentation
/// format.
pub fn rdata_to_text(rdata: &RData) -> String {
    match rdata {
        RData::TXT(txt) => txt
            .iter()
            .map(|bytes| quote_character_string(bytes))
            .collect::<Vec<String>>()
            .join(" "),
        RData::Unknown {
            code: ISDN_TYPE_CODE,
            ..
        } => rdata
            .to_bytes()
            .ok()
            .and_then(|wire| character_strings_to_text(&wire))
            .unwrap_or_else(|| rdata.to_string()),
        other => other.to_string(),
    }
}

/// Splits length-prefixed character-strings; `None` if the data is truncated.
fn character_strings_to_text(mut wire: &[u8]) -> Option<String> {
    let mut strings = Vec::new();
    while let Some((&len, rest)) = wire.split_first() {
        let len = usize::from(len);
        if rest.len() < len {
            return None;
        }
        let (string, tail) = rest.split_at(len);
        strings.push(quote_character_string(string));
        wire = tail;
    }
    if strings.is_empty() {
        return None;
    }
    Some(strings.join(" "))
}

/// Double-quotes one character-string, escaping `"` and `\` with a backslash
/// and bytes outside printable ASCII as `\DDD`.
fn quote_character_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &b in bytes {
        match b {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(char::from(b));
            }
            0x20..=0x7e => out.push(char::from(b)),
            _ => out.push_str(&format!("\\{b:03}")),
        }
    }
    out.push('"');
    out
}
