//! Zone transfer (AXFR) probing.
//!
//! Every name server of the target is asked for a full zone transfer. A server
//! that answers leaks the whole zone to anyone; one that refuses is the
//! expected, correctly configured case. Each server is probed independently
//! and a failure on one never stops the others.

mod client;
mod nodes;

use std::collections::BTreeMap;

use async_trait::async_trait;
use log::{info, warn};
use serde::Serialize;

use crate::config::AXFR_FAILURE_PREFIX;
use crate::error_handling::TransferError;

// Re-export public API
pub use client::AxfrClient;
pub use nodes::{relative_node_name, ZoneNodes};

/// Performs a zone transfer from one name server.
#[async_trait]
pub trait ZoneTransfer: Send + Sync {
    /// Transfers `zone` from `nameserver` (hostname or IP literal, no trailing dot)
    /// and returns the zone's node names in transfer order.
    async fn transfer(&self, zone: &str, nameserver: &str) -> Result<Vec<String>, TransferError>;
}

/// Result of probing one name server.
///
/// Serialized as the node list, or as the failure string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AxfrOutcome {
    /// The server handed out the zone
    Transferred(Vec<String>),
    /// `Zone transfer failed or not allowed: <reason>`
    Failed(String),
}

impl AxfrOutcome {
    /// Wraps a transfer error in the report's failure text.
    pub fn failed(err: &TransferError) -> Self {
        AxfrOutcome::Failed(format!("{AXFR_FAILURE_PREFIX}{err}"))
    }

    /// `true` when the server allowed the transfer.
    pub fn is_transferred(&self) -> bool {
        matches!(self, AxfrOutcome::Transferred(_))
    }
}

/// Probe results keyed by name server hostname.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ZoneTransferResults(BTreeMap<String, AxfrOutcome>);

impl ZoneTransferResults {
    /// Records the outcome for `nameserver`.
    pub fn insert(&mut self, nameserver: impl Into<String>, outcome: AxfrOutcome) {
        self.0.insert(nameserver.into(), outcome);
    }

    /// Outcome for `nameserver`, if probed.
    pub fn get(&self, nameserver: &str) -> Option<&AxfrOutcome> {
        self.0.get(nameserver)
    }

    /// Outcomes sorted by name server.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AxfrOutcome)> {
        self.0.iter().map(|(ns, outcome)| (ns.as_str(), outcome))
    }

    /// Number of probed servers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no server was probed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Servers that allowed a transfer.
    pub fn vulnerable_servers(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, outcome)| outcome.is_transferred())
            .map(|(ns, _)| ns)
            .collect()
    }
}

/// Strips one trailing root-label dot from a name server hostname.
pub fn strip_root_dot(nameserver: &str) -> &str {
    nameserver.strip_suffix('.').unwrap_or(nameserver)
}

/// Attempts a zone transfer of `domain` from each of `nameservers`, in order.
pub async fn probe_zone_transfers(
    domain: &str,
    nameservers: &[String],
    transfer: &dyn ZoneTransfer,
) -> ZoneTransferResults {
    let mut results = ZoneTransferResults::default();

    for nameserver in nameservers {
        let server = strip_root_dot(nameserver.trim());
        if server.is_empty() {
            continue;
        }
        info!("Attempting AXFR of {domain} from {server}");

        let outcome = match transfer.transfer(domain, server).await {
            Ok(nodes) => {
                warn!(
                    "{server} allowed a zone transfer of {domain}: {} node(s) exposed",
                    nodes.len()
                );
                AxfrOutcome::Transferred(nodes)
            }
            Err(e) => {
                info!("AXFR of {domain} from {server} failed: {e}");
                AxfrOutcome::failed(&e)
            }
        };
        results.insert(server, outcome);
    }

    results
}
