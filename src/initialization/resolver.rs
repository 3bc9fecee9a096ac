//! DNS resolver initialization.
//!
//! Builds the resolver from an explicit [`ResolverSettings`] value instead of
//! process-wide defaults, so every caller sees the same upstreams and timeout.

use std::time::Duration;

use log::{debug, warn};
use trust_dns_resolver::config::{
    NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts,
};
use trust_dns_resolver::TokioAsyncResolver;

use crate::config::{ResolverSettings, Transport, DNS_PORT};
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver used for record enumeration, DNSSEC checks and
/// name server address lookups.
///
/// With no explicit name servers the system configuration is used, falling back
/// to the library defaults (Google public DNS) if it cannot be read.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the selected transport
/// leaves no usable name server.
pub fn init_resolver(settings: &ResolverSettings) -> Result<TokioAsyncResolver, InitializationError> {
    let (config, mut opts) = base_config(settings);

    if let Some(timeout) = settings.timeout {
        opts.timeout = timeout;
    }
    // No search-domain expansion: the operator names the exact zone
    opts.ndots = 0;

    let servers = select_name_servers(config.name_servers(), settings.transport);
    if servers.is_empty() {
        return Err(InitializationError::DnsResolverError(format!(
            "no {:?} name servers configured",
            settings.transport
        )));
    }
    debug!(
        "Resolver using {} name server(s), timeout {:?}",
        servers.len(),
        opts.timeout
    );

    let config = ResolverConfig::from_parts(
        config.domain().cloned(),
        config.search().to_vec(),
        servers,
    );
    Ok(TokioAsyncResolver::tokio(config, opts))
}

fn base_config(settings: &ResolverSettings) -> (ResolverConfig, ResolverOpts) {
    if !settings.nameservers.is_empty() {
        let group = NameServerConfigGroup::from_ips_clear(&settings.nameservers, DNS_PORT, true);
        return (
            ResolverConfig::from_parts(None, Vec::new(), group),
            ResolverOpts::default(),
        );
    }

    match trust_dns_resolver::system_conf::read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            warn!("Failed to read system resolver configuration: {e}. Falling back to defaults.");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    }
}

/// Keeps the name servers matching `transport`.
///
/// UDP keeps the TCP entries as well, since the resolver retries truncated
/// answers over TCP.
fn select_name_servers(servers: &[NameServerConfig], transport: Transport) -> Vec<NameServerConfig> {
    servers
        .iter()
        .filter(|ns| match transport {
            Transport::Udp => matches!(ns.protocol, Protocol::Udp | Protocol::Tcp),
            Transport::Tcp => ns.protocol == Protocol::Tcp,
        })
        .cloned()
        .collect()
}

/// Resolver timeout that applies when none is configured.
pub fn default_resolver_timeout() -> Duration {
    ResolverOpts::default().timeout
}
