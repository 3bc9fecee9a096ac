//! AXFR over TCP.
//!
//! Messages are built and decoded with the resolver crate's protocol codec;
//! this module only handles the TCP length framing and the SOA-to-SOA
//! termination rule of a zone transfer.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use trust_dns_resolver::proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use trust_dns_resolver::proto::rr::{Name, RecordType};
use trust_dns_resolver::proto::serialize::binary::{BinDecodable, BinEncodable};

use crate::config::{AXFR_TIMEOUT, DNS_PORT};
use crate::dns::DnsLookup;
use crate::error_handling::{LookupError, TransferError};

use super::nodes::ZoneNodes;
use super::ZoneTransfer;

/// Zone transfer client that resolves name servers through the scan's resolver.
pub struct AxfrClient {
    resolver: Arc<dyn DnsLookup>,
    timeout: Duration,
    port: u16,
}

impl AxfrClient {
    /// Creates a client bounded by `timeout` per name server.
    pub fn new(resolver: Arc<dyn DnsLookup>, timeout: Duration) -> Self {
        Self {
            resolver,
            timeout,
            port: DNS_PORT,
        }
    }

    /// Overrides the per-server time bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the TCP port (53 by default).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Per-server time bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Transfers `zone` from a known server address, bounded by the timeout.
    pub async fn transfer_from(
        &self,
        zone: &str,
        server: SocketAddr,
    ) -> Result<Vec<String>, TransferError> {
        tokio::time::timeout(self.timeout, axfr(zone, server))
            .await
            .map_err(|_| TransferError::Timeout(self.timeout))?
    }

    async fn resolve_server(&self, nameserver: &str) -> Result<SocketAddr, TransferError> {
        if let Ok(ip) = nameserver.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.port));
        }
        let addresses = self
            .resolver
            .lookup_ip(nameserver)
            .await
            .map_err(|e| TransferError::Resolve {
                server: nameserver.to_string(),
                reason: e.to_string(),
            })?;
        addresses
            .first()
            .map(|ip| SocketAddr::new(*ip, self.port))
            .ok_or_else(|| TransferError::Resolve {
                server: nameserver.to_string(),
                reason: "no addresses found".to_string(),
            })
    }
}

impl Default for AxfrClient {
    fn default() -> Self {
        Self::new(Arc::new(NoResolver), AXFR_TIMEOUT)
    }
}

#[async_trait]
impl ZoneTransfer for AxfrClient {
    async fn transfer(&self, zone: &str, nameserver: &str) -> Result<Vec<String>, TransferError> {
        // One bound for resolution, connect and transfer together
        let attempt = async {
            let server = self.resolve_server(nameserver).await?;
            debug!("Resolved name server {nameserver} to {server}");
            axfr(zone, server).await
        };
        tokio::time::timeout(self.timeout, attempt)
            .await
            .map_err(|_| TransferError::Timeout(self.timeout))?
    }
}

/// Resolver for clients that only transfer from literal addresses.
struct NoResolver;

#[async_trait]
impl DnsLookup for NoResolver {
    async fn lookup(
        &self,
        _domain: &str,
        _record_type: RecordType,
    ) -> Result<Vec<String>, LookupError> {
        Err(LookupError::NoData)
    }

    async fn lookup_ip(&self, _host: &str) -> Result<Vec<IpAddr>, LookupError> {
        Err(LookupError::NoData)
    }
}

/// Builds the AXFR query for `origin`.
pub(crate) fn build_axfr_query(origin: &Name, id: u16) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(false)
        .add_query(Query::query(origin.clone(), RecordType::AXFR));
    message
}

fn zone_origin(zone: &str) -> Result<Name, TransferError> {
    let fqdn = if zone.ends_with('.') {
        zone.to_string()
    } else {
        format!("{zone}.")
    };
    Name::from_ascii(&fqdn)
        .map_err(|e| TransferError::Protocol(format!("invalid zone name {zone}: {e}")))
}

async fn axfr(zone: &str, server: SocketAddr) -> Result<Vec<String>, TransferError> {
    let origin = zone_origin(zone)?;
    let connect_error = |e: std::io::Error| TransferError::Connect {
        server: server.to_string(),
        reason: e.to_string(),
    };

    let mut stream = TcpStream::connect(server).await.map_err(connect_error)?;

    let query_id = rand::random::<u16>();
    let request = build_axfr_query(&origin, query_id)
        .to_bytes()
        .map_err(|e| TransferError::Protocol(e.to_string()))?;
    write_frame(&mut stream, &request).await.map_err(connect_error)?;

    let mut nodes = ZoneNodes::new(&origin.to_ascii());
    let mut received = 0usize;
    let mut soa_count = 0usize;

    loop {
        let Some(frame) = read_frame(&mut stream).await.map_err(connect_error)? else {
            return Err(TransferError::Incomplete(received));
        };
        let response =
            Message::from_bytes(&frame).map_err(|e| TransferError::Protocol(e.to_string()))?;

        if response.id() != query_id {
            return Err(TransferError::Protocol(format!(
                "response id {} does not match query id {query_id}",
                response.id()
            )));
        }
        if response.response_code() != ResponseCode::NoError {
            return Err(TransferError::Refused(response.response_code().to_string()));
        }
        if response.answers().is_empty() && received == 0 {
            return Err(TransferError::Empty);
        }

        for record in response.answers() {
            received += 1;
            if record.record_type() == RecordType::SOA {
                soa_count += 1;
            } else if received == 1 {
                return Err(TransferError::Protocol(
                    "transfer did not start with an SOA record".to_string(),
                ));
            }
            nodes.add(&record.name().to_ascii());

            if soa_count == 2 {
                debug!(
                    "AXFR of {origin} from {server} complete: {received} records, {} nodes",
                    nodes.len()
                );
                return Ok(nodes.into_vec());
            }
        }
    }
}

async fn write_frame(stream: &mut TcpStream, payload: &[u8]) -> std::io::Result<()> {
    let len = u16::try_from(payload.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "DNS message exceeds 65535 bytes")
    })?;
    let mut frame = Vec::with_capacity(payload.len() + 2);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    stream.write_all(&frame).await?;
    stream.flush().await
}

/// Reads one length-prefixed message; `None` on a clean close between messages.
async fn read_frame(stream: &mut TcpStream) -> std::io::Result<Option<Vec<u8>>> {
    let mut len_bytes = [0u8; 2];
    match stream.read_exact(&mut len_bytes).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    let mut message = vec![0u8; usize::from(u16::from_be_bytes(len_bytes))];
    stream.read_exact(&mut message).await?;
    Ok(Some(message))
}
