//! AXFR client against a local TCP server speaking the zone transfer protocol.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use trust_dns_resolver::proto::op::{Message, MessageType, ResponseCode};
use trust_dns_resolver::proto::rr::rdata::{A, NULL, SOA};
use trust_dns_resolver::proto::rr::{Name, RData, Record, RecordType};
use trust_dns_resolver::proto::serialize::binary::{BinDecodable, BinEncodable};

use dnsexpose::error_handling::TransferError;
use dnsexpose::zone_transfer::AxfrClient;

/// What the test server does after reading the query.
#[derive(Clone, Copy)]
enum Behavior {
    /// Full zone split over two messages
    Serve,
    /// Zone carrying a DNSKEY record set
    ServeSigned,
    /// REFUSED with no answers
    Refuse,
    /// First message only, then close
    Truncate,
    /// Never answer
    Stall,
}

fn name(s: &str) -> Name {
    Name::from_ascii(s).unwrap()
}

fn soa() -> Record {
    Record::from_rdata(
        name("example.com."),
        3600,
        RData::SOA(SOA::new(
            name("ns1.example.com."),
            name("hostmaster.example.com."),
            2024010101,
            7200,
            900,
            1209600,
            300,
        )),
    )
}

fn a_record(owner: &str, last_octet: u8) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A::new(192, 0, 2, last_octet)))
}

/// DNSKEY at the apex, encoded by hand (flags 257, protocol 3, algorithm 13).
fn dnskey() -> Record {
    let mut wire = vec![0x01, 0x01, 3, 13];
    wire.extend(std::iter::repeat(0xab).take(64));
    Record::from_rdata(
        name("example.com."),
        3600,
        RData::Unknown {
            code: RecordType::DNSKEY.into(),
            rdata: NULL::with(wire),
        },
    )
}

fn response_to(query: &Message, code: ResponseCode, answers: Vec<Record>) -> Vec<u8> {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_response_code(code)
        .add_queries(query.queries().to_vec())
        .add_answers(answers);
    response.to_bytes().unwrap()
}

async fn read_frame(stream: &mut TcpStream) -> Vec<u8> {
    let mut len = [0u8; 2];
    stream.read_exact(&mut len).await.unwrap();
    let mut buf = vec![0u8; usize::from(u16::from_be_bytes(len))];
    stream.read_exact(&mut buf).await.unwrap();
    buf
}

async fn write_frame(stream: &mut TcpStream, payload: &[u8]) {
    let len = u16::try_from(payload.len()).unwrap();
    stream.write_all(&len.to_be_bytes()).await.unwrap();
    stream.write_all(payload).await.unwrap();
}

/// Serves a single connection and returns the listening address.
async fn spawn_server(behavior: Behavior) -> SocketAddr {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let query = Message::from_bytes(&read_frame(&mut stream).await).unwrap();
        assert_eq!(query.queries()[0].query_type(), RecordType::AXFR);

        match behavior {
            Behavior::Serve => {
                let first = vec![soa(), a_record("www.example.com.", 10)];
                let second = vec![
                    a_record("mail.example.com.", 20),
                    a_record("www.example.com.", 11),
                    soa(),
                ];
                write_frame(&mut stream, &response_to(&query, ResponseCode::NoError, first)).await;
                write_frame(&mut stream, &response_to(&query, ResponseCode::NoError, second))
                    .await;
            }
            Behavior::ServeSigned => {
                let zone = vec![
                    soa(),
                    dnskey(),
                    a_record("www.example.com.", 10),
                    soa(),
                ];
                write_frame(&mut stream, &response_to(&query, ResponseCode::NoError, zone)).await;
            }
            Behavior::Refuse => {
                let refused = response_to(&query, ResponseCode::Refused, Vec::new());
                write_frame(&mut stream, &refused).await;
            }
            Behavior::Truncate => {
                let first = vec![soa(), a_record("www.example.com.", 10)];
                write_frame(&mut stream, &response_to(&query, ResponseCode::NoError, first)).await;
            }
            Behavior::Stall => {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
        }
        let _ = stream.shutdown().await;
    });

    addr
}

#[tokio::test]
async fn test_open_server_yields_relative_node_names() {
    let addr = spawn_server(Behavior::Serve).await;
    let nodes = AxfrClient::default()
        .transfer_from("example.com", addr)
        .await
        .expect("transfer should succeed");

    assert_eq!(nodes, vec!["@", "www", "mail"]);
}

#[tokio::test]
async fn test_signed_zone_transfers_cleanly() {
    let addr = spawn_server(Behavior::ServeSigned).await;
    let nodes = AxfrClient::default()
        .transfer_from("example.com", addr)
        .await
        .expect("DNSKEY records should decode");

    assert_eq!(nodes, vec!["@", "www"]);
}

#[tokio::test]
async fn test_refusing_server_is_reported() {
    let addr = spawn_server(Behavior::Refuse).await;
    let err = AxfrClient::default()
        .transfer_from("example.com", addr)
        .await
        .unwrap_err();

    assert!(
        matches!(err, TransferError::Refused(_)),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_stream_closed_before_closing_soa() {
    let addr = spawn_server(Behavior::Truncate).await;
    let err = AxfrClient::default()
        .transfer_from("example.com", addr)
        .await
        .unwrap_err();

    assert_eq!(err, TransferError::Incomplete(2));
}

#[tokio::test]
async fn test_stalled_server_hits_the_timeout() {
    let addr = spawn_server(Behavior::Stall).await;
    let timeout = Duration::from_millis(200);
    let err = AxfrClient::default()
        .with_timeout(timeout)
        .transfer_from("example.com", addr)
        .await
        .unwrap_err();

    assert_eq!(err, TransferError::Timeout(timeout));
}
