//! UDP transport for iterative queries (RFC 1035 §4.2.1)
//!
//! Every call binds a fresh ephemeral socket, sends one RD=0 question and
//! waits for a matching reply until the deadline.

use super::{TransportOutcome, UpstreamTransport};
use crate::dns::codec::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use iterdns_domain::{DnsQuery, DomainError};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    port: u16,
}

impl UdpTransport {
    /// `port` is the destination port used for every target.
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn bind_addr_for(target: &SocketAddr) -> SocketAddr {
        match target {
            SocketAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            SocketAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        }
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new(53)
    }
}

#[async_trait]
impl UpstreamTransport for UdpTransport {
    async fn send(
        &self,
        query: &DnsQuery,
        target: IpAddr,
        timeout: Duration,
    ) -> Result<TransportOutcome, DomainError> {
        let server_addr = SocketAddr::new(target, self.port);
        let (query_id, message_bytes) =
            MessageBuilder::build_query_with_id(&query.domain, &query.record_type)?;

        let socket = UdpSocket::bind(Self::bind_addr_for(&server_addr))
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        let deadline = Instant::now() + timeout;

        let bytes_sent = match tokio::time::timeout_at(
            deadline,
            socket.send_to(&message_bytes, server_addr),
        )
        .await
        {
            Ok(sent) => sent.map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to send UDP query to {}: {}",
                    server_addr, e
                ))
            })?,
            Err(_) => return Ok(TransportOutcome::Timeout),
        };

        debug!(
            server = %server_addr,
            domain = %query.domain,
            record_type = %query.record_type,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let (bytes_received, from_addr) =
                match tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf)).await {
                    Ok(Ok(received)) => received,
                    Ok(Err(e)) => {
                        return Err(DomainError::IoError(format!(
                            "Failed to receive UDP response from {}: {}",
                            server_addr, e
                        )))
                    }
                    Err(_) => {
                        debug!(server = %server_addr, domain = %query.domain, "UDP query timed out");
                        return Ok(TransportOutcome::Timeout);
                    }
                };

            if from_addr.ip() != server_addr.ip() {
                warn!(
                    expected = %server_addr,
                    received_from = %from_addr,
                    "UDP response from unexpected source, ignoring"
                );
                continue;
            }

            debug!(
                server = %server_addr,
                bytes_received = bytes_received,
                "UDP response received"
            );

            let response = match ResponseParser::parse(&recv_buf[..bytes_received]) {
                Ok(response) => response,
                Err(e) => return Ok(TransportOutcome::Malformed(e.to_string())),
            };

            if response.id != query_id {
                return Ok(TransportOutcome::Malformed(format!(
                    "response id {} does not match query id {}",
                    response.id, query_id
                )));
            }

            return Ok(TransportOutcome::Response(response));
        }
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
