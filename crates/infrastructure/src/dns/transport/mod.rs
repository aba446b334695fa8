pub mod udp;

use super::codec::UpstreamResponse;
use async_trait::async_trait;
use iterdns_domain::{DnsQuery, DomainError};
use std::net::IpAddr;
use std::time::Duration;

/// What came back from one candidate.
///
/// `Timeout` and `Malformed` both mean "try the next candidate"; they are
/// kept apart so callers can log and test them separately.
#[derive(Debug, Clone)]
pub enum TransportOutcome {
    Response(UpstreamResponse),
    Timeout,
    Malformed(String),
}

/// Sends one iterative question to one candidate server.
///
/// `Err` is reserved for local I/O failures (bind, send).
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn send(
        &self,
        query: &DnsQuery,
        target: IpAddr,
        timeout: Duration,
    ) -> Result<TransportOutcome, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
