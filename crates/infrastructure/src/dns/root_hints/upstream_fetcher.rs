use crate::dns::transport::{udp::UdpTransport, TransportOutcome, UpstreamTransport};
use async_trait::async_trait;
use iterdns_application::ports::{RootHints, RootHintsSource};
use iterdns_domain::{DnsQuery, DomainError, RecordType};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, info};

/// Obtains the root referral from a well-connected server.
///
/// One RD=0 question for an uncommon name makes the server reply with its
/// root referral instead of a cached answer; the authority and additional
/// sections of that reply become the root hints.
pub struct UpstreamRootHintsFetcher {
    server: SocketAddr,
    query_name: String,
    timeout: Duration,
}

impl UpstreamRootHintsFetcher {
    pub fn new(server: SocketAddr, query_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            server,
            query_name: query_name.into(),
            timeout,
        }
    }
}

#[async_trait]
impl RootHintsSource for UpstreamRootHintsFetcher {
    async fn fetch(&self) -> Result<RootHints, DomainError> {
        info!(server = %self.server, query = %self.query_name, "Fetching root hints");

        let transport = UdpTransport::new(self.server.port());
        let query = DnsQuery::new(self.query_name.as_str(), RecordType::A);

        match transport.send(&query, self.server.ip(), self.timeout).await? {
            TransportOutcome::Response(response) => {
                debug!(
                    authority = response.authorities.len(),
                    additional = response.additionals.len(),
                    "Bootstrap server replied"
                );
                Ok(RootHints::new(response.authorities, response.additionals))
            }
            TransportOutcome::Timeout => Err(DomainError::QueryTimeout),
            TransportOutcome::Malformed(reason) => Err(DomainError::InvalidDnsResponse(reason)),
        }
    }

    fn name(&self) -> &'static str {
        "upstream"
    }
}
