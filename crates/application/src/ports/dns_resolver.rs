use async_trait::async_trait;
use hickory_proto::rr::Record;
use iterdns_domain::{DnsQuery, DomainError};
use std::net::IpAddr;

/// Answer, authority and additional sections produced for one question.
#[derive(Debug, Clone, Default)]
pub struct DnsResolution {
    pub answers: Vec<Record>,
    /// Records from the AUTHORITY section of the final upstream response.
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
    pub cache_hit: bool,
    /// Server that produced the final response, if any was contacted.
    pub upstream_server: Option<IpAddr>,
}

impl DnsResolution {
    pub fn new(answers: Vec<Record>, cache_hit: bool) -> Self {
        Self {
            answers,
            cache_hit,
            ..Self::default()
        }
    }

    pub fn referral(authorities: Vec<Record>, additionals: Vec<Record>) -> Self {
        Self {
            authorities,
            additionals,
            ..Self::default()
        }
    }

    pub fn min_ttl(&self) -> Option<u32> {
        self.answers.iter().map(Record::ttl).min()
    }

    pub fn has_answers(&self) -> bool {
        !self.answers.is_empty()
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;

    /// Check only the cache without going upstream.
    /// Returns `Some(resolution)` on hit, `None` on miss.
    /// Default implementation returns None (no cache).
    fn try_cache(&self, _query: &DnsQuery) -> Option<DnsResolution> {
        None
    }
}
