use crate::ports::{DnsResolution, DnsResolver, RootHints};
use iterdns_domain::{DnsQuery, DnsRequest, DomainError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Client-facing entry point: cache first, then a root referral for
/// non-recursive requests or a full iterative resolution for recursive ones.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
    root_hints: Arc<RootHints>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, root_hints: Arc<RootHints>) -> Self {
        Self {
            resolver,
            root_hints,
        }
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError> {
        let start = Instant::now();
        let query = DnsQuery::new(Arc::clone(&request.domain), request.record_type);

        if let Some(cached) = self.resolver.try_cache(&query) {
            debug!(
                domain = %request.domain,
                record_type = %request.record_type,
                client = %request.client_ip,
                "Answered from cache"
            );
            return Ok(cached);
        }

        if !request.recursion_desired {
            debug!(
                domain = %request.domain,
                client = %request.client_ip,
                "RD=0, answering with root server referral"
            );
            return Ok(DnsResolution::referral(
                self.root_hints.authority.clone(),
                self.root_hints.additional.clone(),
            ));
        }

        match self.resolver.resolve(&query).await {
            Ok(resolution) => {
                info!(
                    domain = %request.domain,
                    record_type = %request.record_type,
                    answers = resolution.answers.len(),
                    min_ttl = ?resolution.min_ttl(),
                    cache_hit = resolution.cache_hit,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Query resolved"
                );
                Ok(resolution)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    domain = %request.domain,
                    record_type = %request.record_type,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Query resolution failed"
                );
                Err(e)
            }
        }
    }
}
