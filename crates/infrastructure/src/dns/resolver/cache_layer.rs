use crate::dns::cache::{CacheKey, ResolutionCache};
use async_trait::async_trait;
use dashmap::DashMap;
use iterdns_application::ports::{DnsResolution, DnsResolver};
use iterdns_domain::{DnsQuery, DomainError};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

type InflightResult = Arc<Result<DnsResolution, DomainError>>;
type InflightSender = Arc<watch::Sender<Option<InflightResult>>>;

struct InflightLeaderGuard {
    inflight: Arc<DashMap<CacheKey, InflightSender, FxBuildHasher>>,
    key: CacheKey,
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if let Some((_, tx)) = self.inflight.remove(&self.key) {
            let _ = tx.send(None);
        }
    }
}

/// Cache in front of the iterative engine with at most one upstream
/// resolution in flight per (name, type). Concurrent requesters for the same
/// key wait for the leader and receive its result, errors included.
pub struct CachedResolver {
    inner: Arc<dyn DnsResolver>,
    cache: Arc<ResolutionCache>,
    inflight: Arc<DashMap<CacheKey, InflightSender, FxBuildHasher>>,
}

impl CachedResolver {
    pub fn new(inner: Arc<dyn DnsResolver>, cache: Arc<ResolutionCache>) -> Self {
        Self {
            inner,
            cache,
            inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
        }
    }

    pub fn inflight_count(&self) -> usize {
        self.inflight.len()
    }

    /// Counted lookup when `count` is set; otherwise a re-check of a query
    /// whose hit or miss has already been recorded.
    fn check_cache(&self, query: &DnsQuery, count: bool) -> Option<DnsResolution> {
        let hit = if count {
            self.cache.read(query)
        } else {
            self.cache.peek(query)
        };
        if hit.is_some() {
            debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                "Cache HIT"
            );
        }
        hit
    }

    fn register_or_join_inflight(
        &self,
        key: &CacheKey,
    ) -> (bool, watch::Receiver<Option<InflightResult>>) {
        match self.inflight.entry(key.clone()) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                (false, rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, rx) = watch::channel(None::<InflightResult>);
                e.insert(Arc::new(tx));
                (true, rx)
            }
        }
    }

    async fn resolve_as_follower(
        &self,
        query: &DnsQuery,
        mut rx: watch::Receiver<Option<InflightResult>>,
    ) -> Result<DnsResolution, DomainError> {
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            "Joining in-flight resolution"
        );

        let _ = rx.changed().await;
        let shared = rx.borrow().clone();

        if let Some(result) = shared {
            return match result.as_ref() {
                Ok(resolution) => Ok(resolution.clone()),
                Err(e) => Err(e.clone()),
            };
        }

        // Leader went away without a result.
        if let Some(cached) = self.check_cache(query, false) {
            return Ok(cached);
        }

        self.resolve(query).await
    }

    async fn resolve_as_leader(
        &self,
        query: &DnsQuery,
        key: CacheKey,
    ) -> Result<DnsResolution, DomainError> {
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            "Cache MISS"
        );

        let guard = InflightLeaderGuard {
            inflight: Arc::clone(&self.inflight),
            key: key.clone(),
        };

        let result = self.inner.resolve(query).await;

        if let Ok(resolution) = &result {
            self.cache.write(query, resolution);
        }

        if let Some((_, tx)) = self.inflight.remove(&key) {
            let _ = tx.send(Some(Arc::new(result.clone())));
        }

        drop(guard);
        result
    }
}

#[async_trait]
impl DnsResolver for CachedResolver {
    fn try_cache(&self, query: &DnsQuery) -> Option<DnsResolution> {
        self.check_cache(query, true)
    }

    /// Callers look the query up through `try_cache` first, so the re-check
    /// here does not touch the hit and miss counters.
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        if let Some(cached) = self.check_cache(query, false) {
            return Ok(cached);
        }

        let key = CacheKey::from_query(query);
        let (is_leader, rx) = self.register_or_join_inflight(&key);

        if !is_leader {
            return self.resolve_as_follower(query, rx).await;
        }

        self.resolve_as_leader(query, key).await
    }
}
