use super::clock::{Clock, SystemClock};
use super::entry::CacheEntry;
use super::key::CacheKey;
use super::metrics::CacheMetrics;
use dashmap::DashMap;
use iterdns_application::ports::DnsResolution;
use iterdns_domain::DnsQuery;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::Arc;
use tracing::debug;

/// TTL-aware answer cache keyed by (name, type).
///
/// Stale entries are dropped when a read finds them; nothing runs in the
/// background.
pub struct ResolutionCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    clock: Arc<dyn Clock>,
    metrics: Arc<CacheMetrics>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            clock,
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    /// Store the answer records of `resolution` under `query`, replacing any
    /// previous entry. Answer-less resolutions are not stored.
    pub fn write(&self, query: &DnsQuery, resolution: &DnsResolution) {
        if resolution.answers.is_empty() {
            debug!(domain = %query.domain, "Not caching empty answer set");
            return;
        }

        let key = CacheKey::from_query(query);
        let entry = CacheEntry::new(resolution.answers.clone(), self.clock.now_secs());

        debug!(
            domain = %key.domain,
            record_type = %key.record_type,
            records = entry.records.len(),
            "Cache write"
        );

        self.entries.insert(key, entry);
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// Cached answers with TTLs recomputed for now, or `None` on a miss.
    /// An entry holding any expired record is a miss and is removed.
    pub fn read(&self, query: &DnsQuery) -> Option<DnsResolution> {
        let result = self.lookup(query);
        let counter = if result.is_some() {
            &self.metrics.hits
        } else {
            &self.metrics.misses
        };
        counter.fetch_add(1, AtomicOrdering::Relaxed);
        result
    }

    /// Same as [`Self::read`] but leaves the hit and miss counters alone.
    /// Used for re-checks of a query whose lookup was already counted.
    pub fn peek(&self, query: &DnsQuery) -> Option<DnsResolution> {
        self.lookup(query)
    }

    fn lookup(&self, query: &DnsQuery) -> Option<DnsResolution> {
        let key = CacheKey::from_query(query);
        let now = self.clock.now_secs();

        let fresh = self.entries.get(&key)?.fresh_records(now);

        match fresh {
            Some(records) => Some(DnsResolution::new(records, true)),
            None => {
                // Re-check under the shard lock so a concurrent fresh write survives.
                if self
                    .entries
                    .remove_if(&key, |_, entry| entry.is_expired(now))
                    .is_some()
                {
                    self.metrics.expirations.fetch_add(1, AtomicOrdering::Relaxed);
                    debug!(domain = %key.domain, record_type = %key.record_type, "Cache entry expired");
                }
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> &Arc<CacheMetrics> {
        &self.metrics
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}
