use super::cache_layer::CachedResolver;
use super::config::ResolverConfig;
use super::engine::ResolverEngine;
use crate::dns::cache::ResolutionCache;
use crate::dns::transport::UpstreamTransport;
use iterdns_application::ports::{DnsResolver, RootHints};
use std::sync::Arc;
use tracing::info;

/// Assembles the resolver stack: the iterative engine, optionally wrapped
/// by the caching single-flight layer.
pub struct ResolverBuilder {
    transport: Arc<dyn UpstreamTransport>,
    root_hints: Arc<RootHints>,
    config: ResolverConfig,
    cache: Option<Arc<ResolutionCache>>,
}

impl ResolverBuilder {
    pub fn new(transport: Arc<dyn UpstreamTransport>, root_hints: Arc<RootHints>) -> Self {
        Self {
            transport,
            root_hints,
            config: ResolverConfig::default(),
            cache: None,
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Arc<dyn DnsResolver> {
        info!(
            cache = self.cache.is_some(),
            timeout_ms = self.config.query_timeout_ms,
            "Building DNS resolver"
        );

        let engine = ResolverEngine::new(self.transport, self.root_hints, self.config);
        let mut resolver: Arc<dyn DnsResolver> = Arc::new(engine);

        if let Some(cache) = self.cache {
            resolver = Arc::new(CachedResolver::new(resolver, cache));
        }

        info!("DNS resolver built successfully");
        resolver
    }
}
