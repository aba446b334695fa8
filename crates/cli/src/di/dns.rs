use iterdns_application::ports::RootHints;
use iterdns_application::use_cases::HandleDnsQueryUseCase;
use iterdns_domain::Config;
use iterdns_infrastructure::dns::server::DnsServerHandler;
use iterdns_infrastructure::dns::{
    ResolutionCache, ResolverBuilder, ResolverConfig, UdpTransport,
};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub cache: Option<Arc<ResolutionCache>>,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config, root_hints: Arc<RootHints>) -> Self {
        let resolver_config = ResolverConfig::from(&config.resolver);

        info!(
            timeout_ms = resolver_config.query_timeout_ms,
            upstream_port = config.resolver.upstream_port,
            max_nested_depth = resolver_config.max_nested_depth,
            fallback_rounds = resolver_config.fallback_rounds,
            cache = config.cache.enabled,
            "Initializing iterative resolver"
        );

        let transport = Arc::new(UdpTransport::new(config.resolver.upstream_port));
        let cache = config
            .cache
            .enabled
            .then(|| Arc::new(ResolutionCache::new()));

        let mut builder =
            ResolverBuilder::new(transport, Arc::clone(&root_hints)).with_config(resolver_config);
        if let Some(cache) = &cache {
            builder = builder.with_cache(Arc::clone(cache));
        }
        let resolver = builder.build();

        let use_case = Arc::new(HandleDnsQueryUseCase::new(resolver, root_hints));

        Self {
            cache,
            handler: DnsServerHandler::new(use_case),
        }
    }
}
