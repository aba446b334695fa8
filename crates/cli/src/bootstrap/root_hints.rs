use iterdns_application::ports::RootHints;
use iterdns_application::use_cases::LoadRootHintsUseCase;
use iterdns_domain::Config;
use iterdns_infrastructure::dns::{BuiltinRootHints, JsonRootHintsStore, UpstreamRootHintsFetcher};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Stored hints first, then the bootstrap server when one is configured,
/// then the built-in IANA list.
pub async fn init_root_hints(config: &Config) -> anyhow::Result<Arc<RootHints>> {
    let store = Arc::new(JsonRootHintsStore::new(&config.root_hints.path));
    let mut use_case = LoadRootHintsUseCase::new(store);

    if let Some(server) = config
        .root_hints
        .bootstrap_addr(config.resolver.upstream_port)
        .map_err(anyhow::Error::msg)?
    {
        info!(server = %server, "Bootstrap server configured for root hints");
        use_case = use_case.with_source(Arc::new(UpstreamRootHintsFetcher::new(
            server,
            config.root_hints.bootstrap_name.clone(),
            Duration::from_millis(config.resolver.query_timeout_ms),
        )));
    }

    let hints = use_case
        .with_source(Arc::new(BuiltinRootHints))
        .execute(config.root_hints.refresh_on_start)
        .await?;

    info!(
        path = %config.root_hints.path,
        name_servers = hints.name_server_count(),
        "Root hints ready"
    );

    Ok(Arc::new(hints))
}
