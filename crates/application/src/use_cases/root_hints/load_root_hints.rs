use crate::ports::{RootHints, RootHintsSource, RootHintsStore};
use iterdns_domain::DomainError;
use std::sync::Arc;
use tracing::{info, warn};

/// Produces the root hints the resolver is seeded with: the persisted copy
/// when there is one, otherwise the first source that yields a non-empty
/// set, which is then persisted.
pub struct LoadRootHintsUseCase {
    store: Arc<dyn RootHintsStore>,
    sources: Vec<Arc<dyn RootHintsSource>>,
}

impl LoadRootHintsUseCase {
    pub fn new(store: Arc<dyn RootHintsStore>) -> Self {
        Self {
            store,
            sources: Vec::new(),
        }
    }

    /// Sources are tried in the order they were added.
    pub fn with_source(mut self, source: Arc<dyn RootHintsSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub async fn execute(&self, force_refresh: bool) -> Result<RootHints, DomainError> {
        if !force_refresh {
            match self.store.load().await {
                Ok(Some(hints)) if !hints.is_empty() => {
                    info!(
                        name_servers = hints.name_server_count(),
                        additional = hints.additional.len(),
                        "Loaded persisted root hints"
                    );
                    return Ok(hints);
                }
                Ok(_) => info!("No persisted root hints, refreshing"),
                Err(e) => warn!(error = %e, "Persisted root hints unreadable, refreshing"),
            }
        }

        for source in &self.sources {
            match source.fetch().await {
                Ok(hints) if !hints.is_empty() => {
                    info!(
                        source = source.name(),
                        name_servers = hints.name_server_count(),
                        additional = hints.additional.len(),
                        "Obtained root hints"
                    );
                    if let Err(e) = self.store.save(&hints).await {
                        warn!(error = %e, "Failed to persist root hints");
                    }
                    return Ok(hints);
                }
                Ok(_) => warn!(source = source.name(), "Root hints source returned nothing"),
                Err(e) => warn!(source = source.name(), error = %e, "Root hints source failed"),
            }
        }

        Err(DomainError::RootHintsUnavailable(
            "no persisted copy and every source failed".to_string(),
        ))
    }
}
