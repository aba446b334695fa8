use async_trait::async_trait;
use hickory_proto::rr::{Record, RecordType};
use iterdns_domain::DomainError;

/// Authority and additional records describing the root name servers.
#[derive(Debug, Clone, Default)]
pub struct RootHints {
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
}

impl RootHints {
    pub fn new(authority: Vec<Record>, additional: Vec<Record>) -> Self {
        Self {
            authority,
            additional,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.authority.is_empty() && self.additional.is_empty()
    }

    pub fn name_server_count(&self) -> usize {
        self.authority
            .iter()
            .chain(self.additional.iter())
            .filter(|r| r.record_type() == RecordType::NS)
            .count()
    }
}

/// Persistent storage for root hints.
#[async_trait]
pub trait RootHintsStore: Send + Sync {
    /// `Ok(None)` when nothing has been persisted yet.
    async fn load(&self) -> Result<Option<RootHints>, DomainError>;

    async fn save(&self, hints: &RootHints) -> Result<(), DomainError>;
}

/// Somewhere fresh root hints can be obtained from.
#[async_trait]
pub trait RootHintsSource: Send + Sync {
    async fn fetch(&self) -> Result<RootHints, DomainError>;

    fn name(&self) -> &'static str;
}
