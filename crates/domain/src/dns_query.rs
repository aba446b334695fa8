use super::RecordType;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Labels of the queried name, leftmost first, without the root label.
    pub fn labels(&self) -> Vec<&str> {
        self.domain
            .trim_end_matches('.')
            .split('.')
            .filter(|label| !label.is_empty())
            .collect()
    }

    /// Lowercased name without the trailing dot, as used for cache identity.
    pub fn normalized_domain(&self) -> String {
        self.domain.trim_end_matches('.').to_ascii_lowercase()
    }
}
