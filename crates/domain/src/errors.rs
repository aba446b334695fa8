use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("No viable server to query for {name}")]
    NoViableServer { name: String },

    #[error("All {attempts} candidate servers failed for {name}")]
    CandidatesExhausted { name: String, attempts: usize },

    #[error("No answer obtainable for {name}")]
    NoAnswer { name: String },

    #[error("Root hints unavailable: {0}")]
    RootHintsUnavailable(String),
}

impl DomainError {
    /// True for the failures that mean "no answer obtainable" for a client query.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            DomainError::NoViableServer { .. }
                | DomainError::CandidatesExhausted { .. }
                | DomainError::NoAnswer { .. }
                | DomainError::QueryTimeout
        )
    }
}
