//! iterdns domain layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use dns_request::DnsRequest;
pub use errors::DomainError;
