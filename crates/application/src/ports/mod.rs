mod dns_resolver;
mod root_hints;

pub use dns_resolver::{DnsResolution, DnsResolver};
pub use root_hints::{RootHints, RootHintsSource, RootHintsStore};

pub use iterdns_domain::DnsQuery;
