pub mod builtin;
pub mod file_store;
pub mod upstream_fetcher;

pub use builtin::{builtin_root_hints, BuiltinRootHints};
pub use file_store::JsonRootHintsStore;
pub use upstream_fetcher::UpstreamRootHintsFetcher;
