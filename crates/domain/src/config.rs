pub mod cache;
pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod root_hints;
pub mod server;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use resolver::ResolverSettings;
pub use root::{CliOverrides, Config};
pub use root_hints::RootHintsConfig;
pub use server::ServerConfig;
