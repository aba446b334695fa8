pub mod cache;
pub mod codec;
pub mod resolver;
pub mod root_hints;
pub mod server;
pub mod transport;

pub use cache::{CacheKey, CacheMetrics, Clock, ManualClock, ResolutionCache, SystemClock};
pub use resolver::{
    CachedResolver, NameServerLookup, NameServerSkip, ResolverBuilder, ResolverConfig,
    ResolverEngine, TargetSelector,
};
pub use root_hints::{builtin_root_hints, BuiltinRootHints, JsonRootHintsStore, UpstreamRootHintsFetcher};
pub use transport::{udp::UdpTransport, TransportOutcome, UpstreamTransport};
