pub mod builder;
pub mod cache_layer;
pub mod config;
pub mod engine;
pub mod target_selector;

pub use builder::ResolverBuilder;
pub use cache_layer::CachedResolver;
pub use config::ResolverConfig;
pub use engine::ResolverEngine;
pub use target_selector::{NameServerLookup, NameServerSkip, TargetSelector};
