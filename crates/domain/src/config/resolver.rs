use serde::{Deserialize, Serialize};

/// Knobs of the iterative walk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverSettings {
    /// Wait for one candidate before moving to the next one.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_upstream_port")]
    pub upstream_port: u16,

    /// How deep name-server hostname resolutions may nest.
    #[serde(default = "default_max_nested_depth")]
    pub max_nested_depth: u8,

    /// Extra rounds with the original question when the walk ends without an address.
    #[serde(default = "default_fallback_rounds")]
    pub fallback_rounds: u8,

    #[serde(default)]
    pub ipv6_targets: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
            upstream_port: default_upstream_port(),
            max_nested_depth: default_max_nested_depth(),
            fallback_rounds: default_fallback_rounds(),
            ipv6_targets: false,
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    3000
}

fn default_upstream_port() -> u16 {
    53
}

fn default_max_nested_depth() -> u8 {
    4
}

fn default_fallback_rounds() -> u8 {
    1
}
