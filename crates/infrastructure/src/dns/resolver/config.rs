use iterdns_domain::config::ResolverSettings;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ResolverConfig {
    pub query_timeout_ms: u64,

    pub max_nested_depth: u8,

    pub fallback_rounds: u8,

    /// Accept AAAA glue as candidate targets.
    pub ipv6_targets: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: 3000,
            max_nested_depth: 4,
            fallback_rounds: 1,
            ipv6_targets: false,
        }
    }
}

impl From<&ResolverSettings> for ResolverConfig {
    fn from(settings: &ResolverSettings) -> Self {
        Self {
            query_timeout_ms: settings.query_timeout_ms,
            max_nested_depth: settings.max_nested_depth,
            fallback_rounds: settings.fallback_rounds,
            ipv6_targets: settings.ipv6_targets,
        }
    }
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.query_timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_nested_depth(mut self, depth: u8) -> Self {
        self.max_nested_depth = depth;
        self
    }

    pub fn with_fallback_rounds(mut self, rounds: u8) -> Self {
        self.fallback_rounds = rounds;
        self
    }

    pub fn with_ipv6_targets(mut self) -> Self {
        self.ipv6_targets = true;
        self
    }
}
