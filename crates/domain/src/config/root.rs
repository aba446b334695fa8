use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverSettings;
use super::root_hints::RootHintsConfig;
use super::server::ServerConfig;

const MAX_FALLBACK_ROUNDS: u8 = 3;
const MAX_NESTED_DEPTH: u8 = 16;

/// Main configuration structure for iterdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Iterative resolution configuration
    #[serde(default)]
    pub resolver: ResolverSettings,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Root hints persistence and bootstrap
    #[serde(default)]
    pub root_hints: RootHintsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. iterdns.toml in current directory
    /// 3. /etc/iterdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("iterdns.toml").exists() {
            Self::from_file("iterdns.toml")?
        } else if std::path::Path::new("/etc/iterdns/config.toml").exists() {
            Self::from_file("/etc/iterdns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(path) = overrides.root_hints_path {
            self.root_hints.path = path;
        }
        if let Some(server) = overrides.bootstrap_server {
            self.root_hints.bootstrap_server = Some(server);
        }
        if overrides.refresh_root_hints {
            self.root_hints.refresh_on_start = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        if self.resolver.upstream_port == 0 {
            return Err(ConfigError::Validation(
                "Upstream port cannot be 0".to_string(),
            ));
        }

        if self.resolver.fallback_rounds > MAX_FALLBACK_ROUNDS {
            return Err(ConfigError::Validation(format!(
                "fallback_rounds must be at most {}",
                MAX_FALLBACK_ROUNDS
            )));
        }

        if !(1..=MAX_NESTED_DEPTH).contains(&self.resolver.max_nested_depth) {
            return Err(ConfigError::Validation(format!(
                "max_nested_depth must be between 1 and {}",
                MAX_NESTED_DEPTH
            )));
        }

        self.root_hints
            .bootstrap_addr(self.resolver.upstream_port)
            .map_err(ConfigError::Validation)?;

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub root_hints_path: Option<String>,
    pub bootstrap_server: Option<String>,
    pub refresh_root_hints: bool,
    pub log_level: Option<String>,
}
