use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RootHintsConfig {
    /// JSON file holding the persisted root authority and additional records.
    #[serde(default = "default_path")]
    pub path: String,

    /// Well-connected server asked (with RD=0) for the root referral.
    /// When unset the built-in root hints are used.
    #[serde(default)]
    pub bootstrap_server: Option<String>,

    /// Uncommon name queried during bootstrap, so the answer is a referral
    /// rather than a cached final answer.
    #[serde(default = "default_bootstrap_name")]
    pub bootstrap_name: String,

    #[serde(default)]
    pub refresh_on_start: bool,
}

impl Default for RootHintsConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            bootstrap_server: None,
            bootstrap_name: default_bootstrap_name(),
            refresh_on_start: false,
        }
    }
}

fn default_path() -> String {
    "root-hints.json".to_string()
}

fn default_bootstrap_name() -> String {
    "cra.moe".to_string()
}

impl RootHintsConfig {
    /// Bootstrap server as a socket address; a bare IP gets `default_port`.
    pub fn bootstrap_addr(&self, default_port: u16) -> Result<Option<SocketAddr>, String> {
        let Some(server) = self.bootstrap_server.as_deref() else {
            return Ok(None);
        };

        if let Ok(addr) = server.parse::<SocketAddr>() {
            return Ok(Some(addr));
        }

        server
            .parse::<IpAddr>()
            .map(|ip| Some(SocketAddr::new(ip, default_port)))
            .map_err(|_| format!("Invalid bootstrap server address: {}", server))
    }
}
