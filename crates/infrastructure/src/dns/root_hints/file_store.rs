//! Root hints persisted as JSON:
//!
//! ```json
//! { "authority":  [{ "name": ".", "record_type": "NS", "ttl": 518400, "data": "a.root-servers.net." }],
//!   "additional": [{ "name": "a.root-servers.net.", "record_type": "A", "ttl": 3600000, "data": "198.41.0.4" }] }
//! ```

use async_trait::async_trait;
use hickory_proto::rr::rdata::{A, AAAA, NS};
use hickory_proto::rr::{Name, RData, Record};
use iterdns_application::ports::{RootHints, RootHintsStore};
use iterdns_domain::DomainError;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredRecord {
    pub name: String,
    pub record_type: String,
    pub ttl: u32,
    pub data: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredRootHints {
    #[serde(default)]
    pub authority: Vec<StoredRecord>,
    #[serde(default)]
    pub additional: Vec<StoredRecord>,
}

impl StoredRecord {
    /// `None` for record types the store does not carry.
    pub fn from_record(record: &Record) -> Option<Self> {
        let (record_type, data) = match record.data()? {
            RData::NS(ns) => ("NS", ns.0.to_ascii()),
            RData::A(a) => ("A", a.0.to_string()),
            RData::AAAA(aaaa) => ("AAAA", aaaa.0.to_string()),
            _ => return None,
        };

        Some(Self {
            name: record.name().to_ascii(),
            record_type: record_type.to_string(),
            ttl: record.ttl(),
            data,
        })
    }

    pub fn to_record(&self) -> Result<Record, DomainError> {
        let name = parse_name(&self.name)?;
        let rdata = match self.record_type.to_ascii_uppercase().as_str() {
            "NS" => RData::NS(NS(parse_name(&self.data)?)),
            "A" => RData::A(A(self.data.parse::<Ipv4Addr>().map_err(|_| {
                DomainError::InvalidIpAddress(self.data.clone())
            })?)),
            "AAAA" => RData::AAAA(AAAA(self.data.parse::<Ipv6Addr>().map_err(|_| {
                DomainError::InvalidIpAddress(self.data.clone())
            })?)),
            other => {
                return Err(DomainError::InvalidDnsResponse(format!(
                    "unsupported root hint record type {}",
                    other
                )))
            }
        };
        Ok(Record::from_rdata(name, self.ttl, rdata))
    }
}

fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_ascii(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", name, e)))
}

fn to_stored(records: &[Record]) -> Vec<StoredRecord> {
    records.iter().filter_map(StoredRecord::from_record).collect()
}

fn from_stored(records: &[StoredRecord]) -> Result<Vec<Record>, DomainError> {
    records.iter().map(StoredRecord::to_record).collect()
}

pub struct JsonRootHintsStore {
    path: PathBuf,
}

impl JsonRootHintsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RootHintsStore for JsonRootHintsStore {
    async fn load(&self) -> Result<Option<RootHints>, DomainError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No root hints file");
                return Ok(None);
            }
            Err(e) => {
                return Err(DomainError::IoError(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let stored: StoredRootHints = serde_json::from_str(&content).map_err(|e| {
            DomainError::InvalidDnsResponse(format!(
                "Invalid root hints file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(Some(RootHints::new(
            from_stored(&stored.authority)?,
            from_stored(&stored.additional)?,
        )))
    }

    async fn save(&self, hints: &RootHints) -> Result<(), DomainError> {
        let stored = StoredRootHints {
            authority: to_stored(&hints.authority),
            additional: to_stored(&hints.additional),
        };

        let skipped = hints.authority.len() + hints.additional.len()
            - stored.authority.len()
            - stored.additional.len();
        if skipped > 0 {
            warn!(skipped, "Root hint records of unsupported types not persisted");
        }

        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| DomainError::IoError(format!("Failed to encode root hints: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::IoError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            DomainError::IoError(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), "Root hints persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ns_record_conversion() {
        let record = Record::from_rdata(
            Name::root(),
            518_400,
            RData::NS(NS(Name::from_str("a.root-servers.net.").unwrap())),
        );
        let stored = StoredRecord::from_record(&record).unwrap();

        assert_eq!(stored.name, ".");
        assert_eq!(stored.record_type, "NS");
        assert_eq!(stored.data, "a.root-servers.net.");
        assert_eq!(stored.to_record().unwrap(), record);
    }

    #[test]
    fn test_bad_address_is_rejected() {
        let stored = StoredRecord {
            name: "a.root-servers.net.".to_string(),
            record_type: "A".to_string(),
            ttl: 60,
            data: "not-an-ip".to_string(),
        };
        assert!(matches!(
            stored.to_record(),
            Err(DomainError::InvalidIpAddress(_))
        ));
    }
}
