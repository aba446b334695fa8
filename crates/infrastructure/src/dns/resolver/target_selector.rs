//! Candidate server selection for one step of the iterative walk.
//!
//! A referral is split into an address pool (A, and AAAA when enabled) and a
//! name-server pool (NS). Addresses win outright. Name servers are only
//! consulted when no address is present, and each one costs a nested
//! resolution, so they are resolved lazily as the caller asks for the next
//! target.

use crate::dns::codec::response_parser::record_address;
use async_trait::async_trait;
use hickory_proto::rr::{Name, RData, Record};
use iterdns_domain::DomainError;
use std::collections::VecDeque;
use std::net::IpAddr;
use tracing::debug;

/// Why a name server produced no candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameServerSkip {
    /// The nested resolution failed.
    Failed(DomainError),
    /// The nested resolution succeeded but carried no A record.
    NoAddress,
    /// The hostname is already being resolved further up the chain.
    Loop,
    DepthExceeded,
}

/// Resolves a name-server hostname to an address on behalf of a selector.
#[async_trait]
pub trait NameServerLookup: Send + Sync {
    async fn lookup_name_server(&self, host: &Name) -> Result<IpAddr, NameServerSkip>;
}

#[derive(Debug, Default)]
pub struct TargetSelector {
    addresses: VecDeque<IpAddr>,
    name_servers: VecDeque<Name>,
    skipped: Vec<(Name, NameServerSkip)>,
}

impl TargetSelector {
    /// Partition a referral into candidate pools, authority before additional.
    pub fn from_referral(authority: &[Record], additional: &[Record], ipv6_targets: bool) -> Self {
        let mut addresses = VecDeque::new();
        let mut name_servers = VecDeque::new();

        for record in authority.iter().chain(additional.iter()) {
            match record.data() {
                Some(RData::NS(ns)) => name_servers.push_back(ns.0.clone()),
                _ => match record_address(record) {
                    Some(ip @ IpAddr::V4(_)) => addresses.push_back(ip),
                    Some(ip @ IpAddr::V6(_)) if ipv6_targets => addresses.push_back(ip),
                    _ => {}
                },
            }
        }

        if !addresses.is_empty() {
            name_servers.clear();
        }

        debug!(
            addresses = addresses.len(),
            name_servers = name_servers.len(),
            "Target selector seeded"
        );

        Self {
            addresses,
            name_servers,
            skipped: Vec::new(),
        }
    }

    /// True when the referral held neither addresses nor name servers.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.name_servers.is_empty()
    }

    pub fn uses_name_servers(&self) -> bool {
        self.addresses.is_empty() && !self.name_servers.is_empty()
    }

    /// Next server to try, or `None` once every candidate has been handed out.
    ///
    /// Name servers whose lookup fails are recorded in [`Self::skipped`] and
    /// the next one is tried.
    pub async fn next_target(&mut self, lookup: &dyn NameServerLookup) -> Option<IpAddr> {
        if let Some(address) = self.addresses.pop_front() {
            return Some(address);
        }

        while let Some(host) = self.name_servers.pop_front() {
            match lookup.lookup_name_server(&host).await {
                Ok(address) => {
                    debug!(name_server = %host, address = %address, "Name server resolved");
                    return Some(address);
                }
                Err(reason) => {
                    debug!(name_server = %host, reason = ?reason, "Skipping name server");
                    self.skipped.push((host, reason));
                }
            }
        }

        None
    }

    pub fn skipped(&self) -> &[(Name, NameServerSkip)] {
        &self.skipped
    }
}
