#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::rr::rdata::{A, NS};
use hickory_proto::rr::{Name, RData, Record};
use iterdns_application::ports::{
    DnsResolution, DnsResolver, RootHints, RootHintsSource, RootHintsStore,
};
use iterdns_domain::{DnsQuery, DomainError};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

pub fn a_record(name: &str, ip: Ipv4Addr, ttl: u32) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), ttl, RData::A(A(ip)))
}

pub fn ns_record(zone: &str, host: &str, ttl: u32) -> Record {
    Record::from_rdata(
        Name::from_str(zone).unwrap(),
        ttl,
        RData::NS(NS(Name::from_str(host).unwrap())),
    )
}

pub fn sample_root_hints() -> RootHints {
    RootHints::new(
        vec![ns_record(".", "a.root-servers.net.", 518_400)],
        vec![a_record(
            "a.root-servers.net.",
            Ipv4Addr::new(198, 41, 0, 4),
            518_400,
        )],
    )
}

#[derive(Clone, Default)]
pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<String, DnsResolution>>>,
    cache_responses: Arc<RwLock<HashMap<String, DnsResolution>>>,
    error_responses: Arc<RwLock<HashMap<String, DomainError>>>,
    resolve_calls: Arc<AtomicUsize>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, domain: &str, resolution: DnsResolution) {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), resolution);
    }

    pub fn set_cached_response(&self, domain: &str, resolution: DnsResolution) {
        self.cache_responses
            .write()
            .unwrap()
            .insert(domain.to_string(), resolution);
    }

    pub fn set_response_error(&self, domain: &str, error: DomainError) {
        self.error_responses
            .write()
            .unwrap()
            .insert(domain.to_string(), error);
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.error_responses.read().unwrap().get(query.domain.as_ref()) {
            return Err(error.clone());
        }

        self.responses
            .read()
            .unwrap()
            .get(query.domain.as_ref())
            .cloned()
            .ok_or_else(|| DomainError::NoViableServer {
                name: query.domain.to_string(),
            })
    }

    fn try_cache(&self, query: &DnsQuery) -> Option<DnsResolution> {
        self.cache_responses
            .read()
            .unwrap()
            .get(query.domain.as_ref())
            .cloned()
    }
}

#[derive(Default)]
pub struct MockRootHintsStore {
    stored: Mutex<Option<RootHints>>,
    fail_load: bool,
    saves: AtomicUsize,
}

impl MockRootHintsStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_hints(hints: RootHints) -> Self {
        Self {
            stored: Mutex::new(Some(hints)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Option<RootHints> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl RootHintsStore for MockRootHintsStore {
    async fn load(&self) -> Result<Option<RootHints>, DomainError> {
        if self.fail_load {
            return Err(DomainError::IoError("corrupt root hints".to_string()));
        }
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, hints: &RootHints) -> Result<(), DomainError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock().unwrap() = Some(hints.clone());
        Ok(())
    }
}

pub struct MockRootHintsSource {
    name: &'static str,
    result: Result<RootHints, DomainError>,
    fetches: AtomicUsize,
}

impl MockRootHintsSource {
    pub fn returning(name: &'static str, hints: RootHints) -> Self {
        Self {
            name,
            result: Ok(hints),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            result: Err(DomainError::QueryTimeout),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RootHintsSource for MockRootHintsSource {
    async fn fetch(&self) -> Result<RootHints, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
