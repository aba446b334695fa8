#![allow(dead_code)]
use async_trait::async_trait;
use iterdns_domain::{DnsQuery, DomainError};
use iterdns_infrastructure::dns::codec::UpstreamResponse;
use iterdns_infrastructure::dns::{TransportOutcome, UpstreamTransport};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum Script {
    Respond(UpstreamResponse),
    Malformed,
    IoFailure,
}

/// In-memory transport replying from a `(qname, target)` table.
///
/// Every call is recorded; unscripted pairs time out.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    table: Arc<Mutex<HashMap<(String, IpAddr), Script>>>,
    calls: Arc<Mutex<Vec<(String, IpAddr)>>>,
}

fn normalize(qname: &str) -> String {
    let lower = qname.to_ascii_lowercase();
    if lower.ends_with('.') {
        lower
    } else {
        format!("{}.", lower)
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, qname: &str, target: IpAddr, response: UpstreamResponse) -> &Self {
        self.table
            .lock()
            .unwrap()
            .insert((normalize(qname), target), Script::Respond(response));
        self
    }

    pub fn malformed(&self, qname: &str, target: IpAddr) -> &Self {
        self.table
            .lock()
            .unwrap()
            .insert((normalize(qname), target), Script::Malformed);
        self
    }

    pub fn io_failure(&self, qname: &str, target: IpAddr) -> &Self {
        self.table
            .lock()
            .unwrap()
            .insert((normalize(qname), target), Script::IoFailure);
        self
    }

    /// Every `(qname, target)` asked so far, names fully qualified.
    pub fn calls(&self) -> Vec<(String, IpAddr)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn qnames(&self) -> Vec<String> {
        self.calls().into_iter().map(|(qname, _)| qname).collect()
    }
}

#[async_trait]
impl UpstreamTransport for ScriptedTransport {
    async fn send(
        &self,
        query: &DnsQuery,
        target: IpAddr,
        _timeout: Duration,
    ) -> Result<TransportOutcome, DomainError> {
        let key = (normalize(&query.domain), target);
        self.calls.lock().unwrap().push(key.clone());

        let script = self.table.lock().unwrap().get(&key).cloned();
        match script {
            Some(Script::Respond(response)) => Ok(TransportOutcome::Response(response)),
            Some(Script::Malformed) => Ok(TransportOutcome::Malformed("scripted garbage".into())),
            Some(Script::IoFailure) => Err(DomainError::IoError("scripted send failure".into())),
            None => Ok(TransportOutcome::Timeout),
        }
    }

    fn protocol_name(&self) -> &'static str {
        "scripted"
    }
}
