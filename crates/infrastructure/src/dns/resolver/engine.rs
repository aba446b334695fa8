//! Iterative resolution
//!
//! The queried name is rebuilt right to left, one label per step
//! (`com.`, `example.com.`, `www.example.com.`). Each step asks the servers
//! named by the previous referral, starting from the root hints, and the
//! first server that replies seeds the candidates for the next step.
//! Intermediate steps ask for type A. The final step asks for the requested
//! type instead, so AAAA, MX or TXT questions get their own records back
//! rather than the A set of the same name.
//!
//! When the final reply has no answer of the requested type, the original
//! question is re-asked against its referral for up to `fallback_rounds`
//! extra rounds (the CDN case, where the zone hands back a CNAME or a
//! further delegation). A walk that ends with an empty answer section is a
//! failure, never an empty success.

use super::config::ResolverConfig;
use super::target_selector::{NameServerLookup, NameServerSkip, TargetSelector};
use crate::dns::codec::{ResponseParser, UpstreamResponse};
use crate::dns::transport::{TransportOutcome, UpstreamTransport};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use hickory_proto::rr::Name;
use iterdns_application::ports::{DnsResolution, DnsResolver, RootHints};
use iterdns_domain::{DnsQuery, DomainError, RecordType};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct ResolverEngine {
    transport: Arc<dyn UpstreamTransport>,
    root_hints: Arc<RootHints>,
    config: ResolverConfig,
}

/// Position of a walk within nested name-server resolutions.
#[derive(Debug, Clone)]
struct WalkContext {
    depth: u8,
    /// Normalized names being resolved by this walk and its ancestors.
    chain: Vec<String>,
}

impl WalkContext {
    fn top(query: &DnsQuery) -> Self {
        Self {
            depth: 0,
            chain: vec![query.normalized_domain()],
        }
    }
}

/// Resolves name-server hostnames by starting a nested walk from the root.
struct NestedLookup<'a> {
    engine: &'a ResolverEngine,
    context: &'a WalkContext,
}

#[async_trait]
impl<'a> NameServerLookup for NestedLookup<'a> {
    async fn lookup_name_server(&self, host: &Name) -> Result<IpAddr, NameServerSkip> {
        let host_key = host.to_ascii().trim_end_matches('.').to_ascii_lowercase();

        if self.context.chain.iter().any(|name| *name == host_key) {
            return Err(NameServerSkip::Loop);
        }
        if self.context.depth >= self.engine.config.max_nested_depth {
            return Err(NameServerSkip::DepthExceeded);
        }

        let mut chain = self.context.chain.clone();
        chain.push(host_key.clone());
        let nested = WalkContext {
            depth: self.context.depth + 1,
            chain,
        };

        debug!(name_server = %host_key, depth = nested.depth, "Resolving name server");

        let query = DnsQuery::new(host_key, RecordType::A);
        let resolution = self
            .engine
            .walk(&query, nested)
            .await
            .map_err(NameServerSkip::Failed)?;

        crate::dns::codec::response_parser::first_ipv4(&resolution.answers)
            .map(IpAddr::V4)
            .ok_or(NameServerSkip::NoAddress)
    }
}

enum FallbackOutcome {
    Answered(IpAddr, UpstreamResponse),
    /// Replies came back but none carried an answer; holds the last one.
    Referred(IpAddr, UpstreamResponse),
    Exhausted { attempts: usize },
}

impl ResolverEngine {
    pub fn new(
        transport: Arc<dyn UpstreamTransport>,
        root_hints: Arc<RootHints>,
        config: ResolverConfig,
    ) -> Self {
        info!(
            timeout_ms = config.query_timeout_ms,
            max_nested_depth = config.max_nested_depth,
            fallback_rounds = config.fallback_rounds,
            root_name_servers = root_hints.name_server_count(),
            transport = transport.protocol_name(),
            "Iterative resolver engine created"
        );

        Self {
            transport,
            root_hints,
            config,
        }
    }

    fn seed_selector(&self) -> TargetSelector {
        TargetSelector::from_referral(
            &self.root_hints.authority,
            &self.root_hints.additional,
            self.config.ipv6_targets,
        )
    }

    fn selector_for(&self, response: &UpstreamResponse) -> TargetSelector {
        TargetSelector::from_referral(
            &response.authorities,
            &response.additionals,
            self.config.ipv6_targets,
        )
    }

    fn walk<'a>(
        &'a self,
        query: &'a DnsQuery,
        context: WalkContext,
    ) -> BoxFuture<'a, Result<DnsResolution, DomainError>> {
        async move {
            let labels = query.labels();
            if labels.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "nothing to resolve below the root: '{}'",
                    query.domain
                )));
            }

            let lookup = NestedLookup {
                engine: self,
                context: &context,
            };

            let mut selector = self.seed_selector();
            let mut partial = String::with_capacity(query.domain.len() + 1);
            let mut last: Option<(IpAddr, UpstreamResponse)> = None;

            for (index, label) in labels.iter().rev().enumerate() {
                partial.insert(0, '.');
                partial.insert_str(0, label);

                let is_final = index + 1 == labels.len();
                let step_type = if is_final {
                    query.record_type
                } else {
                    RecordType::A
                };
                let step = DnsQuery::new(partial.as_str(), step_type);

                let (server, response) = self.query_step(&step, &mut selector, &lookup).await?;

                debug!(
                    step = %step.domain,
                    server = %server,
                    rcode = ResponseParser::rcode_to_status(response.rcode),
                    referral = response.is_referral(),
                    answers = response.answers.len(),
                    authority = response.authorities.len(),
                    additional = response.additionals.len(),
                    depth = context.depth,
                    "Step answered"
                );

                selector = self.selector_for(&response);
                last = Some((server, response));
            }

            let (mut server, mut response) = last.ok_or_else(|| {
                DomainError::NoViableServer {
                    name: query.domain.to_string(),
                }
            })?;

            for round in 0..self.config.fallback_rounds {
                if response.has_answer_of(query.record_type) {
                    break;
                }

                debug!(
                    domain = %query.domain,
                    round = round + 1,
                    "No address in final reply, re-asking against its referral"
                );

                let mut selector = self.selector_for(&response);
                match self.query_for_answer(query, &mut selector, &lookup).await {
                    FallbackOutcome::Answered(s, r) | FallbackOutcome::Referred(s, r) => {
                        server = s;
                        response = r;
                    }
                    // A reply that still holds answers (a CNAME) is kept.
                    FallbackOutcome::Exhausted { attempts } if response.answers.is_empty() => {
                        return Err(if attempts == 0 {
                            DomainError::NoViableServer {
                                name: query.domain.to_string(),
                            }
                        } else {
                            DomainError::CandidatesExhausted {
                                name: query.domain.to_string(),
                                attempts,
                            }
                        });
                    }
                    FallbackOutcome::Exhausted { .. } => break,
                }
            }

            let resolution = DnsResolution {
                answers: response.answers,
                authorities: response.authorities,
                additionals: response.additionals,
                cache_hit: false,
                upstream_server: Some(server),
            };

            if !resolution.has_answers() {
                debug!(
                    domain = %query.domain,
                    server = %server,
                    authority = resolution.authorities.len(),
                    "Final reply carried no answer"
                );
                return Err(DomainError::NoAnswer {
                    name: query.domain.to_string(),
                });
            }

            Ok(resolution)
        }
        .boxed()
    }

    /// Try candidates in order until one replies.
    async fn query_step(
        &self,
        step: &DnsQuery,
        selector: &mut TargetSelector,
        lookup: &dyn NameServerLookup,
    ) -> Result<(IpAddr, UpstreamResponse), DomainError> {
        if selector.is_empty() {
            return Err(DomainError::NoViableServer {
                name: step.domain.to_string(),
            });
        }

        if selector.uses_name_servers() {
            debug!(step = %step.domain, "Referral has no glue, resolving its name servers");
        }

        let timeout = self.config.query_timeout();
        let mut attempts = 0usize;

        while let Some(target) = selector.next_target(lookup).await {
            attempts += 1;
            match self.transport.send(step, target, timeout).await {
                Ok(TransportOutcome::Response(response)) => return Ok((target, response)),
                Ok(TransportOutcome::Timeout) => {
                    debug!(step = %step.domain, server = %target, "Candidate timed out");
                }
                Ok(TransportOutcome::Malformed(reason)) => {
                    debug!(step = %step.domain, server = %target, reason = %reason, "Candidate sent a malformed reply");
                }
                Err(e) => {
                    warn!(step = %step.domain, server = %target, error = %e, "Candidate query failed");
                }
            }
        }

        if attempts == 0 {
            debug!(step = %step.domain, skipped = selector.skipped().len(), "Every name server was skipped");
            Err(DomainError::NoViableServer {
                name: step.domain.to_string(),
            })
        } else {
            Err(DomainError::CandidatesExhausted {
                name: step.domain.to_string(),
                attempts,
            })
        }
    }

    /// Try candidates until one replies with an answer of the requested type.
    async fn query_for_answer(
        &self,
        query: &DnsQuery,
        selector: &mut TargetSelector,
        lookup: &dyn NameServerLookup,
    ) -> FallbackOutcome {
        let timeout = self.config.query_timeout();
        let mut latest = None;
        let mut attempts = 0usize;

        while let Some(target) = selector.next_target(lookup).await {
            attempts += 1;
            match self.transport.send(query, target, timeout).await {
                Ok(TransportOutcome::Response(response)) => {
                    if response.has_answer_of(query.record_type) {
                        return FallbackOutcome::Answered(target, response);
                    }
                    latest = Some((target, response));
                }
                Ok(TransportOutcome::Timeout) | Ok(TransportOutcome::Malformed(_)) => {
                    debug!(domain = %query.domain, server = %target, "Fallback candidate gave no reply");
                }
                Err(e) => {
                    warn!(domain = %query.domain, server = %target, error = %e, "Fallback query failed");
                }
            }
        }

        match latest {
            Some((target, response)) => FallbackOutcome::Referred(target, response),
            None => FallbackOutcome::Exhausted { attempts },
        }
    }
}

#[async_trait]
impl DnsResolver for ResolverEngine {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let start = Instant::now();
        let result = self.walk(query, WalkContext::top(query)).await;

        match &result {
            Ok(resolution) => debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                answers = resolution.answers.len(),
                upstream = ?resolution.upstream_server,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Iterative resolution finished"
            ),
            Err(e) => debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                error = %e,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Iterative resolution failed"
            ),
        }

        result
    }
}
