use crate::dns::codec::{MessageBuilder, RecordTypeMapper};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use iterdns_application::use_cases::HandleDnsQueryUseCase;
use iterdns_domain::{DnsRequest, DomainError};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Turns client datagrams into replies through [`HandleDnsQueryUseCase`].
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    fn normalize_domain(domain: &str) -> String {
        domain.trim_end_matches('.').to_string()
    }

    /// Decode, answer and encode one datagram. `None` means nothing should
    /// be sent back (undecodable input or a stray response).
    pub async fn handle_raw(&self, bytes: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        let request = match Message::from_vec(bytes) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %client_ip, error = %e, "Dropping undecodable datagram");
                return None;
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client_ip, "Ignoring datagram that is not a query");
            return None;
        }

        let response = self.handle_message(&request, client_ip).await;

        match MessageBuilder::serialize_message(&response) {
            Ok(wire) => Some(wire),
            Err(e) => {
                error!(error = %e, "Failed to encode response");
                let fallback = MessageBuilder::build_error_response(&request, ResponseCode::ServFail);
                MessageBuilder::serialize_message(&fallback).ok()
            }
        }
    }

    pub async fn handle_message(&self, request: &Message, client_ip: IpAddr) -> Message {
        if request.op_code() != OpCode::Query {
            return MessageBuilder::build_error_response(request, ResponseCode::NotImp);
        }

        let Some(query) = request.queries().first() else {
            warn!(client = %client_ip, "Query without question");
            return MessageBuilder::build_error_response(request, ResponseCode::FormErr);
        };

        let domain = Self::normalize_domain(&query.name().to_ascii());
        let hickory_record_type = query.query_type();

        info!(domain = %domain, record_type = ?hickory_record_type, client = %client_ip, rd = request.recursion_desired(), "DNS query received");

        let Some(record_type) = RecordTypeMapper::from_hickory(hickory_record_type) else {
            warn!(record_type = ?hickory_record_type, "Unsupported record type");
            return MessageBuilder::build_error_response(request, ResponseCode::NotImp);
        };

        let dns_request = DnsRequest::new(domain.clone(), record_type, client_ip)
            .with_recursion_desired(request.recursion_desired());

        match self.use_case.execute(&dns_request).await {
            Ok(resolution) => {
                debug!(
                    domain = %domain,
                    answers = resolution.answers.len(),
                    authority = resolution.authorities.len(),
                    cache_hit = resolution.cache_hit,
                    "Sending response"
                );
                MessageBuilder::build_response(request, &resolution)
            }
            Err(DomainError::InvalidDomainName(reason)) => {
                warn!(domain = %domain, reason = %reason, "Rejecting query");
                MessageBuilder::build_error_response(request, ResponseCode::FormErr)
            }
            Err(e) => {
                if e.is_resolution_failure() {
                    warn!(error = %e, domain = %domain, "No answer obtainable");
                } else {
                    error!(error = %e, domain = %domain, "Query resolution failed");
                }
                MessageBuilder::build_error_response(request, ResponseCode::ServFail)
            }
        }
    }
}
