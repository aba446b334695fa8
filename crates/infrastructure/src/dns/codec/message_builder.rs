//! DNS message construction
//!
//! Upstream queries for the iterative walk and replies to clients, both
//! serialized to wire format with `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use iterdns_application::ports::DnsResolution;
use iterdns_domain::{DomainError, RecordType};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Parse a domain into a fully qualified `Name`.
    pub fn parse_name(domain: &str) -> Result<Name, DomainError> {
        let mut name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;
        name.set_fqdn(true);
        Ok(name)
    }

    /// Build an iterative (RD=0) query with a random ID.
    ///
    /// Returns the ID alongside the bytes so the caller can match the reply.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Self::parse_name(domain)?;

        let mut query = Query::query(name, RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(false);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Reply to `request` carrying the sections of `resolution`.
    pub fn build_response(request: &Message, resolution: &DnsResolution) -> Message {
        let mut response = Self::response_skeleton(request);
        for record in &resolution.answers {
            response.add_answer(record.clone());
        }
        for record in &resolution.authorities {
            response.add_name_server(record.clone());
        }
        for record in &resolution.additionals {
            response.add_additional(record.clone());
        }
        response
    }

    /// Empty reply to `request` with the given response code.
    pub fn build_error_response(request: &Message, code: ResponseCode) -> Message {
        let mut response = Self::response_skeleton(request);
        response.set_response_code(code);
        response
    }

    fn response_skeleton(request: &Message) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true)
            .set_response_code(ResponseCode::NoError);
        for query in request.queries() {
            response.add_query(query.clone());
        }
        response
    }

    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
