use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::{RData, Record};
use iterdns_domain::{DomainError, RecordType};
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// Sections of one upstream reply, as used by the iterative walk.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub id: u16,
    pub rcode: ResponseCode,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl UpstreamResponse {
    pub fn has_answer_of(&self, record_type: RecordType) -> bool {
        let wanted = RecordTypeMapper::to_hickory(&record_type);
        self.answers.iter().any(|r| r.record_type() == wanted)
    }

    pub fn is_referral(&self) -> bool {
        self.answers.is_empty() && !self.authorities.is_empty()
    }
}

/// First A record's address in `records`.
pub fn first_ipv4(records: &[Record]) -> Option<Ipv4Addr> {
    records.iter().find_map(|r| match r.data() {
        Some(RData::A(a)) => Some(a.0),
        _ => None,
    })
}

/// Address carried by an A or AAAA record.
pub fn record_address(record: &Record) -> Option<IpAddr> {
    match record.data() {
        Some(RData::A(a)) => Some(IpAddr::V4(a.0)),
        Some(RData::AAAA(aaaa)) => Some(IpAddr::V6(aaaa.0)),
        _ => None,
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<UpstreamResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "QR bit not set on reply".to_string(),
            ));
        }

        let mut message = message;
        let response = UpstreamResponse {
            id: message.id(),
            rcode: message.response_code(),
            answers: message.take_answers(),
            authorities: message.take_name_servers(),
            additionals: message.take_additionals(),
        };

        debug!(
            rcode = ?response.rcode,
            answers = response.answers.len(),
            authority = response.authorities.len(),
            additional = response.additionals.len(),
            "DNS response parsed"
        );

        Ok(response)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
