#![allow(dead_code)]
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::{A, CNAME, NS};
use hickory_proto::rr::{Name, RData, Record};
use iterdns_application::ports::RootHints;
use iterdns_infrastructure::dns::codec::UpstreamResponse;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

pub const ROOT_SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);
pub const SECOND_ROOT_SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 2);
pub const COM_SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 1, 1);
pub const EXAMPLE_SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 2, 1);
pub const CDN_SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 3, 1);
pub const NET_SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 4, 1);
pub const DNS_HOST_SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 5, 1);
pub const OUT_OF_BAILIWICK_NS: Ipv4Addr = Ipv4Addr::new(10, 0, 6, 1);
pub const WWW_ADDRESS: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

pub fn ip(addr: Ipv4Addr) -> IpAddr {
    IpAddr::V4(addr)
}

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

pub fn a_record(host: &str, addr: Ipv4Addr, ttl: u32) -> Record {
    Record::from_rdata(name(host), ttl, RData::A(A(addr)))
}

pub fn ns_record(zone: &str, host: &str) -> Record {
    Record::from_rdata(name(zone), 172_800, RData::NS(NS(name(host))))
}

pub fn cname_record(alias: &str, target: &str) -> Record {
    Record::from_rdata(name(alias), 300, RData::CNAME(CNAME(name(target))))
}

/// Single root server `a.root.test.` at [`ROOT_SERVER`].
pub fn test_root_hints() -> RootHints {
    RootHints::new(
        vec![ns_record(".", "a.root.test.")],
        vec![a_record("a.root.test.", ROOT_SERVER, 3_600_000)],
    )
}

pub fn two_root_hints() -> RootHints {
    RootHints::new(
        vec![ns_record(".", "a.root.test."), ns_record(".", "b.root.test.")],
        vec![
            a_record("a.root.test.", ROOT_SERVER, 3_600_000),
            a_record("b.root.test.", SECOND_ROOT_SERVER, 3_600_000),
        ],
    )
}

pub struct ResponseBuilder {
    response: UpstreamResponse,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            response: UpstreamResponse {
                id: 0,
                rcode: ResponseCode::NoError,
                answers: vec![],
                authorities: vec![],
                additionals: vec![],
            },
        }
    }

    /// Delegation of `zone` to `host` with glue `addr`.
    pub fn referral(zone: &str, host: &str, addr: Ipv4Addr) -> UpstreamResponse {
        Self::new()
            .authority(ns_record(zone, host))
            .additional(a_record(host, addr, 172_800))
            .build()
    }

    /// Delegation of `zone` to `host` without glue.
    pub fn glueless_referral(zone: &str, host: &str) -> UpstreamResponse {
        Self::new().authority(ns_record(zone, host)).build()
    }

    pub fn answer_a(host: &str, addr: Ipv4Addr, ttl: u32) -> UpstreamResponse {
        Self::new().answer(a_record(host, addr, ttl)).build()
    }

    pub fn answer(mut self, record: Record) -> Self {
        self.response.answers.push(record);
        self
    }

    pub fn authority(mut self, record: Record) -> Self {
        self.response.authorities.push(record);
        self
    }

    pub fn additional(mut self, record: Record) -> Self {
        self.response.additionals.push(record);
        self
    }

    pub fn build(self) -> UpstreamResponse {
        self.response
    }
}
