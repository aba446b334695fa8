use async_trait::async_trait;
use hickory_proto::rr::rdata::{A, NS};
use hickory_proto::rr::{Name, RData, Record};
use iterdns_application::ports::{RootHints, RootHintsSource};
use iterdns_domain::DomainError;
use std::net::Ipv4Addr;

const ROOT_NS_TTL: u32 = 518_400;
const ROOT_GLUE_TTL: u32 = 3_600_000;

/// IANA root servers (named.root) with their IPv4 glue.
const ROOT_SERVERS: [(&str, Ipv4Addr); 13] = [
    ("a.root-servers.net.", Ipv4Addr::new(198, 41, 0, 4)),
    ("b.root-servers.net.", Ipv4Addr::new(170, 247, 170, 2)),
    ("c.root-servers.net.", Ipv4Addr::new(192, 33, 4, 12)),
    ("d.root-servers.net.", Ipv4Addr::new(199, 7, 91, 13)),
    ("e.root-servers.net.", Ipv4Addr::new(192, 203, 230, 10)),
    ("f.root-servers.net.", Ipv4Addr::new(192, 5, 5, 241)),
    ("g.root-servers.net.", Ipv4Addr::new(192, 112, 36, 4)),
    ("h.root-servers.net.", Ipv4Addr::new(198, 97, 190, 53)),
    ("i.root-servers.net.", Ipv4Addr::new(192, 36, 148, 17)),
    ("j.root-servers.net.", Ipv4Addr::new(192, 58, 128, 30)),
    ("k.root-servers.net.", Ipv4Addr::new(193, 0, 14, 129)),
    ("l.root-servers.net.", Ipv4Addr::new(199, 7, 83, 42)),
    ("m.root-servers.net.", Ipv4Addr::new(202, 12, 27, 33)),
];

pub fn builtin_root_hints() -> RootHints {
    let mut authority = Vec::with_capacity(ROOT_SERVERS.len());
    let mut additional = Vec::with_capacity(ROOT_SERVERS.len());

    for (host, address) in ROOT_SERVERS {
        let Ok(host) = Name::from_ascii(host) else {
            continue;
        };
        authority.push(Record::from_rdata(
            Name::root(),
            ROOT_NS_TTL,
            RData::NS(NS(host.clone())),
        ));
        additional.push(Record::from_rdata(host, ROOT_GLUE_TTL, RData::A(A(address))));
    }

    RootHints::new(authority, additional)
}

/// Compiled-in root hints, the source of last resort.
#[derive(Debug, Default)]
pub struct BuiltinRootHints;

#[async_trait]
impl RootHintsSource for BuiltinRootHints {
    async fn fetch(&self) -> Result<RootHints, DomainError> {
        Ok(builtin_root_hints())
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}
