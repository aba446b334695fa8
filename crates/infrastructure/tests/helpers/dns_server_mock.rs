#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use iterdns_infrastructure::dns::codec::MessageBuilder;
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Clone)]
pub enum StubMode {
    /// Answer every question with one A record.
    Answer(Ipv4Addr),
    /// Reply with the given authority and additional sections.
    Referral {
        authority: Vec<Record>,
        additional: Vec<Record>,
    },
    /// Never reply.
    Silent,
    /// Reply with bytes that do not decode.
    Garbage,
    /// Reply with a valid answer under a different ID.
    WrongId(Ipv4Addr),
}

/// UDP authority on 127.0.0.1 with a fixed behavior.
pub struct StubAuthority {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StubAuthority {
    pub async fn start(mode: StubMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::build_response(&mode, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    fn build_response(mode: &StubMode, query: &[u8]) -> Option<Vec<u8>> {
        let request = Message::from_vec(query).ok()?;

        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code());
        for q in request.queries() {
            response.add_query(q.clone());
        }

        match mode {
            StubMode::Silent => return None,
            StubMode::Garbage => return Some(vec![0xde, 0xad, 0xbe, 0xef]),
            StubMode::Answer(addr) => {
                let qname = request.queries().first()?.name().clone();
                response.add_answer(Record::from_rdata(qname, 60, RData::A(A(*addr))));
            }
            StubMode::WrongId(addr) => {
                let qname = request.queries().first()?.name().clone();
                response.add_answer(Record::from_rdata(qname, 60, RData::A(A(*addr))));
                response.set_id(request.id().wrapping_add(1));
            }
            StubMode::Referral {
                authority,
                additional,
            } => {
                for record in authority {
                    response.add_name_server(record.clone());
                }
                for record in additional {
                    response.add_additional(record.clone());
                }
            }
        }

        MessageBuilder::serialize_message(&response).ok()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for StubAuthority {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
