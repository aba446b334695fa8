use iterdns_infrastructure::dns::server::DnsServerHandler;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

const MAX_DATAGRAM_SIZE: usize = 4096;

/// Receives client datagrams and answers each one on its own task.
pub async fn start_dns_server(bind_addr: String, handler: DnsServerHandler) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(UdpSocket::bind(socket_addr).await?);

    info!(bind_address = %socket.local_addr()?, "DNS server ready");

    let handler = Arc::new(handler);
    let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP receive failed");
                continue;
            }
        };

        let query_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = Arc::clone(&handler);
        let socket = Arc::clone(&socket);

        tokio::spawn(async move {
            let Some(response) = handler.handle_raw(&query_buf, from.ip()).await else {
                debug!(client = %from, "No reply for datagram");
                return;
            };

            if let Err(e) = socket.send_to(&response, from).await {
                error!(client = %from, error = %e, "Failed to send DNS response");
            }
        });
    }
}
