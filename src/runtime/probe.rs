use bytes::Bytes;
use tokio::net::UdpSocket;
use tracing::debug;

use crate::{
    datagram::exchange::{DatagramExchange, ProbeError},
    settings::ProbeConfig,
};

/// Sends the configured payload as one datagram and waits for a single reply.
///
/// The socket is bound to the configured local address, so a second probe on the same port
/// fails while the first one is still waiting. There is no timeout, the returned future only
/// completes once a datagram arrives or the OS reports an error. The reply is accepted from
/// any sender and cut to `receive_buffer` bytes.
///
/// # Errors
///
/// Returns a `ProbeError` if binding, sending or receiving fails.
pub async fn probe(config: &ProbeConfig) -> Result<DatagramExchange, ProbeError> {
    let bind_addr = config.bind_addr();
    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|source| ProbeError::Bind { addr: bind_addr, source })?;
    let local_bind = socket.local_addr()?;
    debug!(%local_bind, "bound probe socket");

    // send_to keeps the socket unconnected so an ICMP port unreachable is not reported on recv
    let target = config.target_addr();
    let payload = Bytes::copy_from_slice(config.payload.as_bytes());
    // A datagram is sent whole or not at all
    let sent = socket
        .send_to(&payload, target)
        .await
        .map_err(|source| ProbeError::Send { target, source })?;
    debug!(%target, sent, "sent payload");

    let mut buffer = vec![0u8; config.receive_buffer];
    let (len, response_peer) = socket.recv_from(&mut buffer).await.map_err(ProbeError::Receive)?;
    buffer.truncate(len);
    debug!(%response_peer, len, "received response");

    Ok(DatagramExchange {
        local_bind,
        target,
        payload,
        response: Bytes::from(buffer),
        response_peer,
    })
}

#[cfg(test)]
mod tests {
    use std::{
        net::{IpAddr, Ipv4Addr, SocketAddr},
        time::Duration,
    };

    use tokio::{net::UdpSocket, time::timeout};

    use crate::{
        datagram::{exchange::ProbeError, report::write_response_report},
        runtime::{echo::serve_echo, probe::probe},
        settings::{EchoConfig, ProbeConfig},
    };

    fn loopback(port: u16) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
    }

    fn probe_config(target: SocketAddr) -> ProbeConfig {
        ProbeConfig::load()
            .expect("Defaults should load")
            .with_bind(loopback(0))
            .with_target(target)
    }

    #[tokio::test]
    async fn probe_receives_echoed_payload() {
        let echo_config = EchoConfig::load().unwrap().with_bind(loopback(0));
        let server = serve_echo(&echo_config).await.expect("Failed to start echo responder");

        let config = probe_config(server.local_addr());
        let exchange = timeout(Duration::from_secs(5), probe(&config))
            .await
            .expect("Test timed out")
            .expect("Probe failed");

        assert_eq!(&exchange.response[..], b"Hello, World!");
        assert!(exchange.is_echo());
        assert_eq!(exchange.response_peer, server.local_addr());

        let mut buffer = Vec::new();
        write_response_report(&mut buffer, &exchange).unwrap();
        assert_eq!(buffer, b"received message: b'Hello, World!'\n");
        server.close();
    }

    #[tokio::test]
    async fn payload_arrives_byte_exact() {
        let target = UdpSocket::bind(loopback(0)).await.unwrap();
        let config = probe_config(target.local_addr().unwrap());

        let task = tokio::spawn(async move { probe(&config).await });

        let mut buf = [0u8; 64];
        let (len, peer) = timeout(Duration::from_secs(5), target.recv_from(&mut buf))
            .await
            .expect("Test timed out")
            .unwrap();
        assert_eq!(len, 13);
        assert_eq!(&buf[..len], b"Hello, World!");

        target.send_to(b"ack", peer).await.unwrap();
        let exchange = task.await.unwrap().unwrap();
        assert_eq!(exchange.local_bind, peer);
        assert_eq!(&exchange.response[..], b"ack");
    }

    #[tokio::test]
    async fn second_probe_on_same_port_fails_to_bind() {
        let occupied = UdpSocket::bind(loopback(0)).await.unwrap();
        let port = occupied.local_addr().unwrap().port();
        let config = probe_config(loopback(16000)).with_bind(loopback(port));

        let result = probe(&config).await;

        match result {
            Err(ProbeError::Bind { addr, .. }) => assert_eq!(addr.port(), port),
            other => panic!("Expected a bind error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn probe_blocks_without_reply() {
        // Keep the target bound but silent so nothing answers
        let silent = UdpSocket::bind(loopback(0)).await.unwrap();
        let config = probe_config(silent.local_addr().unwrap());

        let result = timeout(Duration::from_millis(300), probe(&config)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn waits_when_target_port_is_unbound() {
        let freed = UdpSocket::bind(loopback(0)).await.unwrap();
        let target = freed.local_addr().unwrap();
        drop(freed);
        let config = probe_config(target);

        // Port unreachable must not end the wait with a receive error
        let result = timeout(Duration::from_millis(500), probe(&config)).await;

        match result {
            Err(_elapsed) => {}
            Ok(outcome) => panic!("Expected to keep waiting, got {outcome:?}"),
        }
    }

    #[tokio::test]
    async fn oversized_reply_is_truncated() {
        let target = UdpSocket::bind(loopback(0)).await.unwrap();
        let config = probe_config(target.local_addr().unwrap());

        tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let (_, peer) = target.recv_from(&mut buf).await.unwrap();
            target.send_to(&[b'x'; 2000], peer).await.unwrap();
        });

        let exchange = timeout(Duration::from_secs(5), probe(&config))
            .await
            .expect("Test timed out")
            .expect("Probe failed");

        assert_eq!(exchange.response.len(), 1024);
        assert!(exchange.response.iter().all(|&b| b == b'x'));
    }
}
