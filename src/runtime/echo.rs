use std::{
    net::SocketAddr,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use tokio::{net::UdpSocket, task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

use crate::{datagram::exchange::ProbeError, settings::EchoConfig};

/// Handle to a running echo responder.
///
/// Dropping the handle stops the responder.
#[derive(Debug)]
pub struct EchoServer {
    local_addr: SocketAddr,
    closed: AtomicBool,
    task: JoinHandle<()>,
}

/// The socket the responder answers on and the size of its receive buffer.
#[derive(Debug)]
struct EchoState {
    socket: UdpSocket,
    receive_buffer: usize,
}

impl EchoServer {
    /// The address the responder is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Returns true once `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Stops answering datagrams. Calling it again has no further effect.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.task.abort();
        info!(addr = %self.local_addr, "echo responder closed");
    }
}

impl Drop for EchoServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl EchoState {
    /// Called on an `EchoState`, sending every datagram back to where it came from.
    ///
    /// Runs until the task is aborted.
    async fn listen(self) {
        let mut buf = vec![0u8; self.receive_buffer];
        loop {
            match self.socket.recv_from(&mut buf).await {
                Ok((len, peer)) => {
                    debug!(%peer, len, "echoing datagram");
                    if let Err(error) = self.socket.send_to(&buf[..len], peer).await {
                        warn!(%peer, %error, "failed to echo datagram");
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to receive datagram");
                    sleep(Duration::from_millis(50)).await;
                }
            }
        }
    }
}

/// Binds the echo responder and starts answering datagrams on a spawned task.
///
/// # Errors
///
/// Returns a `ProbeError::Bind` if the socket cannot be bound.
pub async fn serve_echo(config: &EchoConfig) -> Result<EchoServer, ProbeError> {
    let addr = config.bind_addr();
    let socket = UdpSocket::bind(addr)
        .await
        .map_err(|source| ProbeError::Bind { addr, source })?;
    let local_addr = socket.local_addr()?;
    info!(addr = %local_addr, "echo responder listening");

    let state = EchoState {
        socket,
        receive_buffer: config.receive_buffer,
    };
    let task = tokio::spawn(async move {
        state.listen().await;
    });

    Ok(EchoServer {
        local_addr,
        closed: AtomicBool::new(false),
        task,
    })
}
