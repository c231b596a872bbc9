use std::net::SocketAddr;

use bytes::Bytes;
use thiserror::Error;

/// Record of a single request / response exchange performed by the probe.
///
/// Lives only as long as the probe run that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatagramExchange {
    /// The local address and port the probe socket was bound to.
    pub local_bind: SocketAddr,
    /// The address and port the payload was sent to.
    pub target: SocketAddr,
    /// The bytes that were sent.
    pub payload: Bytes,
    /// The bytes that came back, cut to the receive buffer capacity.
    pub response: Bytes,
    /// The address the response arrived from.
    pub response_peer: SocketAddr,
}

impl DatagramExchange {
    /// Returns true if the response is byte-for-byte the payload that was sent.
    #[must_use]
    pub fn is_echo(&self) -> bool {
        self.response == self.payload
    }
}

/// Represents the kind of error that can occur while probing or echoing.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The local socket could not be bound, usually because the port is already in use.
    #[error("failed to bind UDP socket to {addr}: {source}")]
    Bind {
        /// The address the bind was attempted on.
        addr: SocketAddr,
        /// The underlying OS error.
        source: std::io::Error,
    },

    /// The payload could not be sent to the target.
    #[error("failed to send datagram to {target}: {source}")]
    Send {
        /// The target the datagram was addressed to.
        target: SocketAddr,
        /// The underlying OS error.
        source: std::io::Error,
    },

    /// Waiting for the response failed.
    #[error("failed to receive datagram: {0}")]
    Receive(#[source] std::io::Error),

    /// The configuration could not be built or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// There was a generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
