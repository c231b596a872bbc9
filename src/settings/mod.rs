use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use config::Config;
use serde::Deserialize;

use crate::datagram::exchange::ProbeError;

/// Loopback address both the probe and the responder use by default.
pub const DEFAULT_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
/// Port the probe binds locally.
pub const DEFAULT_BIND_PORT: u16 = 5005;
/// Port the probe sends to and the responder listens on.
pub const DEFAULT_TARGET_PORT: u16 = 16000;
/// Payload the probe sends.
pub const DEFAULT_PAYLOAD: &str = "Hello, World!";
/// Capacity of the receive buffer. Longer datagrams are truncated to this length.
pub const DEFAULT_RECEIVE_BUFFER: usize = 1024;

/// The receive buffer default as a config integer, matching how the ports are stored.
fn receive_buffer_default() -> Result<i64, ProbeError> {
    i64::try_from(DEFAULT_RECEIVE_BUFFER)
        .map_err(|error| ProbeError::Config(config::ConfigError::Message(error.to_string())))
}

/// Settings for a single probe run.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Local address the probe socket binds to.
    pub bind_address: IpAddr,
    /// Local port the probe socket binds to.
    pub bind_port: u16,
    /// Address the payload is sent to.
    pub target_address: IpAddr,
    /// Port the payload is sent to.
    pub target_port: u16,
    /// The payload sent as a single datagram.
    pub payload: String,
    /// Capacity of the buffer the response is read into.
    pub receive_buffer: usize,
}

impl ProbeConfig {
    /// Builds the probe settings from the compiled in defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ProbeError::Config` if the defaults cannot be deserialized.
    pub fn load() -> Result<Self, ProbeError> {
        let settings = Self::defaults()?.build()?;
        Self::from_config(&settings)
    }

    /// Deserializes the probe settings from an already built `Config`.
    ///
    /// Keys missing from `settings` are an error, layer it on top of [`ProbeConfig::defaults`]
    /// to only override some of them.
    ///
    /// # Errors
    ///
    /// Returns a `ProbeError::Config` if a key is missing or holds a value of the wrong type.
    pub fn from_config(settings: &Config) -> Result<Self, ProbeError> {
        Ok(settings.clone().try_deserialize()?)
    }

    /// Returns a config builder pre-populated with the default probe settings.
    ///
    /// # Errors
    ///
    /// Returns a `ProbeError::Config` if a default cannot be set.
    pub fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ProbeError> {
        Ok(Config::builder()
            .set_default("bind_address", DEFAULT_ADDRESS.to_string())?
            .set_default("bind_port", i64::from(DEFAULT_BIND_PORT))?
            .set_default("target_address", DEFAULT_ADDRESS.to_string())?
            .set_default("target_port", i64::from(DEFAULT_TARGET_PORT))?
            .set_default("payload", DEFAULT_PAYLOAD)?
            .set_default("receive_buffer", receive_buffer_default()?)?)
    }

    /// Replaces the local address and port.
    #[must_use]
    pub fn with_bind(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr.ip();
        self.bind_port = addr.port();
        self
    }

    /// Replaces the target address and port.
    #[must_use]
    pub fn with_target(mut self, addr: SocketAddr) -> Self {
        self.target_address = addr.ip();
        self.target_port = addr.port();
        self
    }

    /// Replaces the receive buffer capacity.
    #[must_use]
    pub fn with_receive_buffer(mut self, capacity: usize) -> Self {
        self.receive_buffer = capacity;
        self
    }

    /// The local socket address the probe binds to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.bind_port)
    }

    /// The socket address the payload is sent to.
    #[must_use]
    pub const fn target_addr(&self) -> SocketAddr {
        SocketAddr::new(self.target_address, self.target_port)
    }
}

/// Settings for the echo responder.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct EchoConfig {
    /// Address the responder listens on.
    pub bind_address: IpAddr,
    /// Port the responder listens on.
    pub bind_port: u16,
    /// Capacity of the buffer each datagram is read into.
    pub receive_buffer: usize,
}

impl EchoConfig {
    /// Builds the responder settings from the compiled in defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ProbeError::Config` if the defaults cannot be deserialized.
    pub fn load() -> Result<Self, ProbeError> {
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_ADDRESS.to_string())?
            .set_default("bind_port", i64::from(DEFAULT_TARGET_PORT))?
            .set_default("receive_buffer", receive_buffer_default()?)?
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Replaces the listen address and port.
    #[must_use]
    pub fn with_bind(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr.ip();
        self.bind_port = addr.port();
        self
    }

    /// The socket address the responder listens on.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.bind_port)
    }
}
