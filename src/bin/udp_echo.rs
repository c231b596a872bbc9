//! # UDP Echo Responder
//!
//! Listens on 127.0.0.1:16000 and sends every datagram back to its sender until interrupted.
use tracing::info;
use udpprobe::{
    datagram::exchange::ProbeError, logging::init_tracing, runtime::echo::serve_echo,
    settings::EchoConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ProbeError> {
    init_tracing("info");
    let config = EchoConfig::load()?;
    let server = serve_echo(&config).await?;

    tokio::signal::ctrl_c().await?;
    info!("interrupted");
    server.close();
    Ok(())
}
