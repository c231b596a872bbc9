//! # UDP Probe
//!
//! Sends `Hello, World!` from 127.0.0.1:5005 to 127.0.0.1:16000 and prints the reply.
//!
//! The probe waits for the reply without a timeout. Run `udp_echo` first, or any other
//! listener on port 16000 that answers the sender.
use std::io;

use udpprobe::{
    datagram::{
        exchange::ProbeError,
        report::{write_config_report, write_response_report},
    },
    logging::init_tracing,
    runtime::probe::probe,
    settings::ProbeConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ProbeError> {
    init_tracing("warn");
    let config = ProbeConfig::load()?;

    write_config_report(&mut io::stdout(), &config)?;
    let exchange = probe(&config).await?;
    write_response_report(&mut io::stdout(), &exchange)?;
    Ok(())
}
