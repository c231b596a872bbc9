use std::io::Write;

use crate::{
    datagram::{exchange::DatagramExchange, exchange::ProbeError, literal::bytes_literal},
    settings::ProbeConfig,
};

/// Writes the target address, target port and payload lines to the passed writer.
///
/// # Errors
///
/// Returns a `ProbeError` if the writer fails.
pub fn write_config_report<W: Write>(writer: &mut W, config: &ProbeConfig) -> Result<(), ProbeError> {
    writeln!(writer, "UDP target IP: {}", config.target_address)?;
    writeln!(writer, "UDP target port: {}", config.target_port)?;
    writeln!(writer, "message: {}", bytes_literal(config.payload.as_bytes()))?;
    writer.flush()?;
    Ok(())
}

/// Writes the received message line to the passed writer.
///
/// # Errors
///
/// Returns a `ProbeError` if the writer fails.
pub fn write_response_report<W: Write>(writer: &mut W, exchange: &DatagramExchange) -> Result<(), ProbeError> {
    writeln!(writer, "received message: {}", bytes_literal(&exchange.response))?;
    writer.flush()?;
    Ok(())
}
