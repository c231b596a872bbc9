//! # UDP Probe
//!
//! A small toolkit for exercising a UDP request / response exchange.
//!
//! This crate provides the probe that sends one datagram and waits for the reply, the
//! echo responder it is usually pointed at, and the report formatting used by both binaries.
//!
//! Refer to the included binaries for complete usage.
/// Module containing the exchange record, its errors and the report formatting
pub mod datagram;
pub mod logging;
/// Module containing the socket driving probe and echo responder
pub mod runtime;
/// Module containing the probe and responder configuration
pub mod settings;
