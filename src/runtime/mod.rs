/// Module containing the echo responder
pub mod echo;
/// Module containing the logic for the probe
pub mod probe;
