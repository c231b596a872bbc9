/// Module containing the exchange record and the error type
pub mod exchange;
/// Module rendering byte payloads as byte-string literals
pub mod literal;
/// Module writing the human readable report.
pub mod report;
