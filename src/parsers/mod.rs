//! Parsers for server response bodies.
//!
//! - `responses`: turns raw 2xx bodies into records, snapshots and acknowledgements
//! - `deserializers`: lenient field deserializers shared by the models
//!
//! The server is loosely typed (counts as strings, weekday indexes from SQLite,
//! nullable text), so field-level leniency lives here and shape-level strictness
//! (a missing `registros`) is reported as a format error.

pub mod deserializers;
pub mod responses;

pub use responses::{parse_mutation_ack, parse_pdf_location, parse_records, parse_snapshot};
