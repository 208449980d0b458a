//! Parsing of server response bodies into typed results
//!
//! Each parser takes the raw body of a 2xx response. Shape mismatches become
//! [`ConsoleError::Format`]; a mutation acknowledgement carrying `error` instead of
//! `mensaje` is the server's way of saying the record does not exist.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConsoleError, Result};
use crate::models::{Record, RecordId, StatisticsSnapshot, StatsResponse};

#[derive(Debug, Deserialize)]
struct RecordsEnvelope {
    registros: Vec<Record>,
}

/// Parse `{registros: Record[]}`; a missing or null `registros` is a format error
pub fn parse_records(body: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(body)?;
    if value.get("registros").is_none_or(Value::is_null) {
        return Err(ConsoleError::Format("response is missing 'registros'".to_string()));
    }
    let envelope: RecordsEnvelope = serde_json::from_value(value)?;
    Ok(envelope.registros)
}

/// Parse the `{mensaje}` acknowledgement of an update or delete
pub fn parse_mutation_ack(id: RecordId, body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    if let Some(message) = value.get("mensaje").and_then(Value::as_str) {
        return Ok(message.to_string());
    }
    if value.get("error").is_some() {
        return Err(ConsoleError::NotFound(id));
    }
    Err(ConsoleError::Format("acknowledgement is missing 'mensaje'".to_string()))
}

/// Parse `{estadisticas, tendencias}` into a snapshot
pub fn parse_snapshot(body: &str) -> Result<StatisticsSnapshot> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(ConsoleError::Format("statistics response is not an object".to_string()));
    }
    let response: StatsResponse = serde_json::from_value(value)?;
    Ok(response.into())
}

/// Parse `{archivo: url}` from the PDF job endpoint
pub fn parse_pdf_location(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    value
        .get("archivo")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConsoleError::Format("no report file was generated".to_string()))
}
