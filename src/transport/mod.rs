//! # Wire Contract (v1)
//!
//! Serde types for the JSON documents exchanged with callers. Requests are
//! discriminated by `requestType`, responses by `responseType`; the
//! discriminator appears exactly once in every document.
//!
//! Optional fields are omitted from encoded output rather than written as
//! `null`.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

use crate::error::PipelineError;
use crate::model::Command;
use serde_json::Value;

/// The `requestType` values this contract understands.
pub fn known_request_kinds() -> impl Iterator<Item = &'static str> {
    Command::ALL.into_iter().map(Command::as_str)
}

/// Parses one request document.
///
/// A `requestType` outside the known set (or no discriminator at all) is an
/// [`PipelineError::UnknownRequestKind`]; a known kind with a malformed body is
/// a [`PipelineError::MalformedRequest`].
pub fn decode_json(input: &str) -> Result<TransportRequest, PipelineError> {
    let value: Value = serde_json::from_str(input).map_err(PipelineError::MalformedRequest)?;
    let kind = match value.get("requestType") {
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => other.to_string(),
        None => String::from("<missing>"),
    };
    if !known_request_kinds().any(|known| known == kind) {
        return Err(PipelineError::UnknownRequestKind(kind));
    }
    serde_json::from_value(value).map_err(PipelineError::MalformedRequest)
}

pub fn encode_json(response: &TransportResponse) -> Result<String, PipelineError> {
    Ok(serde_json::to_string(response)?)
}
