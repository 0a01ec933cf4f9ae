//! Response side of the v1 wire contract.

use serde::{Deserialize, Serialize};

/// A response as it leaves on the wire, discriminated by `responseType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "responseType", rename_all = "lowercase")]
pub enum TransportResponse {
    Create(SingleStreamResponse),
    Read(SingleStreamResponse),
    Update(SingleStreamResponse),
    Delete(SingleStreamResponse),
    Search(MultiStreamResponse),
    Enable(SingleStreamResponse),
    Disable(SingleStreamResponse),
    Accessible(MultiStreamResponse),
}

impl TransportResponse {
    pub fn result(&self) -> Option<ResponseResult> {
        match self {
            TransportResponse::Create(r)
            | TransportResponse::Read(r)
            | TransportResponse::Update(r)
            | TransportResponse::Delete(r)
            | TransportResponse::Enable(r)
            | TransportResponse::Disable(r) => r.result,
            TransportResponse::Search(r) | TransportResponse::Accessible(r) => r.result,
        }
    }

    pub fn errors(&self) -> Option<&[TransportError]> {
        match self {
            TransportResponse::Create(r)
            | TransportResponse::Read(r)
            | TransportResponse::Update(r)
            | TransportResponse::Delete(r)
            | TransportResponse::Enable(r)
            | TransportResponse::Disable(r) => r.errors.as_deref(),
            TransportResponse::Search(r) | TransportResponse::Accessible(r) => r.errors.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseResult {
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A stream on the wire. `id` is the only optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponseObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub class_short_name: String,
    pub method_short_name: String,
    pub transport_params: String,
    pub description: String,
    pub active: bool,
}

/// Create, read, update, delete, enable and disable answer with one stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleStreamResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResponseResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TransportError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamResponseObject>,
}

/// Search and accessible answer with a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiStreamResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResponseResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TransportError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streams: Option<Vec<StreamResponseObject>>,
}

/// Generic failure document written when a request can't be answered in its
/// own response variant (undecodable input, internal-consistency failures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub result: ResponseResult,
    pub errors: Vec<TransportError>,
}
