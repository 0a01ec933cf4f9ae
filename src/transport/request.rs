//! Request side of the v1 wire contract.

use serde::{Deserialize, Serialize};

/// A request as it arrives on the wire, discriminated by `requestType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "requestType", rename_all = "lowercase")]
pub enum TransportRequest {
    Create(CreateRequest),
    Read(IdRequest),
    Update(UpdateRequest),
    Delete(IdRequest),
    Search(SearchRequest),
    Enable(IdRequest),
    Disable(IdRequest),
    Accessible(AccessibleRequest),
}

impl TransportRequest {
    /// The debug sub-object every variant may carry.
    pub fn debug(&self) -> Option<&StreamDebug> {
        match self {
            TransportRequest::Create(r) => r.debug.as_ref(),
            TransportRequest::Update(r) => r.debug.as_ref(),
            TransportRequest::Read(r)
            | TransportRequest::Delete(r)
            | TransportRequest::Enable(r)
            | TransportRequest::Disable(r) => r.debug.as_ref(),
            TransportRequest::Search(r) => r.debug.as_ref(),
            TransportRequest::Accessible(r) => r.debug.as_ref(),
        }
    }
}

/// Execution-mode selection sent by callers that want test or stub answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDebug {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<DebugMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stub: Option<DebugStub>,
}

/// `debug.mode`. Values outside the contract decode as `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DebugMode {
    Prod,
    Test,
    Stub,
    #[serde(skip_serializing)]
    Unrecognized,
}

impl From<String> for DebugMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "prod" => DebugMode::Prod,
            "test" => DebugMode::Test,
            "stub" => DebugMode::Stub,
            _ => DebugMode::Unrecognized,
        }
    }
}

/// `debug.stub`. Values outside the contract decode as `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DebugStub {
    Success,
    NotFound,
    BadId,
    BadClass,
    BadMethod,
    BadDescription,
    CannotDelete,
    BadSearchString,
    DbError,
    #[serde(skip_serializing)]
    Unrecognized,
}

impl From<String> for DebugStub {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => DebugStub::Success,
            "not_found" => DebugStub::NotFound,
            "bad_id" => DebugStub::BadId,
            "bad_class" => DebugStub::BadClass,
            "bad_method" => DebugStub::BadMethod,
            "bad_description" => DebugStub::BadDescription,
            "cannot_delete" => DebugStub::CannotDelete,
            "bad_search_string" => DebugStub::BadSearchString,
            "db_error" => DebugStub::DbError,
            _ => DebugStub::Unrecognized,
        }
    }
}

/// Stream fields accepted on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamCreateObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_params: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Stream fields accepted on update: the create fields plus the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamUpdateObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_params: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSearchFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<StreamDebug>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamCreateObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<StreamDebug>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<StreamUpdateObject>,
}

/// Read, delete, enable and disable address a stream by bare id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<StreamDebug>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<StreamDebug>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_filter: Option<StreamSearchFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<StreamDebug>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_system_id: Option<String>,
}
