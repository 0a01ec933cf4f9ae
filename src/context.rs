//! # Request Context
//!
//! [`RequestContext`] is the per-request aggregate threaded through the
//! pipeline: the inbound mapper fills the request side, an executor fills the
//! outcome side, and the outbound mapper reads the result.
//!
//! Payloads are tagged unions. [`StreamRequest`] carries exactly the input the
//! command needs, so "which field is meaningful" is decided by the variant and
//! not by convention. The command itself is derived from that variant.

use crate::model::{
    Command, ExternalSystemId, RequestId, State, Stream, StreamFilter, StructuredError, StubCase,
    WorkMode,
};
use chrono::{DateTime, Utc};

/// Decoded input payload, one variant per command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StreamRequest {
    #[default]
    None,
    Create(Stream),
    Read(Stream),
    Update(Stream),
    Delete(Stream),
    Search(StreamFilter),
    Enable(Stream),
    Disable(Stream),
    Accessible(ExternalSystemId),
}

impl StreamRequest {
    pub fn command(&self) -> Command {
        match self {
            StreamRequest::None => Command::None,
            StreamRequest::Create(_) => Command::Create,
            StreamRequest::Read(_) => Command::Read,
            StreamRequest::Update(_) => Command::Update,
            StreamRequest::Delete(_) => Command::Delete,
            StreamRequest::Search(_) => Command::Search,
            StreamRequest::Enable(_) => Command::Enable,
            StreamRequest::Disable(_) => Command::Disable,
            StreamRequest::Accessible(_) => Command::Accessible,
        }
    }

    /// The stream payload of the single-resource commands.
    pub fn stream(&self) -> Option<&Stream> {
        match self {
            StreamRequest::Create(s)
            | StreamRequest::Read(s)
            | StreamRequest::Update(s)
            | StreamRequest::Delete(s)
            | StreamRequest::Enable(s)
            | StreamRequest::Disable(s) => Some(s),
            _ => None,
        }
    }
}

/// Output payload: one stream or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamResponse {
    Single(Stream),
    Many(Vec<Stream>),
}

impl StreamResponse {
    /// The empty payload of the shape `command` answers with.
    pub fn empty_for(command: Command) -> Self {
        if command.is_multi() {
            StreamResponse::Many(Vec::new())
        } else {
            StreamResponse::Single(Stream::none())
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, StreamResponse::Many(_))
    }
}

impl Default for StreamResponse {
    fn default() -> Self {
        StreamResponse::Single(Stream::none())
    }
}

/// The single mutable aggregate for one request. Never shared between requests.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub state: State,
    pub errors: Vec<StructuredError>,

    pub work_mode: WorkMode,
    pub stub_case: StubCase,

    pub request_id: RequestId,
    pub time_start: Option<DateTime<Utc>>,

    request: StreamRequest,
    response: StreamResponse,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(&self) -> Command {
        self.request.command()
    }

    pub fn request(&self) -> &StreamRequest {
        &self.request
    }

    /// Installs the decoded input and resets the response to the matching shape.
    pub fn set_request(&mut self, request: StreamRequest) {
        self.response = StreamResponse::empty_for(request.command());
        self.request = request;
    }

    pub fn response(&self) -> &StreamResponse {
        &self.response
    }

    pub fn set_stream_response(&mut self, stream: Stream) {
        self.response = StreamResponse::Single(stream);
    }

    pub fn set_streams_response(&mut self, streams: Vec<Stream>) {
        self.response = StreamResponse::Many(streams);
    }

    /// Replaces the response wholesale; the post-condition check validates the shape.
    pub fn set_response(&mut self, response: StreamResponse) {
        self.response = response;
    }

    pub fn add_error(&mut self, error: StructuredError) {
        self.errors.push(error);
    }

    /// Appends the errors and marks the request as failing.
    pub fn fail(&mut self, errors: impl IntoIterator<Item = StructuredError>) {
        self.errors.extend(errors);
        self.state = State::Failing;
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
