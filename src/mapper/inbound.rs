//! Transport request → [`RequestContext`].
//!
//! Every variant is decoded the same way: pick the command, convert its payload
//! into the domain shape, then translate the shared `debug` object once.

use crate::context::{RequestContext, StreamRequest};
use crate::model::{ExternalSystemId, Stream, StreamFilter, StreamId, StubCase, WorkMode};
use crate::transport::{
    DebugMode, DebugStub, StreamCreateObject, StreamDebug, StreamSearchFilter,
    StreamUpdateObject, TransportRequest,
};
use tracing::debug;

/// Builds a fresh context from a decoded transport request.
pub fn from_transport(request: TransportRequest) -> RequestContext {
    let mut ctx = RequestContext::new();
    ctx.load_transport(request);
    ctx
}

impl RequestContext {
    /// Populates command, work mode, stub case and request payload.
    pub fn load_transport(&mut self, request: TransportRequest) {
        let (work_mode, stub_case) = debug_to_internal(request.debug());
        self.work_mode = work_mode;
        self.stub_case = stub_case;

        let payload = match request {
            TransportRequest::Create(r) => {
                StreamRequest::Create(r.stream.map(create_to_internal).unwrap_or_default())
            }
            TransportRequest::Update(r) => {
                StreamRequest::Update(r.stream.map(update_to_internal).unwrap_or_default())
            }
            TransportRequest::Read(r) => StreamRequest::Read(id_to_internal(r.stream_id)),
            TransportRequest::Delete(r) => StreamRequest::Delete(id_to_internal(r.stream_id)),
            TransportRequest::Enable(r) => StreamRequest::Enable(id_to_internal(r.stream_id)),
            TransportRequest::Disable(r) => StreamRequest::Disable(id_to_internal(r.stream_id)),
            TransportRequest::Search(r) => {
                StreamRequest::Search(r.stream_filter.map(filter_to_internal).unwrap_or_default())
            }
            TransportRequest::Accessible(r) => StreamRequest::Accessible(
                r.external_system_id
                    .map(ExternalSystemId::from)
                    .unwrap_or_default(),
            ),
        };
        self.set_request(payload);
        debug!(command = %self.command(), %work_mode, %stub_case, "Decoded request");
    }
}

/// Shared translation of the `debug` object. The two fields are independent.
fn debug_to_internal(debug: Option<&StreamDebug>) -> (WorkMode, StubCase) {
    let Some(debug) = debug else {
        return (WorkMode::Prod, StubCase::None);
    };
    let work_mode = match debug.mode {
        Some(DebugMode::Test) => WorkMode::Test,
        Some(DebugMode::Stub) => WorkMode::Stub,
        Some(DebugMode::Prod) | Some(DebugMode::Unrecognized) | None => WorkMode::Prod,
    };
    let stub_case = match debug.stub {
        Some(DebugStub::Success) => StubCase::Success,
        Some(DebugStub::NotFound) => StubCase::NotFound,
        Some(DebugStub::BadId) => StubCase::BadId,
        Some(DebugStub::BadClass) => StubCase::BadClass,
        Some(DebugStub::BadMethod) => StubCase::BadMethod,
        Some(DebugStub::BadDescription) => StubCase::BadDescription,
        Some(DebugStub::CannotDelete) => StubCase::CannotDelete,
        Some(DebugStub::BadSearchString) => StubCase::BadSearchString,
        Some(DebugStub::DbError) => StubCase::DbError,
        Some(DebugStub::Unrecognized) | None => StubCase::None,
    };
    (work_mode, stub_case)
}

fn id_to_internal(id: Option<String>) -> Stream {
    id.map(|id| Stream::with_id(StreamId::from(id)))
        .unwrap_or_default()
}

fn create_to_internal(stream: StreamCreateObject) -> Stream {
    Stream {
        id: StreamId::NONE,
        description: stream.description.unwrap_or_default(),
        class_short_name: stream.class_short_name.unwrap_or_default(),
        method_short_name: stream.method_short_name.unwrap_or_default(),
        transport_params: stream.transport_params.unwrap_or_default(),
        active: false,
    }
}

fn update_to_internal(stream: StreamUpdateObject) -> Stream {
    Stream {
        id: stream.id.map(StreamId::from).unwrap_or(StreamId::NONE),
        description: stream.description.unwrap_or_default(),
        class_short_name: stream.class_short_name.unwrap_or_default(),
        method_short_name: stream.method_short_name.unwrap_or_default(),
        transport_params: stream.transport_params.unwrap_or_default(),
        active: false,
    }
}

fn filter_to_internal(filter: StreamSearchFilter) -> StreamFilter {
    StreamFilter {
        search_string: filter.search_string.unwrap_or_default(),
        class_short_name: filter.class_short_name.unwrap_or_default(),
        method_short_name: filter.method_short_name.unwrap_or_default(),
        active: filter.active.unwrap_or(false),
    }
}
