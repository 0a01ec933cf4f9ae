//! Canned answers for [`WorkMode::Stub`](crate::model::WorkMode::Stub).
//!
//! The table is keyed by `(command, stub case)` and touches nothing outside the
//! context, so the mappers and the transport layer can be exercised without a
//! backend.

use crate::context::{RequestContext, StreamRequest, StreamResponse};
use crate::error::PipelineError;
use crate::executor::CommandExecutor;
use crate::model::{Command, State, Stream, StreamId, StructuredError, StubCase};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Id given to a stream created in stub mode.
pub const STUB_STREAM_ID: &str = "stub-0001";

/// The `(state, errors, response)` triple a stub case resolves to.
/// `response` is `None` when the empty payload of the command's shape is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubOutcome {
    pub state: State,
    pub errors: Vec<StructuredError>,
    pub response: Option<StreamResponse>,
}

impl StubOutcome {
    fn success(response: StreamResponse) -> Self {
        Self {
            state: State::Finishing,
            errors: Vec::new(),
            response: Some(response),
        }
    }

    fn failure(error: StructuredError) -> Self {
        Self {
            state: State::Failing,
            errors: vec![error],
            response: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StubExecutor;

impl StubExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Looks up the canned outcome. Only an unset stub case is an `Err`.
    pub fn outcome(
        &self,
        request: &StreamRequest,
        case: StubCase,
    ) -> Result<StubOutcome, PipelineError> {
        use Command as C;

        let command = request.command();
        let outcome = match (command, case) {
            (_, StubCase::None) => return Err(PipelineError::MissingStubCase),

            (C::None, _) => unsupported(command, case),
            (_, StubCase::Success) => StubOutcome::success(success_response(request)),

            (C::Read | C::Update | C::Delete | C::Enable | C::Disable, StubCase::NotFound) => {
                StubOutcome::failure(StructuredError::not_found(requested_id(request)))
            }
            (
                C::Read | C::Update | C::Delete | C::Enable | C::Disable | C::Accessible,
                StubCase::BadId,
            ) => StubOutcome::failure(StructuredError::validation("id", "Wrong id format")),
            (C::Create | C::Update | C::Search, StubCase::BadClass) => StubOutcome::failure(
                StructuredError::validation("classShortName", "Wrong class short name"),
            ),
            (C::Create | C::Update | C::Search, StubCase::BadMethod) => StubOutcome::failure(
                StructuredError::validation("methodShortName", "Wrong method short name"),
            ),
            (C::Create | C::Update, StubCase::BadDescription) => StubOutcome::failure(
                StructuredError::validation("description", "Wrong description"),
            ),
            (C::Delete, StubCase::CannotDelete) => StubOutcome::failure(StructuredError::new(
                "cannot-delete",
                "business",
                format!("Stream {} cannot be deleted", requested_id(request)),
            )),
            (C::Search, StubCase::BadSearchString) => StubOutcome::failure(
                StructuredError::validation("searchString", "Wrong search string"),
            ),
            (_, StubCase::DbError) => StubOutcome::failure(StructuredError::internal(
                "db-error",
                "Database is unavailable",
            )),

            _ => unsupported(command, case),
        };
        Ok(outcome)
    }
}

#[async_trait]
impl CommandExecutor for StubExecutor {
    async fn execute(&self, ctx: &mut RequestContext) -> Result<(), PipelineError> {
        let outcome = self.outcome(ctx.request(), ctx.stub_case)?;
        debug!(command = %ctx.command(), stub = %ctx.stub_case, state = ?outcome.state, "Stub answered");

        ctx.state = outcome.state;
        ctx.errors.extend(outcome.errors);
        if let Some(response) = outcome.response {
            ctx.set_response(response);
        }
        Ok(())
    }
}

fn unsupported(command: Command, case: StubCase) -> StubOutcome {
    warn!(%command, stub = %case, "No stub for this combination");
    StubOutcome::failure(StructuredError::new(
        "stub-unsupported",
        "stub",
        format!("Stub case {case} is not defined for {command}"),
    ))
}

fn requested_id(request: &StreamRequest) -> StreamId {
    request
        .stream()
        .map(|stream| stream.id.clone())
        .unwrap_or_default()
}

fn canned_stream() -> Stream {
    Stream {
        id: StreamId::from(STUB_STREAM_ID),
        description: "Client export to the tax service".to_string(),
        class_short_name: "CLIENT".to_string(),
        method_short_name: "EXPORT2FNS".to_string(),
        transport_params: "queue=fns.export".to_string(),
        active: true,
    }
}

fn canned_streams() -> Vec<Stream> {
    vec![
        canned_stream(),
        Stream {
            id: StreamId::from("stub-0002"),
            description: "Corporate loan contract signing".to_string(),
            class_short_name: "KRED_CORP".to_string(),
            method_short_name: "SIGN".to_string(),
            transport_params: "queue=kred.sign".to_string(),
            active: false,
        },
    ]
}

fn success_response(request: &StreamRequest) -> StreamResponse {
    match request {
        StreamRequest::None => StreamResponse::default(),
        StreamRequest::Create(stream) => StreamResponse::Single(Stream {
            id: StreamId::from(STUB_STREAM_ID),
            active: false,
            ..stream.clone()
        }),
        StreamRequest::Update(stream) => StreamResponse::Single(Stream {
            active: canned_stream().active,
            ..stream.clone()
        }),
        StreamRequest::Read(stream) | StreamRequest::Delete(stream) => StreamResponse::Single(Stream {
            id: stream.id.clone(),
            ..canned_stream()
        }),
        StreamRequest::Enable(stream) => StreamResponse::Single(Stream {
            id: stream.id.clone(),
            active: true,
            ..canned_stream()
        }),
        StreamRequest::Disable(stream) => StreamResponse::Single(Stream {
            id: stream.id.clone(),
            active: false,
            ..canned_stream()
        }),
        StreamRequest::Search(_) => StreamResponse::Many(canned_streams()),
        StreamRequest::Accessible(_) => StreamResponse::Many(
            canned_streams().into_iter().filter(|s| s.active).collect(),
        ),
    }
}
