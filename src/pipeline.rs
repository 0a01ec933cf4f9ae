//! # Pipeline
//!
//! Runs one request end to end:
//!
//! ```text
//! TransportRequest ─► inbound mapper ─► ExecutorSet::select(work mode)
//!        ─► execute ─► post-conditions ─► outbound mapper ─► TransportResponse
//! ```
//!
//! Each call builds its own [`RequestContext`]; nothing mutable is shared
//! between requests, so a [`Pipeline`] can be cloned into as many tasks as
//! needed.

use crate::context::RequestContext;
use crate::error::PipelineError;
use crate::executor::{ensure_postconditions, ExecutorSet};
use crate::mapper::to_transport;
use crate::model::RequestId;
use crate::transport::{
    decode_json, encode_json, FailureResponse, ResponseResult, TransportError, TransportRequest,
    TransportResponse,
};
use chrono::Utc;
use tokio::task::JoinError;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Written when even the failure document can't be serialized.
const FALLBACK_FAILURE: &str =
    r#"{"result":"error","errors":[{"code":"serialization","group":"internal"}]}"#;

#[derive(Clone)]
pub struct Pipeline {
    executors: ExecutorSet,
}

impl Pipeline {
    pub fn new(executors: ExecutorSet) -> Self {
        Self { executors }
    }

    /// Answers a decoded request with its own response variant.
    ///
    /// Domain failures come back as `Ok` with `result = error`; an `Err` means
    /// the request could not be answered in its own variant at all.
    pub async fn process(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, PipelineError> {
        let mut ctx = RequestContext::new();
        ctx.request_id = RequestId::generate();
        ctx.time_start = Some(Utc::now());
        ctx.load_transport(request);

        let span = info_span!(
            "request",
            request_id = %ctx.request_id,
            command = %ctx.command(),
            mode = %ctx.work_mode,
        );
        self.run(ctx).instrument(span).await
    }

    async fn run(&self, mut ctx: RequestContext) -> Result<TransportResponse, PipelineError> {
        debug!(stub = %ctx.stub_case, "Executing");
        self.executors
            .select(ctx.work_mode)
            .execute(&mut ctx)
            .await?;
        ensure_postconditions(&ctx)?;
        let response = to_transport(&ctx)?;

        let elapsed_ms = ctx
            .time_start
            .map(|start| (Utc::now() - start).num_milliseconds());
        info!(
            result = ?response.result(),
            errors = response.errors().map_or(0, <[_]>::len),
            ?elapsed_ms,
            "Request processed"
        );
        Ok(response)
    }

    /// Full wire round trip for one JSON document. Never fails: fatal errors
    /// are rendered as a [`FailureResponse`].
    pub async fn process_json(&self, input: &str) -> String {
        match self.try_process_json(input).await {
            Ok(output) => output,
            Err(error) => {
                warn!(code = error.code(), group = error.group(), %error, "Request aborted");
                render_failure(&error)
            }
        }
    }

    async fn try_process_json(&self, input: &str) -> Result<String, PipelineError> {
        let request = decode_json(input)?;
        let response = self.process(request).await?;
        encode_json(&response)
    }
}

/// Output line for a request run on its own task. A task that panicked or was
/// cancelled still gets its line, as a failure document.
pub fn joined_answer(joined: Result<String, JoinError>) -> String {
    joined.unwrap_or_else(|e| {
        let failure = PipelineError::from(e);
        error!(code = failure.code(), error = %failure, "Request task failed");
        render_failure(&failure)
    })
}

fn render_failure(error: &PipelineError) -> String {
    serde_json::to_string(&failure_document(error))
        .unwrap_or_else(|_| FALLBACK_FAILURE.to_string())
}

/// Generic error document for a request that has no response variant.
pub fn failure_document(error: &PipelineError) -> FailureResponse {
    FailureResponse {
        result: ResponseResult::Error,
        errors: vec![TransportError {
            code: Some(error.code().to_string()),
            group: Some(error.group().to_string()),
            message: Some(error.to_string()),
        }],
    }
}
