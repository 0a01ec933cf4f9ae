//! [`RequestContext`] → transport response.
//!
//! The result, errors and payload fields follow the same rules for every
//! variant; only the variant itself depends on the command.

use crate::context::{RequestContext, StreamResponse};
use crate::error::PipelineError;
use crate::model::{Command, State, Stream, StructuredError};
use crate::transport::{
    MultiStreamResponse, ResponseResult, SingleStreamResponse, StreamResponseObject,
    TransportError, TransportResponse,
};

/// Encodes the context into the response variant matching its command.
pub fn to_transport(ctx: &RequestContext) -> Result<TransportResponse, PipelineError> {
    let command = ctx.command();
    let response = match command {
        Command::Create => TransportResponse::Create(single(ctx)),
        Command::Read => TransportResponse::Read(single(ctx)),
        Command::Update => TransportResponse::Update(single(ctx)),
        Command::Delete => TransportResponse::Delete(single(ctx)),
        Command::Enable => TransportResponse::Enable(single(ctx)),
        Command::Disable => TransportResponse::Disable(single(ctx)),
        Command::Search => TransportResponse::Search(multi(ctx)),
        Command::Accessible => TransportResponse::Accessible(multi(ctx)),
        Command::None => return Err(PipelineError::UnknownCommand(command)),
    };
    Ok(response)
}

fn single(ctx: &RequestContext) -> SingleStreamResponse {
    let stream = match ctx.response() {
        StreamResponse::Single(stream) => stream_to_transport(stream),
        StreamResponse::Many(_) => stream_to_transport(&Stream::none()),
    };
    SingleStreamResponse {
        result: state_to_result(ctx.state),
        errors: errors_to_transport(&ctx.errors),
        stream: Some(stream),
    }
}

fn multi(ctx: &RequestContext) -> MultiStreamResponse {
    let streams = match ctx.response() {
        StreamResponse::Many(streams) => streams.iter().map(stream_to_transport).collect(),
        StreamResponse::Single(_) => Vec::new(),
    };
    MultiStreamResponse {
        result: state_to_result(ctx.state),
        errors: errors_to_transport(&ctx.errors),
        streams: Some(streams),
    }
}

pub fn state_to_result(state: State) -> Option<ResponseResult> {
    state.is_success().map(|success| {
        if success {
            ResponseResult::Success
        } else {
            ResponseResult::Error
        }
    })
}

/// Empty lists are omitted rather than written as `[]`.
fn errors_to_transport(errors: &[StructuredError]) -> Option<Vec<TransportError>> {
    if errors.is_empty() {
        return None;
    }
    Some(errors.iter().map(error_to_transport).collect())
}

pub fn error_to_transport(error: &StructuredError) -> TransportError {
    TransportError {
        code: non_blank(&error.code),
        group: non_blank(&error.group),
        message: non_blank(&error.message),
    }
}

pub fn stream_to_transport(stream: &Stream) -> StreamResponseObject {
    StreamResponseObject {
        id: (!stream.id.is_none()).then(|| stream.id.to_string()),
        class_short_name: stream.class_short_name.clone(),
        method_short_name: stream.method_short_name.clone(),
        transport_params: stream.transport_params.clone(),
        description: stream.description.clone(),
        active: stream.active,
    }
}

fn non_blank(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}
