//! # Pipeline Errors
//!
//! Failures that abort a request before (or instead of) producing its own
//! response variant. Domain problems are not here: they travel as
//! [`StructuredError`](crate::model::StructuredError) data inside the context.

use crate::model::Command;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The transport payload names a request kind the mapper can't interpret.
    #[error("Unknown request kind: {0}")]
    UnknownRequestKind(String),

    /// The context reached the outbound mapper without a command.
    #[error("Wrong command {0} at mapping to transport stage")]
    UnknownCommand(Command),

    /// Stub mode was requested without naming a stub case.
    #[error("Stub work mode requested without a stub case")]
    MissingStubCase,

    #[error("Malformed request: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    /// An executor left the context in a state that breaks its post-conditions.
    #[error("Executor contract violated: {0}")]
    Contract(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The task answering the request panicked or was cancelled.
    #[error("Request task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// Error group reported in the generic failure document.
    pub fn group(&self) -> &'static str {
        match self {
            PipelineError::MissingStubCase => "stub",
            PipelineError::MalformedRequest(_) | PipelineError::UnknownRequestKind(_) => {
                "request"
            }
            PipelineError::UnknownCommand(_)
            | PipelineError::Contract(_)
            | PipelineError::Serialization(_)
            | PipelineError::TaskFailed(_) => "internal",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::UnknownRequestKind(_) => "unknown-request-kind",
            PipelineError::UnknownCommand(_) => "unknown-command",
            PipelineError::MissingStubCase => "missing-stub-case",
            PipelineError::MalformedRequest(_) => "malformed-request",
            PipelineError::Contract(_) => "executor-contract",
            PipelineError::Serialization(_) => "serialization",
            PipelineError::TaskFailed(_) => "task-failed",
        }
    }
}
