//! # Command Executor
//!
//! Given a context whose request side is filled, an executor answers the
//! command: it sets the outcome [`State`], accumulates [`StructuredError`]s and
//! stores the response payload.
//!
//! There is one strategy per [`WorkMode`]:
//!
//! | Mode | Strategy | Backend |
//! |---|---|---|
//! | `prod` | [`RepositoryExecutor`] | the live repository |
//! | `test` | [`RepositoryExecutor`] | the seeded fixture store |
//! | `stub` | [`StubExecutor`] | canned table, no side effects |
//!
//! [`ExecutorSet::select`] is the only place that branches on the work mode.
//! Whatever the strategy, [`ensure_postconditions`] runs afterwards.

use crate::context::RequestContext;
use crate::error::PipelineError;
use crate::model::{State, StructuredError, WorkMode};
use async_trait::async_trait;
use std::sync::Arc;

pub mod repository;
pub mod stub;
pub mod validation;

pub use repository::RepositoryExecutor;
pub use stub::{StubExecutor, StubOutcome};

/// One execution strategy.
///
/// Domain failures are written into the context; an `Err` is reserved for
/// failures that make the request unanswerable.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, ctx: &mut RequestContext) -> Result<(), PipelineError>;
}

/// The three strategies, one per work mode.
#[derive(Clone)]
pub struct ExecutorSet {
    prod: Arc<dyn CommandExecutor>,
    test: Arc<dyn CommandExecutor>,
    stub: Arc<dyn CommandExecutor>,
}

impl ExecutorSet {
    pub fn new(
        prod: Arc<dyn CommandExecutor>,
        test: Arc<dyn CommandExecutor>,
        stub: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self { prod, test, stub }
    }

    pub fn select(&self, mode: WorkMode) -> &dyn CommandExecutor {
        match mode {
            WorkMode::Prod => self.prod.as_ref(),
            WorkMode::Test => self.test.as_ref(),
            WorkMode::Stub => self.stub.as_ref(),
        }
    }
}

/// Checks what every strategy must leave behind:
/// a decided state, a response of the command's shape, no blank errors, and
/// at least one error when failing.
pub fn ensure_postconditions(ctx: &RequestContext) -> Result<(), PipelineError> {
    let command = ctx.command();
    if ctx.state == State::None {
        return Err(PipelineError::Contract(format!(
            "state left unset for {command}"
        )));
    }
    if ctx.response().is_multi() != command.is_multi() {
        return Err(PipelineError::Contract(format!(
            "response shape does not match {command}"
        )));
    }
    if let Some(index) = ctx.errors.iter().position(StructuredError::is_blank) {
        return Err(PipelineError::Contract(format!(
            "error #{index} carries no code, group or message"
        )));
    }
    if ctx.state == State::Failing && !ctx.has_errors() {
        return Err(PipelineError::Contract(format!(
            "{command} failed without reporting an error"
        )));
    }
    Ok(())
}
