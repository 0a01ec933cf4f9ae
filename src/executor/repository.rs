//! Executor backed by a [`StreamRepository`]. Serves both the production and the
//! test work modes; only the repository behind it differs.

use crate::context::{RequestContext, StreamRequest, StreamResponse};
use crate::error::PipelineError;
use crate::executor::validation::validate;
use crate::executor::CommandExecutor;
use crate::model::{Command, State, StreamUpdate, StructuredError, WorkMode};
use crate::repository::{RepositoryError, StreamRepository};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct RepositoryExecutor {
    mode: WorkMode,
    repository: Arc<dyn StreamRepository>,
    timeout: Duration,
}

impl RepositoryExecutor {
    /// `mode` only labels the log lines; selection happens in
    /// [`ExecutorSet`](crate::executor::ExecutorSet).
    pub fn new(mode: WorkMode, repository: Arc<dyn StreamRepository>, timeout: Duration) -> Self {
        Self {
            mode,
            repository,
            timeout,
        }
    }

    /// Runs one repository call under the configured deadline.
    ///
    /// A deadline only stops the wait. A write already handed to the store may
    /// still be applied, so the error says the outcome is unknown.
    async fn call<T>(
        &self,
        operation: impl Future<Output = Result<T, RepositoryError>>,
    ) -> Result<T, StructuredError> {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result.map_err(repository_error),
            Err(elapsed) => Err(StructuredError::internal(
                "db-error",
                format!(
                    "Repository did not answer within {} ms; outcome unknown",
                    self.timeout.as_millis()
                ),
            )
            .with_cause(elapsed)),
        }
    }

    async fn run(&self, request: StreamRequest) -> Result<StreamResponse, StructuredError> {
        let repository = self.repository.as_ref();
        let response = match request {
            StreamRequest::None => StreamResponse::default(),
            StreamRequest::Create(stream) => {
                StreamResponse::Single(self.call(repository.create(stream)).await?)
            }
            StreamRequest::Read(stream) => {
                StreamResponse::Single(self.call(repository.get(stream.id)).await?)
            }
            StreamRequest::Update(stream) => {
                let update = StreamUpdate::from(&stream);
                StreamResponse::Single(self.call(repository.update(stream.id, update)).await?)
            }
            StreamRequest::Delete(stream) => {
                StreamResponse::Single(self.call(repository.delete(stream.id)).await?)
            }
            StreamRequest::Enable(stream) => {
                StreamResponse::Single(self.call(repository.set_active(stream.id, true)).await?)
            }
            StreamRequest::Disable(stream) => {
                StreamResponse::Single(self.call(repository.set_active(stream.id, false)).await?)
            }
            StreamRequest::Search(filter) => {
                StreamResponse::Many(self.call(repository.search(filter)).await?)
            }
            StreamRequest::Accessible(requester) => {
                StreamResponse::Many(self.call(repository.accessible(requester)).await?)
            }
        };
        Ok(response)
    }
}

#[async_trait]
impl CommandExecutor for RepositoryExecutor {
    async fn execute(&self, ctx: &mut RequestContext) -> Result<(), PipelineError> {
        let command = ctx.command();
        if command == Command::None {
            return Err(PipelineError::UnknownCommand(command));
        }

        let errors = validate(ctx.request());
        if !errors.is_empty() {
            warn!(mode = %self.mode, %command, errors = errors.len(), "Request rejected");
            ctx.fail(errors);
            return Ok(());
        }

        debug!(mode = %self.mode, %command, "Calling repository");
        match self.run(ctx.request().clone()).await {
            Ok(response) => {
                ctx.set_response(response);
                ctx.state = State::Finishing;
                info!(mode = %self.mode, %command, "Command completed");
            }
            Err(error) => {
                warn!(mode = %self.mode, %command, %error, "Command failed");
                ctx.fail([error]);
            }
        }
        Ok(())
    }
}

/// Converts a repository failure into the error reported to the caller.
pub fn repository_error(error: RepositoryError) -> StructuredError {
    let message = error.to_string();
    match error {
        RepositoryError::NotFound(ref id) => StructuredError::not_found(id),
        RepositoryError::CannotDelete { .. } => {
            StructuredError::new("cannot-delete", "business", message)
        }
        RepositoryError::InvalidRequest(ref reason) => {
            StructuredError::new("invalid-request", "validation", reason.clone())
        }
        RepositoryError::Unavailable(_) => {
            StructuredError::internal("db-error", message).with_cause(error)
        }
    }
}
