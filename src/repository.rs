//! # Stream Repository
//!
//! The backend collaborator behind the production and test execution modes.
//! The pipeline only depends on this trait; [`StreamStore`](crate::store::StreamStore)
//! is the in-memory implementation shipped with the crate.

use crate::model::{ExternalSystemId, Stream, StreamFilter, StreamId, StreamUpdate};
use async_trait::async_trait;
use thiserror::Error;

/// Errors a repository reports back to the executor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// No stream with this id exists.
    #[error("Stream not found: {0}")]
    NotFound(StreamId),

    /// The stream exists but refuses to be removed.
    #[error("Stream {id} cannot be deleted: {reason}")]
    CannotDelete { id: StreamId, reason: String },

    /// The backend rejected the input.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backend could not be reached or gave up.
    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// CRUD, activation and queries over streams.
#[async_trait]
pub trait StreamRepository: Send + Sync {
    /// Stores a new stream and returns it with its generated id.
    async fn create(&self, stream: Stream) -> Result<Stream, RepositoryError>;

    async fn get(&self, id: StreamId) -> Result<Stream, RepositoryError>;

    async fn update(&self, id: StreamId, update: StreamUpdate) -> Result<Stream, RepositoryError>;

    /// Removes a stream and returns its last state.
    async fn delete(&self, id: StreamId) -> Result<Stream, RepositoryError>;

    async fn set_active(&self, id: StreamId, active: bool) -> Result<Stream, RepositoryError>;

    async fn search(&self, filter: StreamFilter) -> Result<Vec<Stream>, RepositoryError>;

    /// Streams the given external system may use.
    async fn accessible(&self, requester: ExternalSystemId) -> Result<Vec<Stream>, RepositoryError>;
}
