//! # Store Client
//!
//! Typed async handle to a [`StoreActor`](crate::store::StoreActor).

use crate::store::entity::StoreEntity;
use crate::store::error::StoreError;
use crate::store::message::StoreRequest;
use tokio::sync::{mpsc, oneshot};

/// Sends requests to a store actor and awaits the replies.
///
/// Holds only the channel sender, so clones are cheap and can be handed to any
/// number of tasks. The actor stops once every clone is dropped.
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn search(&self, filter: T::Filter) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Search { filter, respond_to })
            .await
    }
}
