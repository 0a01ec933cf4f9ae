//! [`StoreEntity`] implementation for [`Stream`] and the [`StreamStore`] client
//! that exposes it as a [`StreamRepository`].

use crate::model::{ExternalSystemId, Stream, StreamFilter, StreamId, StreamUpdate};
use crate::repository::{RepositoryError, StreamRepository};
use crate::store::{StoreActor, StoreClient, StoreEntity, StoreError};
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Stream operations beyond CRUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamAction {
    Enable,
    Disable,
}

#[async_trait]
impl StoreEntity for Stream {
    type Id = StreamId;
    type Update = StreamUpdate;
    type Action = StreamAction;
    type ActionResult = Stream;
    type Filter = StreamFilter;
    type Context = ();
    type Error = RepositoryError;

    /// New streams start inactive; the submitted id is replaced by the generated one.
    fn from_create_params(id: StreamId, params: Stream) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            active: false,
            ..params
        })
    }

    fn matches(&self, filter: &StreamFilter) -> bool {
        filter.matches(self)
    }

    async fn on_update(&mut self, update: StreamUpdate, _ctx: &()) -> Result<(), Self::Error> {
        self.description = update.description;
        self.class_short_name = update.class_short_name;
        self.method_short_name = update.method_short_name;
        self.transport_params = update.transport_params;
        Ok(())
    }

    /// Active streams must be disabled before they can be removed.
    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.active {
            return Err(RepositoryError::CannotDelete {
                id: self.id.clone(),
                reason: "stream is active, disable it first".to_string(),
            });
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: StreamAction,
        _ctx: &(),
    ) -> Result<Stream, Self::Error> {
        self.active = matches!(action, StreamAction::Enable);
        Ok(self.clone())
    }
}

/// Repository backed by a [`StoreActor<Stream>`].
#[derive(Clone)]
pub struct StreamStore {
    inner: StoreClient<Stream>,
}

impl StreamStore {
    pub fn new(inner: StoreClient<Stream>) -> Self {
        Self { inner }
    }

    /// Starts an empty store actor and returns its repository handle.
    pub fn spawn(buffer_size: usize) -> (Self, JoinHandle<()>) {
        let (actor, client) = StoreActor::<Stream>::new(buffer_size);
        let handle = tokio::spawn(actor.run(()));
        (Self::new(client), handle)
    }
}

/// Unwraps entity errors raised by the hooks; transport failures become `Unavailable`.
fn map_store_error(e: StoreError) -> RepositoryError {
    match e {
        StoreError::NotFound(id) => RepositoryError::NotFound(StreamId::from(id)),
        StoreError::EntityError(inner) => match inner.downcast::<RepositoryError>() {
            Ok(repository_error) => *repository_error,
            Err(other) => RepositoryError::Unavailable(other.to_string()),
        },
        other => RepositoryError::Unavailable(other.to_string()),
    }
}

#[async_trait]
impl StreamRepository for StreamStore {
    #[instrument(skip(self))]
    async fn create(&self, stream: Stream) -> Result<Stream, RepositoryError> {
        debug!("Sending request");
        self.inner.create(stream).await.map_err(map_store_error)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: StreamId) -> Result<Stream, RepositoryError> {
        debug!("Sending request");
        self.inner
            .get(id.clone())
            .await
            .map_err(map_store_error)?
            .ok_or(RepositoryError::NotFound(id))
    }

    #[instrument(skip(self))]
    async fn update(&self, id: StreamId, update: StreamUpdate) -> Result<Stream, RepositoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(map_store_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StreamId) -> Result<Stream, RepositoryError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(map_store_error)
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: StreamId, active: bool) -> Result<Stream, RepositoryError> {
        let action = if active {
            StreamAction::Enable
        } else {
            StreamAction::Disable
        };
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(map_store_error)
    }

    #[instrument(skip(self))]
    async fn search(&self, filter: StreamFilter) -> Result<Vec<Stream>, RepositoryError> {
        debug!("Sending request");
        self.inner.search(filter).await.map_err(map_store_error)
    }

    /// Every enabled stream is open to any identified external system.
    #[instrument(skip(self))]
    async fn accessible(&self, requester: ExternalSystemId) -> Result<Vec<Stream>, RepositoryError> {
        if requester.is_none() {
            return Err(RepositoryError::InvalidRequest(
                "external system id is required".to_string(),
            ));
        }
        debug!("Sending request");
        let filter = StreamFilter {
            active: true,
            ..StreamFilter::default()
        };
        self.inner.search(filter).await.map_err(map_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment_calendar() -> Stream {
        Stream {
            description: "Payment calendar".into(),
            class_short_name: "KRED_CORP".into(),
            method_short_name: "PAYMENT_CALENDAR".into(),
            transport_params: "queue=payments".into(),
            ..Stream::default()
        }
    }

    #[tokio::test]
    async fn test_stream_store_full_lifecycle() {
        let (store, _handle) = StreamStore::spawn(8);

        // 1. Create
        let created = store.create(payment_calendar()).await.unwrap();
        assert_eq!(created.id, StreamId::from("1"));
        assert!(!created.active);

        // 2. Enable, then delete is refused
        let enabled = store.set_active(created.id.clone(), true).await.unwrap();
        assert!(enabled.active);
        let refused = store.delete(created.id.clone()).await.unwrap_err();
        assert!(matches!(refused, RepositoryError::CannotDelete { .. }));

        // 3. Update keeps activation
        let update = StreamUpdate {
            description: "Payment calendar v2".into(),
            ..StreamUpdate::from(&payment_calendar())
        };
        let updated = store.update(created.id.clone(), update).await.unwrap();
        assert_eq!(updated.description, "Payment calendar v2");
        assert!(updated.active);

        // 4. Accessible lists enabled streams
        let accessible = store
            .accessible(ExternalSystemId::from("333"))
            .await
            .unwrap();
        assert_eq!(accessible, vec![updated.clone()]);

        // 5. Disable and delete
        store.set_active(created.id.clone(), false).await.unwrap();
        let removed = store.delete(created.id.clone()).await.unwrap();
        assert_eq!(removed.id, created.id);
        let missing = store.get(created.id.clone()).await.unwrap_err();
        assert_eq!(missing, RepositoryError::NotFound(created.id));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let (store, _handle) = StreamStore::spawn(8);
        let id = StreamId::from("404");
        assert_eq!(
            store.set_active(id.clone(), true).await.unwrap_err(),
            RepositoryError::NotFound(id.clone())
        );
        assert_eq!(
            store.delete(id.clone()).await.unwrap_err(),
            RepositoryError::NotFound(id)
        );
    }

    /// Ids past "9" sort before "2" as strings; results must not.
    #[tokio::test]
    async fn test_search_keeps_creation_order() {
        let (store, _handle) = StreamStore::spawn(16);
        for _ in 0..11 {
            store.create(payment_calendar()).await.unwrap();
        }

        let ids = |streams: Vec<Stream>| -> Vec<String> {
            streams.into_iter().map(|s| s.id.to_string()).collect()
        };
        let all = store.search(StreamFilter::default()).await.unwrap();
        assert_eq!(
            ids(all),
            vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11"]
        );

        // Deleting from the middle keeps the rest in place
        store.delete(StreamId::from("5")).await.unwrap();
        for id in ["11", "2", "10"] {
            store.set_active(StreamId::from(id), true).await.unwrap();
        }
        let accessible = store
            .accessible(ExternalSystemId::from("333"))
            .await
            .unwrap();
        assert_eq!(ids(accessible), vec!["2", "10", "11"]);

        let after_delete = store.search(StreamFilter::default()).await.unwrap();
        assert_eq!(after_delete.len(), 10);
        assert_eq!(after_delete[4].id, StreamId::from("6"));
    }

    #[tokio::test]
    async fn test_accessible_requires_requester() {
        let (store, _handle) = StreamStore::spawn(8);
        let err = store.accessible(ExternalSystemId::NONE).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let (actor, client) = StoreActor::<Stream>::new(1);
        drop(actor);
        let store = StreamStore::new(client);
        let err = store.search(StreamFilter::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }
}
