//! # Store Actor
//!
//! [`StoreActor`] is the server half of the store: it owns the records and the
//! receiving end of the request channel, and handles one request at a time.

use crate::store::client::StoreClient;
use crate::store::entity::StoreEntity;
use crate::store::error::StoreError;
use crate::store::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Generic in-memory store for one record type.
///
/// The map is owned by the task running [`StoreActor::run`]. Requests are
/// processed sequentially, so no lock guards it; concurrent callers are
/// serialized by the channel.
///
/// Records are keyed by their creation sequence, so search results come back
/// in creation order whatever the ids look like.
///
/// ```rust
/// use stream_pipeline::model::{Stream, StreamFilter};
/// use stream_pipeline::store::StoreActor;
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<Stream>::new(8);
///     tokio::spawn(actor.run(()));
///
///     let created = client.create(Stream::default()).await.unwrap();
///     assert_eq!(created.id.as_str(), "1");
///     let all = client.search(StreamFilter::default()).await.unwrap();
///     assert_eq!(all.len(), 1);
/// }
/// ```
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: BTreeMap<u32, T>,
    index: BTreeMap<T::Id, u32>,
    next_id: u32,
}

impl<T: StoreEntity> StoreActor<T> {
    /// Creates the actor and a client bound to it.
    ///
    /// `buffer_size` bounds the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            index: BTreeMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Processes requests until every client is dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let seq = self.next_id;
                    let id = T::Id::from(seq);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.index.insert(id.clone(), seq);
                    self.store.insert(seq, item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    // Hooks mutate a copy so a failed update leaves the record intact.
                    let mut candidate = item.clone();
                    if let Err(e) = candidate.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    *item = candidate.clone();
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(candidate));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    let removed = self
                        .index
                        .remove(&id)
                        .and_then(|seq| self.store.remove(&seq));
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(
                        removed.ok_or_else(|| StoreError::NotFound(id.to_string())),
                    );
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| StoreError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Search { filter, respond_to } => {
                    let found: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, found = found.len(), "Search");
                    let _ = respond_to.send(Ok(found));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn get(&self, id: &T::Id) -> Option<&T> {
        self.index.get(id).and_then(|seq| self.store.get(seq))
    }

    fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        let seq = self.index.get(id)?;
        self.store.get_mut(seq)
    }
}
