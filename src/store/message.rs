//! Messages exchanged between a [`StoreClient`](crate::store::StoreClient) and
//! its [`StoreActor`](crate::store::StoreActor).

use crate::store::entity::StoreEntity;
use crate::store::error::StoreError;
use tokio::sync::oneshot;

/// One-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests understood by the store actor: the CRUD lifecycle, record-specific
/// actions, and a filtered scan.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Create {
        params: T,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    /// Replies with the removed record.
    Delete { id: T::Id, respond_to: Response<T> },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Search {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
}
