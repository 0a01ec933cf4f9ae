//! Deterministic data set answering requests in test work mode.

use crate::model::Stream;
use crate::repository::{RepositoryError, StreamRepository};
use crate::store::StreamStore;
use tokio::task::JoinHandle;
use tracing::info;

/// The fixture streams, in creation order. Ids are assigned `"1"`, `"2"`, ...
/// `active` marks the ones enabled after creation.
pub fn fixture_streams() -> Vec<Stream> {
    let stream = |class: &str, method: &str, params: &str, description: &str, active: bool| Stream {
        class_short_name: class.to_string(),
        method_short_name: method.to_string(),
        transport_params: params.to_string(),
        description: description.to_string(),
        active,
        ..Stream::default()
    };
    vec![
        stream(
            "CLIENT",
            "EXPORT2FNS",
            "queue=fns.export",
            "Client export to the tax service",
            true,
        ),
        stream(
            "KRED_CORP",
            "PAYMENT_CALENDAR",
            "queue=kred.calendar",
            "Corporate loan payment calendar",
            true,
        ),
        stream(
            "KRED_CORP",
            "SIGN",
            "queue=kred.sign",
            "Corporate loan contract signing",
            false,
        ),
        stream(
            "DEPOSIT",
            "OPEN",
            "http=https://deposits.local/open",
            "Deposit opening",
            false,
        ),
    ]
}

/// Loads the fixture into `store`.
pub async fn seed(store: &StreamStore) -> Result<(), RepositoryError> {
    for stream in fixture_streams() {
        let active = stream.active;
        let created = store.create(stream).await?;
        if active {
            store.set_active(created.id, true).await?;
        }
    }
    Ok(())
}

/// Spawns a store pre-loaded with [`fixture_streams`].
pub async fn seeded_store(buffer_size: usize) -> Result<(StreamStore, JoinHandle<()>), RepositoryError> {
    let (store, handle) = StreamStore::spawn(buffer_size);
    seed(&store).await?;
    info!(streams = fixture_streams().len(), "Test fixture loaded");
    Ok((store, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExternalSystemId, StreamFilter, StreamId};

    #[tokio::test]
    async fn test_seeded_store_is_deterministic() {
        let (store, _handle) = seeded_store(8).await.unwrap();

        let all = store.search(StreamFilter::default()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|s| s.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);

        let first = store.get(StreamId::from("1")).await.unwrap();
        assert_eq!(first.method_short_name, "EXPORT2FNS");
        assert!(first.active);

        let accessible = store
            .accessible(ExternalSystemId::from("333"))
            .await
            .unwrap();
        assert_eq!(accessible.len(), 2);
    }
}
