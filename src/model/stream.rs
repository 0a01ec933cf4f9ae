use crate::model::StreamId;
use serde::{Deserialize, Serialize};

/// An integration stream: a class/method pair plus the transport parameters
/// used to reach it.
///
/// # Store
/// This struct implements the [`StoreEntity`](crate::store::StoreEntity) trait,
/// allowing it to be managed by a [`StoreActor`](crate::store::StoreActor).
///
/// See [`impl StoreEntity for Stream`](crate::store::stream) for details on:
/// - Update parameters ([`StreamUpdate`])
/// - Custom actions ([`StreamAction`](crate::store::StreamAction))
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub id: StreamId,
    pub description: String,
    pub class_short_name: String,
    pub method_short_name: String,
    pub transport_params: String,
    pub active: bool,
}

impl Stream {
    /// The all-defaults stream.
    pub fn none() -> Self {
        Self::default()
    }

    /// A stream carrying only an id, as decoded from the bare-id commands.
    pub fn with_id(id: StreamId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }
}

/// Payload for updating an existing stream. The id travels separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamUpdate {
    pub description: String,
    pub class_short_name: String,
    pub method_short_name: String,
    pub transport_params: String,
}

impl From<&Stream> for StreamUpdate {
    fn from(stream: &Stream) -> Self {
        Self {
            description: stream.description.clone(),
            class_short_name: stream.class_short_name.clone(),
            method_short_name: stream.method_short_name.clone(),
            transport_params: stream.transport_params.clone(),
        }
    }
}

/// Search predicates for [`Stream`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFilter {
    pub search_string: String,
    pub class_short_name: String,
    pub method_short_name: String,
    pub active: bool,
}

impl StreamFilter {
    /// Blank predicates match everything. `active = false` does not restrict.
    pub fn matches(&self, stream: &Stream) -> bool {
        if !self.class_short_name.is_empty() && self.class_short_name != stream.class_short_name {
            return false;
        }
        if !self.method_short_name.is_empty()
            && self.method_short_name != stream.method_short_name
        {
            return false;
        }
        if self.active && !stream.active {
            return false;
        }
        let needle = self.search_string.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            &stream.description,
            &stream.class_short_name,
            &stream.method_short_name,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
