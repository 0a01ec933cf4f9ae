//! Type-safe string identifiers.
//!
//! Each id wraps an opaque string and has a `NONE` sentinel (the empty string)
//! meaning "absent". The types are distinct so a stream id can't be passed where
//! an external-system id is expected.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// The "absent" sentinel.
            pub const NONE: $name = $name(String::new());

            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_none(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a [`Stream`](crate::model::Stream).
    StreamId
);

string_id!(
    /// Identifier of the external system asking for accessible streams.
    ExternalSystemId
);

string_id!(
    /// Correlation id stamped on every request by the pipeline.
    RequestId
);

/// The store generates ids from a counter.
impl From<u32> for StreamId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl RequestId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_empty_string() {
        assert!(StreamId::NONE.is_none());
        assert_eq!(StreamId::NONE, StreamId::new(""));
        assert_eq!(StreamId::default(), StreamId::NONE);
        assert!(!StreamId::new("12345").is_none());
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(StreamId::from("12345"), StreamId::new(String::from("12345")));
        assert_ne!(ExternalSystemId::from("1"), ExternalSystemId::from("2"));
    }

    #[test]
    fn test_counter_ids_render_as_decimal() {
        assert_eq!(StreamId::from(7u32).as_str(), "7");
    }

    #[test]
    fn test_generated_request_ids_are_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert!(!a.is_none());
        assert_ne!(a, b);
    }
}
