//! # Stream Store
//!
//! In-memory persistence behind the production and test work modes, built as
//! an actor: one Tokio task owns the records and every caller talks to it
//! through a cloneable [`StoreClient`].
//!
//! - [`entity`]: the [`StoreEntity`] contract a record type implements.
//! - [`actor`]: the generic [`StoreActor`] message loop.
//! - [`client`]: the typed request/reply handle.
//! - [`stream`]: [`Stream`](crate::model::Stream) as an entity, plus
//!   [`StreamStore`], the [`StreamRepository`](crate::repository::StreamRepository)
//!   implementation.
//! - [`fixture`]: the deterministic data set used in test mode.
//! - [`mock`]: scripted client for unit tests.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod fixture;
pub mod message;
pub mod mock;
pub mod stream;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use entity::StoreEntity;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use stream::{StreamAction, StreamStore};
