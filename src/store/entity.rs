//! # StoreEntity Trait
//!
//! The contract a record type implements to be kept by the generic
//! [`StoreActor`](crate::store::StoreActor). Associated types pin down the id,
//! update DTO, custom actions and query filter, so a stream update can't be sent
//! to an actor holding something else.
//!
//! # Provided Methods (Hooks)
//! [`StoreEntity::on_create`] and [`StoreEntity::on_delete`] default to `Ok(())`.
//! Override them to validate or veto the lifecycle step.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// A record managed by a [`StoreActor`](crate::store::StoreActor).
///
/// Hooks are async and receive the `Context` injected into
/// [`StoreActor::run`](crate::store::StoreActor::run), so dependencies are bound
/// when the actor starts rather than when it is constructed.
#[async_trait]
pub trait StoreEntity: Clone + Debug + Send + Sync + 'static {
    /// Identifier, generated from the actor's `u32` counter.
    /// Only used for lookup; results follow creation order, not `Ord`.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Data required to change an existing record.
    type Update: Send + Sync + Debug;

    /// Record-specific operations beyond CRUD.
    type Action: Send + Sync + Debug;

    type ActionResult: Send + Sync + Debug;

    /// Query predicate evaluated against every stored record.
    type Filter: Send + Sync + Debug;

    /// Runtime dependencies injected into the actor. `()` if none.
    type Context: Send + Sync;

    /// One error type per entity, boxed by the actor when a hook fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the stored record from the generated id and the submitted value.
    fn from_create_params(id: Self::Id, params: Self) -> Result<Self, Self::Error>;

    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built, before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed. An error keeps it in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
