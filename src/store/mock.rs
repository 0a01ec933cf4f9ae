//! # Mock Store
//!
//! [`MockStore<T>`] hands out a real [`StoreClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running
//! [`StoreActor`](crate::store::StoreActor). Use it to drive code that sits on
//! top of a store (the repository executor, for instance) into answers that are
//! awkward to reach with real state, such as a dropped actor.
//!
//! | | MockStore | Real actor |
//! |---|---|---|
//! | **State** | none, answers are scripted | real records |
//! | **Error injection** | `return_err` | needs a crafted state |
//! | **Use case** | logic *around* the client | the store itself |
//!
//! ```rust
//! use stream_pipeline::model::{Stream, StreamId};
//! use stream_pipeline::store::mock::MockStore;
//! use stream_pipeline::store::StoreError;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Stream>::new();
//!     mock.expect_get().return_ok(Some(Stream::with_id(StreamId::from("7"))));
//!     mock.expect_delete().return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     let found = client.get(StreamId::from("7")).await.unwrap();
//!     assert_eq!(found.unwrap().id, StreamId::from("7"));
//!     assert!(client.delete(StreamId::from("7")).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! A request that doesn't match the next queued expectation panics the mock's
//! background task; the caller then sees [`StoreError::ActorDropped`].

use crate::store::client::StoreClient;
use crate::store::entity::StoreEntity;
use crate::store::error::StoreError;
use crate::store::message::StoreRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted answer, consumed in order.
enum Expectation<T: StoreEntity> {
    Create(Result<T, StoreError>),
    Get(Result<Option<T>, StoreError>),
    Update(Result<T, StoreError>),
    Delete(Result<T, StoreError>),
    Action(Result<T::ActionResult, StoreError>),
    Search(Result<Vec<T>, StoreError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A store stand-in with expectation tracking.
pub struct MockStore<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockStore<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Search { respond_to, .. }, Some(Expectation::Search(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, _) => {
                        panic!("Unexpected store request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Create)
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_update(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Delete)
    }

    pub fn expect_action(&mut self) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Expectation::Action)
    }

    pub fn expect_search(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::Search)
    }

    fn builder<R>(&self, wrap: fn(Result<R, StoreError>) -> Expectation<T>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap,
        }
    }

    /// Number of expectations not consumed yet.
    pub fn pending(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.pending();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Queues the answer for one expected request.
pub struct ExpectationBuilder<T: StoreEntity, R> {
    expectations: Queue<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<T: StoreEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: StoreError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(Err(error)));
    }
}
