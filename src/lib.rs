//! # Stream Pipeline
//!
//! > **A context-based command pipeline for integration stream resources.**
//!
//! A *stream* is a class/method pair plus the transport parameters used to
//! reach it. Callers create, read, update, delete, search, enable and disable
//! streams, and ask which ones an external system may use. Every request flows
//! through the same stages around one mutable, request-scoped
//! [`RequestContext`](context::RequestContext).
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Tagged unions instead of a fat context
//! The context carries exactly one request payload
//! ([`StreamRequest`](context::StreamRequest)) and one response payload
//! ([`StreamResponse`](context::StreamResponse)). The command is derived from
//! the payload variant, so "which field is meaningful" is checked by the
//! compiler.
//!
//! ### One strategy per work mode
//! Callers pick `prod`, `test` or `stub` through the request's `debug` object.
//! [`ExecutorSet::select`](executor::ExecutorSet::select) is the single switch;
//! no other code branches on the mode.
//!
//! ### Errors as data
//! Domain failures are accumulated as
//! [`StructuredError`](model::StructuredError)s in the context and reported with
//! `result = error`. Only requests that can't be answered in their own
//! response variant surface as [`PipelineError`](error::PipelineError).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Vocabulary ([`model`], [`context`])
//! Ids, streams, filters, errors, the closed enums, and the request context.
//!
//! ### 2. The Wire ([`transport`], [`mapper`])
//! Serde types for the JSON contract and the pure conversions to and from the
//! context.
//!
//! ### 3. The Engine ([`executor`], [`pipeline`])
//! Strategies that answer a command, their post-conditions, and the
//! [`Pipeline`](pipeline::Pipeline) that runs one request end to end.
//!
//! ### 4. The Backend ([`repository`], [`store`])
//! The repository seam and its in-memory, actor-based implementation.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Wiring, configuration and tracing for the host binary.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! echo '{"requestType":"read","debug":{"mode":"stub","stub":"success"},"streamId":"7"}' \
//!     | RUST_LOG=info cargo run
//! ```

pub mod context;
pub mod error;
pub mod executor;
pub mod lifecycle;
pub mod mapper;
pub mod model;
pub mod pipeline;
pub mod repository;
pub mod store;
pub mod transport;
