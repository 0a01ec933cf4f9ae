//! Runtime orchestration for the host binary.
//!
//! - [`PipelineSystem`] - starts the store actors, wires the executors and shuts
//!   everything down
//! - [`Config`] - command-line and environment settings
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod config;
pub mod system;
pub mod tracing;

pub use config::*;
pub use system::*;
pub use tracing::*;
