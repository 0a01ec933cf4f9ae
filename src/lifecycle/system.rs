use crate::executor::{ExecutorSet, RepositoryExecutor, StubExecutor};
use crate::lifecycle::Config;
use crate::model::WorkMode;
use crate::pipeline::Pipeline;
use crate::repository::RepositoryError;
use crate::store::fixture::seeded_store;
use crate::store::StreamStore;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The in-memory deployment of the pipeline.
///
/// `PipelineSystem` owns the store actors behind the repository-backed work
/// modes and hands out the [`Pipeline`] wired to them:
///
/// | Mode | Executor | Store |
/// |---|---|---|
/// | `prod` | [`RepositoryExecutor`] | empty [`StreamStore`] |
/// | `test` | [`RepositoryExecutor`] | [`seeded_store`] fixture |
/// | `stub` | [`StubExecutor`] | none |
///
/// # Example
///
/// ```ignore
/// let system = PipelineSystem::start(&Config::default()).await?;
/// let answer = system.pipeline.process_json(line).await;
/// system.shutdown().await?;
/// ```
pub struct PipelineSystem {
    pub pipeline: Pipeline,

    /// Store actor tasks, joined on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl PipelineSystem {
    /// Spawns both stores, loads the test fixture and wires the executors.
    pub async fn start(config: &Config) -> Result<Self, RepositoryError> {
        let (prod_store, prod_handle) = StreamStore::spawn(config.channel_buffer);
        let (test_store, test_handle) = seeded_store(config.channel_buffer).await?;

        let timeout = config.executor_timeout();
        let executors = ExecutorSet::new(
            Arc::new(RepositoryExecutor::new(WorkMode::Prod, Arc::new(prod_store), timeout)),
            Arc::new(RepositoryExecutor::new(WorkMode::Test, Arc::new(test_store), timeout)),
            Arc::new(StubExecutor::new()),
        );

        info!(
            channel_buffer = config.channel_buffer,
            timeout_ms = config.executor_timeout_ms,
            "Pipeline started"
        );
        Ok(Self {
            pipeline: Pipeline::new(executors),
            handles: vec![prod_handle, test_handle],
        })
    }

    /// Drops the pipeline and waits for the store actors to drain.
    ///
    /// The actors stop once their last client is gone, so every clone of
    /// [`PipelineSystem::pipeline`] handed out earlier must be dropped first.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down pipeline...");
        drop(self.pipeline);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Store task failed");
                return Err(e);
            }
        }

        info!("Pipeline shutdown complete");
        Ok(())
    }
}
