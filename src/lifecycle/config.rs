//! Runtime settings for the host, from flags or `STREAM_PIPELINE_*` variables.

use clap::Parser;
use std::time::Duration;

/// Stream pipeline - NDJSON command host
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "stream-pipeline")]
#[command(about = "Answers stream commands read as JSON lines from stdin")]
pub struct Config {
    /// Capacity of each store actor's request channel
    #[arg(long, env = "STREAM_PIPELINE_CHANNEL_BUFFER", default_value_t = 32)]
    pub channel_buffer: usize,

    /// Deadline for one repository call, in milliseconds
    #[arg(long, env = "STREAM_PIPELINE_EXECUTOR_TIMEOUT_MS", default_value_t = 5000)]
    pub executor_timeout_ms: u64,

    /// Emit logs as JSON lines instead of the compact format
    #[arg(long, env = "STREAM_PIPELINE_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn executor_timeout(&self) -> Duration {
        Duration::from_millis(self.executor_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            executor_timeout_ms: 5000,
            log_json: false,
        }
    }
}
