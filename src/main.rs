//! # stream-pipeline
//!
//! Line-oriented host for the pipeline: every stdin line is one request
//! document, every stdout line the matching response, in input order. Each line
//! is processed on its own Tokio task; logs go to stderr.
//!
//! ```bash
//! echo '{"requestType":"search","debug":{"mode":"test"}}' | RUST_LOG=info stream-pipeline
//! ```

use clap::Parser;
use stream_pipeline::lifecycle::{setup_tracing, Config, PipelineSystem};
use stream_pipeline::pipeline::joined_answer;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, info_span, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    setup_tracing(config.log_json);

    info!(?config, "Starting stream pipeline host");
    let system = PipelineSystem::start(&config).await?;

    // Answers are queued as task handles so output keeps input order while the
    // requests themselves run concurrently.
    let (queue, mut pending) = mpsc::channel::<JoinHandle<String>>(config.channel_buffer);
    let writer = tokio::spawn(
        async move {
            let mut stdout = tokio::io::stdout();
            while let Some(answer) = pending.recv().await {
                let line = joined_answer(answer.await);
                stdout.write_all(line.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            Ok::<_, std::io::Error>(())
        }
        .instrument(info_span!("writer")),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut count = 0usize;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        count += 1;
        let pipeline = system.pipeline.clone();
        let task = tokio::spawn(async move { pipeline.process_json(&line).await });
        if queue.send(task).await.is_err() {
            error!("Output closed, stopping");
            break;
        }
    }
    drop(queue);

    writer.await??;
    info!(requests = count, "Input exhausted");
    system.shutdown().await?;
    Ok(())
}
