//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber for the host
//! binary. Output goes to stderr: stdout carries the response documents.
//!
//! ## Configuration
//!
//! Levels come from `RUST_LOG`. The default format is compact and hides the
//! module path (`with_target(false)`); structured fields such as `request_id`,
//! `command` and `mode` carry the context instead. `--log-json` switches to one
//! JSON object per line for log shippers.
//!
//! ```bash
//! # Request summaries
//! RUST_LOG=info stream-pipeline < requests.ndjson
//!
//! # Decoded payloads, store traffic and stub answers
//! RUST_LOG=debug stream-pipeline < requests.ndjson
//!
//! # Only the store actor
//! RUST_LOG=stream_pipeline::store=debug stream-pipeline < requests.ndjson
//! ```
//!
//! ## What Gets Traced
//!
//! Every request runs inside a `request` span:
//!
//! ```text
//! INFO request{request_id=6f1c.. command=create mode=test}: Created entity_type="Stream" id=5 size=5
//! INFO request{request_id=6f1c.. command=create mode=test}: Command completed mode=test command=create
//! INFO request{request_id=6f1c.. command=create mode=test}: Request processed state=Finishing errors=0 elapsed_ms=Some(0)
//! ```
//!
//! Store actor lines are emitted from the actor's own task, so they carry the
//! `entity_type` field rather than the request span.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
