//! Observability setup for the whole process.
//!
//! Structured logging via the `tracing` crate. The compact format hides the
//! module path (`with_target(false)`); operations tag their own context with
//! structured fields instead. Log level is controlled with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per operation
//! RUST_LOG=debug cargo run     # full request payloads
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
