//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for a whole process.
//!
//! The resource actor logs its lifecycle (`Actor started`, `Shutdown`) and every request
//! with an `entity_type` field. Full payloads are only logged at `debug`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per write
//! RUST_LOG=debug cargo run     # request payloads and reads
//! RUST_LOG=resource_framework=debug,pizzeria=info cargo run
//! ```
//!
//! The compact format hides module paths (`with_target(false)`); the `entity_type` field says
//! which actor a line came from.

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
