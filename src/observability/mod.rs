//! Observability subsystem.
//!
//! Structured logging via `tracing`. The monitor emits debug events per
//! poll, info on terminal transitions, and warn when a budget is exhausted;
//! consumers pick the sink by installing a subscriber (or calling
//! [`logging::init_logging`] for the default stdout one).

pub mod logging;

pub use logging::init_logging;
