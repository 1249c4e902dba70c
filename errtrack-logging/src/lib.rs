//! Logging infrastructure for GraphQL error tracking
//!
//! Diagnostic lines produced while handling an error batch go through a
//! [`LogSink`], so the destination can be swapped (tracing, stderr, or an
//! in-memory capture for tests). Subscriber setup lives in [`init`].

pub mod init;
pub mod sinks;

pub use init::{init_logging_from_config, init_simple_tracing};
pub use sinks::{LogSink, MemorySink, StderrSink, TracingSink};
