//! Line-oriented log sinks
//!
//! Emission is fire-and-forget: [`LogSink::emit`] cannot report failure, and
//! sinks that can fail internally swallow the error.

pub mod memory;
pub mod stderr;
pub mod tracing_sink;

pub use memory::MemorySink;
pub use stderr::StderrSink;
pub use tracing_sink::TracingSink;

/// Destination for diagnostic lines
pub trait LogSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Any thread-safe closure can act as a sink
impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line)
    }
}
