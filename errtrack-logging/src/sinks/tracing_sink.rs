use super::LogSink;

/// Forwards each line to `tracing` at error level under the `errtrack::errors` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::error!(target: "errtrack::errors", "{}", line);
    }
}
