use std::io::Write;

use super::LogSink;

/// Writes each line straight to the process error stream
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn emit(&self, line: &str) {
        let mut stderr = std::io::stderr().lock();
        // Best-effort: a closed or full stream must not interrupt error handling.
        let _ = writeln!(stderr, "{}", line);
    }
}
