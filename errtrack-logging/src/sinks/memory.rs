//! In-memory sink used to inspect emitted lines

use std::sync::{Mutex, MutexGuard};

use super::LogSink;

/// Keeps every emitted line in order
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// Drop all captured lines
    pub fn clear(&self) {
        self.guard().clear();
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    // A panic while holding the lock leaves the vector intact, so keep using it.
    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn emit(&self, line: &str) {
        self.guard().push(line.to_string());
    }
}
