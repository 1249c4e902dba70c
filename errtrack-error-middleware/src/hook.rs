//! The error tracking hook: logs a redacted view of every outgoing GraphQL
//! error and collapses configured error kinds into a generic internal error.

use errtrack_config::ErrorTrackingConfig;
use errtrack_logging::{LogSink, TracingSink};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::headers::{mask_headers, Headers};
use crate::record::{ErrorKind, ErrorRecord};
use crate::trace_id::TraceId;

/// Response hook shared by all requests.
///
/// Holds configuration and the log sink only; every call works on its own
/// trace id and masked header copy, so one instance can serve concurrent
/// requests behind an `Arc`.
pub struct ErrorTrackingHook {
    mask_headers: Vec<String>,
    internal_error_kinds: Vec<ErrorKind>,
    sink: Arc<dyn LogSink>,
}

impl ErrorTrackingHook {
    /// Create a hook that logs through `tracing`
    pub fn new(config: &ErrorTrackingConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Create a hook that logs through the given sink
    pub fn with_sink(config: &ErrorTrackingConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            mask_headers: config.mask_headers.clone(),
            internal_error_kinds: config
                .map_to_internal_error
                .iter()
                .map(|kind| ErrorKind::new(kind.as_str()))
                .collect(),
            sink,
        }
    }

    pub fn masked_header_names(&self) -> &[String] {
        &self.mask_headers
    }

    pub fn internal_error_kinds(&self) -> &[ErrorKind] {
        &self.internal_error_kinds
    }

    /// Copy of `headers` safe to log
    pub fn mask_header(&self, headers: &Headers) -> Headers {
        mask_headers(headers, &self.mask_headers)
    }

    /// Log and map one batch of errors.
    ///
    /// The batch shares a single trace id and a single masked header copy.
    /// Output has the same length and order as the input.
    pub fn handle_errors<E: ErrorRecord>(&self, errors: Vec<E>, headers: &Headers) -> Vec<E> {
        let trace_id = TraceId::generate();
        let masked_headers = self.mask_header(headers);

        debug!(trace_id = %trace_id, count = errors.len(), "Handling GraphQL error batch");

        errors
            .into_iter()
            .map(|error| self.handle_error(error, &masked_headers, &trace_id))
            .collect()
    }

    /// Log one error and return it, or its internal error replacement.
    pub fn handle_error<E: ErrorRecord>(
        &self,
        error: E,
        masked_headers: &Headers,
        trace_id: &TraceId,
    ) -> E {
        let serialized_headers =
            serde_json::to_string(masked_headers).unwrap_or_else(|_| "{}".to_string());
        self.emit(trace_id, &serialized_headers);
        self.emit(trace_id, &format!("{} {}", error.kind(), error.message()));

        if let Some(body) = error.source_body() {
            self.emit(trace_id, &format!("Error body: {}", remove_newlines(body)));
        }
        if let Some(body) = error.original_error().and_then(|original| original.source_body()) {
            self.emit(trace_id, &format!("Original error body: {}", remove_newlines(body)));
        }

        if let Some(kind) = self.matching_kind(&error) {
            debug!(trace_id = %trace_id, kind = %kind, "Mapping error to internal server error");
            return E::internal_server_error();
        }

        error
    }

    /// Whether `error` would be replaced by an internal error
    pub fn maps_to_internal_error<E: ErrorRecord>(&self, error: &E) -> bool {
        self.matching_kind(error).is_some()
    }

    // First configured kind matching the error itself or its original cause.
    fn matching_kind<E: ErrorRecord>(&self, error: &E) -> Option<&ErrorKind> {
        let original_kind = error.original_error().map(|original| original.kind());

        self.internal_error_kinds
            .iter()
            .find(|kind| original_kind == Some(*kind) || error.kind() == *kind)
    }

    fn emit(&self, trace_id: &TraceId, line: &str) {
        self.sink.emit(&format!("[{}] {}", trace_id, line));
    }
}

impl Default for ErrorTrackingHook {
    fn default() -> Self {
        Self::new(&ErrorTrackingConfig::default())
    }
}

impl fmt::Debug for ErrorTrackingHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorTrackingHook")
            .field("mask_headers", &self.mask_headers)
            .field("internal_error_kinds", &self.internal_error_kinds)
            .finish_non_exhaustive()
    }
}

/// Replace every `\r\n`, `\r` and `\n` with a single space
pub fn remove_newlines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                result.push(' ');
            }
            '\n' => result.push(' '),
            other => result.push(other),
        }
    }

    result
}
