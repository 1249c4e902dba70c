//! Error tracking for outgoing GraphQL responses
//!
//! Before a response is sent, every error in it is logged together with a
//! redacted copy of the request headers and a short trace id shared by the
//! whole batch. Errors of configured kinds are then replaced by a generic
//! `Internal Server Error` so internal details never reach the client.

pub mod headers;
pub mod hook;
pub mod lifecycle;
pub mod record;
pub mod trace_id;

#[cfg(feature = "graphql")]
pub mod graphql;

// Re-export commonly used types
pub use headers::{mask_headers, Headers, RequestHeaders, MASK};
pub use hook::{remove_newlines, ErrorTrackingHook};
pub use lifecycle::{GraphQLResponseBody, RequestContext, RequestInfo, ResponseEnvelope};
pub use record::{ErrorKind, ErrorRecord, Source, TrackedError, INTERNAL_SERVER_ERROR};
pub use trace_id::TraceId;

pub use errtrack_config::ErrorTrackingConfig;
pub use errtrack_logging::LogSink;

#[cfg(feature = "graphql")]
pub use graphql::ErrorTracking;
