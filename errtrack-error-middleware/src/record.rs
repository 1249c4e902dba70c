//! Error records as seen by the tracking hook

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Message every mapped error is collapsed into
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Tag classifying an error for mapping purposes.
///
/// Matching is exact tag equality, so custom kinds work the same way as the
/// well-known ones below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorKind(Cow<'static, str>);

impl ErrorKind {
    /// Plain error without a more specific kind
    pub const ERROR: ErrorKind = ErrorKind(Cow::Borrowed("Error"));
    /// Execution error raised while resolving a field
    pub const GRAPHQL: ErrorKind = ErrorKind(Cow::Borrowed("GraphQLError"));
    /// The document could not be parsed
    pub const SYNTAX: ErrorKind = ErrorKind(Cow::Borrowed("SyntaxError"));
    /// The document parsed but failed validation against the schema
    pub const VALIDATION: ErrorKind = ErrorKind(Cow::Borrowed("ValidationError"));
    pub const USER_INPUT: ErrorKind = ErrorKind(Cow::Borrowed("UserInputError"));
    pub const AUTHENTICATION: ErrorKind = ErrorKind(Cow::Borrowed("AuthenticationError"));
    pub const FORBIDDEN: ErrorKind = ErrorKind(Cow::Borrowed("ForbiddenError"));

    pub fn new(kind: impl Into<String>) -> Self {
        Self(Cow::Owned(kind.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ErrorKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for ErrorKind {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}

/// Document text attached to an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub body: String,
}

/// Owned error record: a kind, a message, optionally the document that
/// caused it and optionally the lower-level error it wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_error: Option<Box<TrackedError>>,
}

impl TrackedError {
    pub fn new(kind: impl Into<ErrorKind>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            source: None,
            original_error: None,
        }
    }

    /// Attach the document text that triggered this error
    pub fn with_source_body(mut self, body: impl Into<String>) -> Self {
        self.source = Some(Source { body: body.into() });
        self
    }

    /// Wrap a lower-level cause
    pub fn with_original(mut self, original: TrackedError) -> Self {
        self.original_error = Some(Box::new(original));
        self
    }

    /// Generic replacement error; carries nothing from the error it replaces
    pub fn internal_server_error() -> Self {
        Self::new(ErrorKind::ERROR, INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for TrackedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TrackedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.original_error
            .as_deref()
            .map(|original| original as &(dyn std::error::Error + 'static))
    }
}

/// What the tracking hook needs from an error to log and classify it.
pub trait ErrorRecord {
    fn kind(&self) -> &ErrorKind;

    fn message(&self) -> &str;

    /// Raw document text, when the error is tied to one
    fn source_body(&self) -> Option<&str>;

    /// The wrapped lower-level cause, one level deep
    fn original_error(&self) -> Option<&TrackedError>;

    /// Build the generic error that replaces a mapped one
    fn internal_server_error() -> Self
    where
        Self: Sized;
}

impl ErrorRecord for TrackedError {
    fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn source_body(&self) -> Option<&str> {
        self.source.as_ref().map(|source| source.body.as_str())
    }

    fn original_error(&self) -> Option<&TrackedError> {
        self.original_error.as_deref()
    }

    fn internal_server_error() -> Self {
        TrackedError::internal_server_error()
    }
}
