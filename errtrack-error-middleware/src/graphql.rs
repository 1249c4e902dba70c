//! async-graphql integration
//!
//! [`ErrorTracking`] is registered on the schema builder; for every request it
//! runs the response errors through the shared [`ErrorTrackingHook`] right
//! before the response leaves the schema.
//!
//! ```ignore
//! let schema = Schema::build(Query, EmptyMutation, EmptySubscription)
//!     .extension(ErrorTracking::from_config(&config.error_tracking))
//!     .finish();
//!
//! let request = async_graphql::Request::new(query).data(RequestHeaders::from(&headers));
//! let response = schema.execute(request).await;
//! ```

use async_graphql::extensions::{
    Extension, ExtensionContext, ExtensionFactory, NextExecute, NextParseQuery, NextRequest,
    NextValidation,
};
use async_graphql::parser::types::ExecutableDocument;
use async_graphql::{Response, ServerError, ServerResult, ValidationResult, Value, Variables};
use errtrack_config::ErrorTrackingConfig;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::headers::{Headers, RequestHeaders};
use crate::hook::ErrorTrackingHook;
use crate::record::{ErrorKind, ErrorRecord, TrackedError, INTERNAL_SERVER_ERROR};

/// Error extension whose string value is used as the error kind
pub const KIND_EXTENSION: &str = "code";

/// Extension factory wiring the tracking hook into a schema
#[derive(Debug, Clone)]
pub struct ErrorTracking {
    hook: Arc<ErrorTrackingHook>,
}

impl ErrorTracking {
    pub fn new(hook: ErrorTrackingHook) -> Self {
        Self { hook: Arc::new(hook) }
    }

    /// Share a hook that is also used outside the schema
    pub fn from_shared(hook: Arc<ErrorTrackingHook>) -> Self {
        Self { hook }
    }

    pub fn from_config(config: &ErrorTrackingConfig) -> Self {
        Self::new(ErrorTrackingHook::new(config))
    }
}

impl Default for ErrorTracking {
    fn default() -> Self {
        Self::new(ErrorTrackingHook::default())
    }
}

impl ExtensionFactory for ErrorTracking {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(ErrorTrackingExtension {
            hook: self.hook.clone(),
            state: Mutex::new(RequestState::default()),
        })
    }
}

/// What one request has revealed by the time its response is ready
#[derive(Debug, Default)]
struct RequestState {
    document: Option<String>,
    failed_stage: Option<ErrorKind>,
    headers: Option<Headers>,
}

struct ErrorTrackingExtension {
    hook: Arc<ErrorTrackingHook>,
    state: Mutex<RequestState>,
}

impl ErrorTrackingExtension {
    fn state(&self) -> MutexGuard<'_, RequestState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn request_headers(ctx: &ExtensionContext<'_>) -> Option<Headers> {
        ctx.data_opt::<RequestHeaders>().map(|headers| headers.as_map().clone())
    }

    // Request data only becomes visible once the request has been prepared,
    // so headers are picked up from the later stages.
    fn remember_headers(&self, ctx: &ExtensionContext<'_>) {
        let mut state = self.state();
        if state.headers.is_none() {
            state.headers = Self::request_headers(ctx);
        }
    }
}

#[async_trait::async_trait]
impl Extension for ErrorTrackingExtension {
    async fn request(&self, ctx: &ExtensionContext<'_>, next: NextRequest<'_>) -> Response {
        let mut response = next.run(ctx).await;
        if response.errors.is_empty() {
            return response;
        }

        let (headers, document, failed_stage) = {
            let mut state = self.state();
            let headers = state
                .headers
                .take()
                .or_else(|| Self::request_headers(ctx))
                .unwrap_or_default();
            (headers, state.document.take(), state.failed_stage.take())
        };

        let records: Vec<ServerErrorRecord> = std::mem::take(&mut response.errors)
            .into_iter()
            .map(|error| {
                ServerErrorRecord::classify(error, failed_stage.as_ref(), document.as_deref())
            })
            .collect();

        response.errors = self
            .hook
            .handle_errors(records, &headers)
            .into_iter()
            .map(ServerErrorRecord::into_server_error)
            .collect();

        response
    }

    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        self.remember_headers(ctx);
        self.state().document = Some(query.to_string());

        let result = next.run(ctx, query, variables).await;
        if result.is_err() {
            self.state().failed_stage = Some(ErrorKind::SYNTAX);
        }
        result
    }

    async fn validation(
        &self,
        ctx: &ExtensionContext<'_>,
        next: NextValidation<'_>,
    ) -> Result<ValidationResult, Vec<ServerError>> {
        self.remember_headers(ctx);

        let result = next.run(ctx).await;
        if result.is_err() {
            self.state().failed_stage = Some(ErrorKind::VALIDATION);
        }
        result
    }

    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        self.remember_headers(ctx);
        next.run(ctx, operation_name).await
    }
}

/// A `ServerError` together with the kind and document the hook needs
struct ServerErrorRecord {
    error: ServerError,
    kind: ErrorKind,
    body: Option<String>,
}

impl ServerErrorRecord {
    /// Parse and validation failures are tagged by stage and carry the
    /// document; anything else is tagged by its `code` extension.
    fn classify(
        error: ServerError,
        failed_stage: Option<&ErrorKind>,
        document: Option<&str>,
    ) -> Self {
        if let Some(kind) = failed_stage {
            return Self {
                error,
                kind: kind.clone(),
                body: document.map(str::to_string),
            };
        }

        let kind = match error.extensions.as_ref().and_then(|ext| ext.get(KIND_EXTENSION)) {
            Some(Value::String(code)) if !code.is_empty() => ErrorKind::new(code.as_str()),
            _ => ErrorKind::GRAPHQL,
        };

        Self {
            error,
            kind,
            body: None,
        }
    }

    fn into_server_error(self) -> ServerError {
        self.error
    }
}

impl ErrorRecord for ServerErrorRecord {
    fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    fn message(&self) -> &str {
        &self.error.message
    }

    fn source_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    fn original_error(&self) -> Option<&TrackedError> {
        self.error.source::<TrackedError>()
    }

    fn internal_server_error() -> Self {
        Self {
            error: ServerError::new(INTERNAL_SERVER_ERROR, None),
            kind: ErrorKind::ERROR,
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Error, ErrorExtensions, Pos};

    #[test]
    fn test_classify_by_stage() {
        let error = ServerError::new("unexpected end of input", Some(Pos { line: 1, column: 3 }));
        let record = ServerErrorRecord::classify(error, Some(&ErrorKind::SYNTAX), Some("{ me"));

        assert_eq!(record.kind(), &ErrorKind::SYNTAX);
        assert_eq!(record.source_body(), Some("{ me"));
        assert_eq!(record.message(), "unexpected end of input");
    }

    #[test]
    fn test_classify_by_code_extension() {
        let error = Error::new("bad id")
            .extend_with(|_, e| e.set("code", "UserInputError".to_string()))
            .into_server_error(Pos::default());
        let record = ServerErrorRecord::classify(error, None, Some("{ user(id: 1) { id } }"));

        assert_eq!(record.kind(), &ErrorKind::USER_INPUT);
        assert_eq!(record.source_body(), None);
    }

    #[test]
    fn test_classify_defaults_to_graphql_error() {
        let record = ServerErrorRecord::classify(ServerError::new("boom", None), None, None);
        assert_eq!(record.kind(), &ErrorKind::GRAPHQL);
        assert!(record.original_error().is_none());
    }

    #[test]
    fn test_original_error_from_source() {
        let cause = TrackedError::new("DatabaseError", "connection refused");
        let error = Error::new_with_source(cause.clone()).into_server_error(Pos::default());
        let record = ServerErrorRecord::classify(error, None, None);

        assert_eq!(record.original_error(), Some(&cause));
    }

    #[test]
    fn test_internal_server_error_record_is_bare() {
        let server_error = ServerErrorRecord::internal_server_error().into_server_error();
        assert_eq!(server_error.message, INTERNAL_SERVER_ERROR);
        assert!(server_error.locations.is_empty());
        assert!(server_error.path.is_empty());
        assert!(server_error.extensions.is_none());
    }
}
