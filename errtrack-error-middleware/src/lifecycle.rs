//! Host-agnostic response envelope and the `will_send_response` integration point

use serde::{Deserialize, Serialize};

use crate::headers::Headers;
use crate::hook::ErrorTrackingHook;
use crate::record::{ErrorRecord, TrackedError};

/// What the host hands over right before serializing a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "E: Deserialize<'de>"))]
pub struct ResponseEnvelope<E = TrackedError> {
    pub context: RequestContext,
    pub graphql_response: GraphQLResponseBody<E>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub request: RequestInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    #[serde(default)]
    pub headers: Headers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>"))]
pub struct GraphQLResponseBody<E = TrackedError> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<E>>,
}

impl<E> Default for GraphQLResponseBody<E> {
    fn default() -> Self {
        Self {
            data: None,
            errors: None,
        }
    }
}

impl<E> ResponseEnvelope<E> {
    pub fn new(headers: Headers, graphql_response: GraphQLResponseBody<E>) -> Self {
        Self {
            context: RequestContext {
                request: RequestInfo { headers },
            },
            graphql_response,
        }
    }
}

impl ErrorTrackingHook {
    /// Run the response's errors through the hook, if there are any.
    ///
    /// The envelope is returned untouched when `errors` is absent or empty.
    pub fn will_send_response<E: ErrorRecord>(
        &self,
        mut envelope: ResponseEnvelope<E>,
    ) -> ResponseEnvelope<E> {
        let has_errors = envelope
            .graphql_response
            .errors
            .as_ref()
            .is_some_and(|errors| !errors.is_empty());

        if has_errors {
            if let Some(errors) = envelope.graphql_response.errors.take() {
                let handled = self.handle_errors(errors, &envelope.context.request.headers);
                envelope.graphql_response.errors = Some(handled);
            }
        }

        envelope
    }
}
