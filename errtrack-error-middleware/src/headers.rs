//! Request header snapshots and masking

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Replacement value for masked headers
pub const MASK: &str = "***";

/// Header name to value, as supplied by the host
pub type Headers = BTreeMap<String, String>;

/// Copy of `headers` with every listed header replaced by [`MASK`].
///
/// Names are compared case-insensitively; names that are not present are
/// skipped. The input is left untouched.
pub fn mask_headers<S: AsRef<str>>(headers: &Headers, names: &[S]) -> Headers {
    let mut masked = headers.clone();

    for (key, value) in masked.iter_mut() {
        if names.iter().any(|name| key.eq_ignore_ascii_case(name.as_ref())) {
            *value = MASK.to_string();
        }
    }

    masked
}

/// Inbound request headers, stored in the GraphQL request data by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestHeaders(pub Headers);

impl RequestHeaders {
    pub fn new(headers: Headers) -> Self {
        Self(headers)
    }

    pub fn as_map(&self) -> &Headers {
        &self.0
    }

    pub fn into_inner(self) -> Headers {
        self.0
    }
}

impl From<Headers> for RequestHeaders {
    fn from(headers: Headers) -> Self {
        Self(headers)
    }
}

/// Header names come out lower-case; repeated headers are joined with `, `.
impl From<&http::HeaderMap> for RequestHeaders {
    fn from(header_map: &http::HeaderMap) -> Self {
        let headers = header_map
            .keys()
            .map(|name| {
                let value = header_map
                    .get_all(name)
                    .iter()
                    .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                    .collect::<Vec<_>>()
                    .join(", ");
                (name.as_str().to_string(), value)
            })
            .collect();

        Self(headers)
    }
}
