//! Error tracking configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::validation::{validate_header_name, validate_required_string, Validatable};

/// Header masked when nothing else is configured
pub const DEFAULT_MASK_HEADER: &str = "authorization";

/// Which request headers are redacted before logging, and which error kinds
/// are collapsed into a generic internal error before reaching the client.
///
/// Absent options take their defaults. Options of the wrong shape (a string
/// where a list is expected, for example) fail deserialization instead of
/// being silently replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorTrackingConfig {
    /// Header names to redact, compared case-insensitively
    #[serde(alias = "maskHeaders")]
    pub mask_headers: Vec<String>,

    /// Error kind tags replaced by `Internal Server Error`
    #[serde(alias = "mapToInternalError")]
    pub map_to_internal_error: Vec<String>,
}

impl Default for ErrorTrackingConfig {
    fn default() -> Self {
        Self {
            mask_headers: vec![DEFAULT_MASK_HEADER.to_string()],
            map_to_internal_error: Vec::new(),
        }
    }
}

impl ErrorTrackingConfig {
    /// Replace the masked header list
    pub fn with_mask_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mask_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the list of error kinds mapped to an internal error
    pub fn with_internal_error_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.map_to_internal_error = kinds.into_iter().map(Into::into).collect();
        self
    }
}

impl Validatable for ErrorTrackingConfig {
    fn validate(&self) -> ConfigResult<()> {
        for header in &self.mask_headers {
            validate_header_name(header, "mask_headers", self.domain_name())?;
        }

        for kind in &self.map_to_internal_error {
            validate_required_string(kind, "map_to_internal_error", self.domain_name())?;

            if kind.chars().any(char::is_whitespace) {
                return Err(self.validation_error(format!(
                    "map_to_internal_error entry '{}' must not contain whitespace",
                    kind
                )));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "error_tracking"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tracking_defaults() {
        let config = ErrorTrackingConfig::default();
        assert_eq!(config.mask_headers, vec!["authorization".to_string()]);
        assert!(config.map_to_internal_error.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_absent_options_use_defaults() {
        let config: ErrorTrackingConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ErrorTrackingConfig::default());

        let config: ErrorTrackingConfig =
            serde_yaml::from_str("map_to_internal_error: [SyntaxError]").unwrap();
        assert_eq!(config.mask_headers, vec!["authorization".to_string()]);
        assert_eq!(config.map_to_internal_error, vec!["SyntaxError".to_string()]);
    }

    #[test]
    fn test_camel_case_aliases() {
        let json = r#"{"maskHeaders": ["x-api-key"], "mapToInternalError": ["ValidationError"]}"#;
        let config: ErrorTrackingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.mask_headers, vec!["x-api-key".to_string()]);
        assert_eq!(config.map_to_internal_error, vec!["ValidationError".to_string()]);
    }

    #[test]
    fn test_malformed_shape_is_rejected() {
        let result: Result<ErrorTrackingConfig, _> =
            serde_yaml::from_str("mask_headers: authorization");
        assert!(result.is_err());

        let result: Result<ErrorTrackingConfig, _> =
            serde_json::from_str(r#"{"mapToInternalError": {"kind": "SyntaxError"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_tracking_validation() {
        let config = ErrorTrackingConfig::default().with_mask_headers(["Authorization", "X-Token"]);
        assert!(config.validate().is_ok());

        let config = ErrorTrackingConfig::default().with_mask_headers(["not a header"]);
        assert!(config.validate().is_err());

        let config = ErrorTrackingConfig::default().with_internal_error_kinds([""]);
        assert!(config.validate().is_err());

        let config = ErrorTrackingConfig::default().with_internal_error_kinds(["Syntax Error"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_mask_list_is_valid() {
        let config = ErrorTrackingConfig::default().with_mask_headers(Vec::<String>::new());
        assert!(config.mask_headers.is_empty());
        assert!(config.validate().is_ok());
    }
}
