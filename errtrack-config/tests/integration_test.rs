//! Integration tests for errtrack-config

use errtrack_config::*;
use std::io::Write;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = ErrtrackConfig::default();
    assert!(config.validate_all().is_ok());
    assert_eq!(config.error_tracking.mask_headers, vec!["authorization".to_string()]);
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("ENVTEST_MASK_HEADERS", Some("authorization, x-api-key")),
        ("ENVTEST_MAP_TO_INTERNAL_ERROR", Some("SyntaxError,DatabaseError")),
        ("ENVTEST_LOG_LEVEL", Some("debug")),
        ("ENVTEST_LOG_FORMAT", Some("json")),
    ];

    with_vars(vars, || {
        let loader = ConfigLoader::with_prefix("ENVTEST");
        let config = loader.from_env().unwrap();

        assert_eq!(
            config.error_tracking.mask_headers,
            vec!["authorization".to_string(), "x-api-key".to_string()]
        );
        assert_eq!(
            config.error_tracking.map_to_internal_error,
            vec!["SyntaxError".to_string(), "DatabaseError".to_string()]
        );
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    });
}

#[test]
fn test_invalid_env_override() {
    with_vars(vec![("BADENV_LOG_LEVEL", Some("loud"))], || {
        let result = ConfigLoader::with_prefix("BADENV").from_env();
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    });

    with_vars(vec![("BADENV_MASK_HEADERS", Some("bad header"))], || {
        let result = ConfigLoader::with_prefix("BADENV").from_env();
        assert!(matches!(result, Err(ConfigError::DomainError { .. })));
    });
}

#[test]
fn test_yaml_config_serialization() {
    let yaml = ErrtrackConfig::generate_sample();

    let parsed: ErrtrackConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
    assert_eq!(parsed, ErrtrackConfig::default());
}

#[test]
fn test_comprehensive_config() {
    let yaml = r#"
error_tracking:
  mask_headers:
    - Authorization
    - Cookie
  map_to_internal_error:
    - SyntaxError
    - ValidationError

logging:
  level: warn
  format: compact
  include_location: true
"#;

    let config = ConfigLoader::with_prefix("YAMLTEST").from_yaml_str(yaml).unwrap();

    assert_eq!(config.error_tracking.mask_headers, vec!["Authorization", "Cookie"]);
    assert_eq!(
        config.error_tracking.map_to_internal_error,
        vec!["SyntaxError", "ValidationError"]
    );
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.logging.format, LogFormat::Compact);
    assert!(config.logging.include_location);
    assert!(config.logging.include_target);
}

#[test]
fn test_partial_config_uses_defaults() {
    let yaml = r#"
logging:
  level: error
"#;

    let config = ConfigLoader::with_prefix("PARTIALTEST").from_yaml_str(yaml).unwrap();
    assert_eq!(config.error_tracking, ErrorTrackingConfig::default());
    assert_eq!(config.logging.level, LogLevel::Error);

    let config = ConfigLoader::with_prefix("PARTIALTEST").from_yaml_str("").unwrap();
    assert_eq!(config, ErrtrackConfig::default());
}

#[test]
fn test_malformed_config_fails_fast() {
    let loader = ConfigLoader::with_prefix("MALFORMEDTEST");

    let yaml = r#"
error_tracking:
  mask_headers: authorization
"#;
    assert!(matches!(loader.from_yaml_str(yaml), Err(ConfigError::ParseError(_))));

    let json = r#"{"error_tracking": {"map_to_internal_error": "SyntaxError"}}"#;
    assert!(matches!(loader.from_json_str(json), Err(ConfigError::JsonError(_))));

    let yaml = r#"
error_tracking:
  map_to_internal_error: [""]
"#;
    assert!(matches!(loader.from_yaml_str(yaml), Err(ConfigError::DomainError { .. })));
}

#[test]
fn test_load_from_files() {
    let loader = ConfigLoader::with_prefix("FILETEST");

    let mut yaml_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(yaml_file, "error_tracking:\n  mask_headers: [x-secret]").unwrap();
    let config = loader.load(Some(yaml_file.path())).unwrap();
    assert_eq!(config.error_tracking.mask_headers, vec!["x-secret"]);

    let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        json_file,
        r#"{{"error_tracking": {{"mapToInternalError": ["UserInputError"]}}}}"#
    )
    .unwrap();
    let config = loader.from_file(json_file.path()).unwrap();
    assert_eq!(config.error_tracking.map_to_internal_error, vec!["UserInputError"]);

    let missing = loader.from_file("/nonexistent/errtrack.yaml");
    assert!(matches!(missing, Err(ConfigError::FileReadError(_))));
}

#[test]
fn test_domain_specific_validation() {
    let mut tracking = ErrorTrackingConfig::default();
    assert!(tracking.validate().is_ok());

    tracking.mask_headers.push(String::new());
    assert!(tracking.validate().is_err());

    let mut logging = LoggingConfig::default();
    assert!(logging.validate().is_ok());

    logging.filter = Some("  ".to_string());
    assert!(logging.validate().is_err());
}
