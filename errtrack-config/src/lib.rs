//! Domain-driven configuration for GraphQL error tracking
//!
//! Configuration is split by functional domain (error tracking, logging),
//! loaded from YAML/JSON or environment variables, and validated once at
//! startup.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    error_tracking::ErrorTrackingConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    ErrtrackConfig,
};
