//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check naming conventions are usable as file names
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FileRouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::FileRouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("loader.extension must not be empty")]
    EmptyExtension,

    #[error("loader.extension `{0}` must not contain a dot")]
    DottedExtension(String),

    #[error("loader.index_stem must not be empty")]
    EmptyIndexStem,

    #[error("loader.index_stem `{0}` must be a plain file stem")]
    InvalidIndexStem(String),

    #[error("loader.ignore_prefix must not be empty")]
    EmptyIgnorePrefix,

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("server.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &FileRouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let loader = &config.loader;

    if loader.extension.is_empty() {
        errors.push(ValidationError::EmptyExtension);
    } else if loader.extension.contains('.') {
        errors.push(ValidationError::DottedExtension(loader.extension.clone()));
    }

    if loader.index_stem.is_empty() {
        errors.push(ValidationError::EmptyIndexStem);
    } else if loader.index_stem.contains(['/', '\\', '[', ']', '.']) {
        errors.push(ValidationError::InvalidIndexStem(loader.index_stem.clone()));
    }

    // An empty prefix would match every name.
    if loader.ignore_prefix.is_empty() {
        errors.push(ValidationError::EmptyIgnorePrefix);
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.server.bind_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&FileRouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = FileRouterConfig::default();
        config.loader.extension = ".rs".into();
        config.loader.index_stem = "api/route".into();
        config.loader.ignore_prefix = String::new();
        config.server.request_timeout_secs = 0;
        config.server.bind_address = "localhost".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DottedExtension(".rs".into()),
                ValidationError::InvalidIndexStem("api/route".into()),
                ValidationError::EmptyIgnorePrefix,
                ValidationError::ZeroTimeout,
                ValidationError::InvalidBindAddress("localhost".into()),
            ]
        );
    }

    #[test]
    fn test_empty_names() {
        let mut config = FileRouterConfig::default();
        config.loader.extension = String::new();
        config.loader.index_stem = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyExtension));
        assert!(errors.contains(&ValidationError::EmptyIndexStem));
    }
}
