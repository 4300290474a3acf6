//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic, including level names)
//! - Validate addresses, base path shape and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("logging_ui.base_path: '{0}' {1}")]
    InvalidBasePath(String, &'static str),

    #[error("logging_ui.categories: logger name must not be empty")]
    EmptyCategory,

    #[error("logging_ui.preregistered: logger name must not be empty")]
    EmptyPreregistered,

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    let base_path = &config.logging_ui.base_path;
    let normalized = config.logging_ui.normalized_base_path();
    if base_path.trim() != base_path.as_str() || normalized.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidBasePath(
            base_path.clone(),
            "must not contain whitespace",
        ));
    }
    if normalized.contains(['{', '}', '*'])
        || normalized.split('/').any(|segment| segment.starts_with(':'))
    {
        errors.push(ValidationError::InvalidBasePath(
            base_path.clone(),
            "must not contain route parameters",
        ));
    }
    if normalized.contains("//") {
        errors.push(ValidationError::InvalidBasePath(
            base_path.clone(),
            "must not contain empty segments",
        ));
    }

    if config.logging_ui.categories.keys().any(|name| name.trim().is_empty()) {
        errors.push(ValidationError::EmptyCategory);
    }
    if config.logging_ui.preregistered.iter().any(|name| name.trim().is_empty()) {
        errors.push(ValidationError::EmptyPreregistered);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::Zero("limits.max_body_size"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
