//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout {request_secs}s is shorter than a worst-case dialogue cycle ({required_secs}s)")]
    RequestTimeoutTooShort { request_secs: u64, required_secs: u64 },

    #[error("Invalid AI base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Catalog path must not be empty")]
    EmptyCatalogPath,

    #[error("Question thresholds invalid: min_questions={min}, force_after={force}")]
    InvalidQuestionThresholds { min: usize, force: usize },

    #[error("Fallback confidence must be between 1 and 10, got {0}")]
    InvalidFallbackConfidence(u8),

    #[error("Fallback default must not be empty")]
    EmptyFallbackDefault,
}
