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

    #[error("Server request timeout ({server_secs}s) is shorter than the analysis timeout ({analysis_secs}s)")]
    TimeoutShorterThanAnalysis { server_secs: u64, analysis_secs: u64 },

    #[error("Invalid Gemini base URL")]
    InvalidBaseUrl,

    #[error("Model name must not be empty")]
    EmptyModel,
}
