use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("HTTP transport error: {0}")]
    #[diagnostic(code(borocal::http))]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    #[diagnostic(code(borocal::url))]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(borocal::config))]
    Config(String),

    #[error("Calendar API error: {0}")]
    #[diagnostic(code(borocal::calendar))]
    Calendar(String),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(borocal::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(borocal::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type CalResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create calendar errors
pub fn calendar_error(message: &str) -> Error {
    Error::Calendar(message.to_string())
}
