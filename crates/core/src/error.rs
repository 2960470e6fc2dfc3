//! Error types for the notice generator.
//!
//! One enum covers every failure the service can surface: configuration,
//! upstream model failures, prompt rendering and (de)serialization.

use thiserror::Error;

/// Unified error type for the notice generator.
///
/// Every fallible function returns `Result<T, AppError>`. The HTTP layer maps
/// each variant to a status code through [`AppError::code`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors, including a missing model credential
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport or call failure while talking to the model provider
    #[error("LLM error: {0}")]
    Llm(String),

    /// The model call succeeded but produced no usable text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Prompt rendering and catalog errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Stable machine-readable code for this error class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration_error",
            Self::Io(_) => "io_error",
            Self::Llm(_) => "upstream_error",
            Self::EmptyResponse(_) => "upstream_empty",
            Self::Prompt(_) => "prompt_error",
            Self::Serialization(_) => "serialization_error",
            Self::Other(_) => "internal_error",
        }
    }

    /// The message without the category prefix added by `Display`.
    pub fn detail(&self) -> String {
        match self {
            Self::Config(msg)
            | Self::Llm(msg)
            | Self::EmptyResponse(msg)
            | Self::Prompt(msg)
            | Self::Serialization(msg)
            | Self::Other(msg) => msg.clone(),
            Self::Io(err) => err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
