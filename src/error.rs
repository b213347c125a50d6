//! Error handling and custom error types
//!
//! Provides unified error handling across both flows using thiserror.

use thiserror::Error;

/// Input rejected before any model call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Prompt must be at least {min} characters.")]
    PromptTooShort { min: usize, actual: usize },

    #[error("Prompt must be {max} characters or less.")]
    PromptTooLong { max: usize, actual: usize },

    #[error("Name must be at least {min} characters.")]
    NameTooShort { min: usize, actual: usize },

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Message must be at least {min} characters.")]
    MessageTooShort { min: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    ContentBlocked(String),

    #[error("{0}")]
    Model(String),

    #[error("Failed to generate image.")]
    GenerationFailed,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, Error>;
