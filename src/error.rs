//! Error handling for the SkillMatrix client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillMatrixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Not logged in. Run `skillmatrix login` first")]
    NotAuthenticated,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),
}

impl SkillMatrixError {
    /// True when the backend rejected the bearer token.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, SkillMatrixError::Unauthorized(_))
    }

    /// Message suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            SkillMatrixError::Api { message, .. }
            | SkillMatrixError::Unauthorized(message)
            | SkillMatrixError::Forbidden(message)
            | SkillMatrixError::InvalidInput(message)
            | SkillMatrixError::UnsupportedFormat(message)
            | SkillMatrixError::FileTooLarge(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillMatrixError>;
