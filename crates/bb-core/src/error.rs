use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Session not found: {id}")]
    SessionNotFound { id: String },
    #[error("Image not found: {id}")]
    ImageNotFound { id: String },
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Command cannot be empty")]
    EmptyCommand,
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),
    #[error("Engine error: {0}")]
    Engine(String),
    #[error("Engine call timed out")]
    Timeout,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BotError {
    /// Stable error code carried in the envelope's `error.code` field.
    pub fn code(&self) -> &'static str {
        match self {
            BotError::SessionNotFound { .. } => "SESSION_NOT_FOUND",
            BotError::ImageNotFound { .. } => "IMAGE_NOT_FOUND",
            BotError::InvalidImage(_) => "INVALID_IMAGE",
            BotError::EmptyCommand => "EMPTY_COMMAND",
            BotError::InvalidSessionId(_) => "INVALID_SESSION",
            BotError::Engine(_) => "COMMAND_FAILED",
            BotError::Timeout => "COMMAND_TIMEOUT",
            BotError::Serialization(_) => "SERIALIZATION_ERROR",
            BotError::Other(_) => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
