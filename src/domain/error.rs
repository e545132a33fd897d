// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot load bookmarks from {source_name}: {message}")]
    SourceUnavailable {
        source_name: String,
        message: String,
    },

    #[error("Failed to parse bookmark payload: {0}")]
    DeserializationError(String),

    #[error("Failed to serialize bookmarks: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::RecordNotFound(msg) => {
                DomainError::RecordNotFound(format!("{}: {}", context.into(), msg))
            }
            DomainError::InvalidInput(msg) => {
                DomainError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            DomainError::DeserializationError(msg) => {
                DomainError::DeserializationError(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context.into(), msg)),
            err => DomainError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::DeserializationError(e.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
