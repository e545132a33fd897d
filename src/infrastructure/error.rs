use crate::domain::error::DomainError;
use thiserror::Error;

/// Failures of a concrete source, before they are mapped to the domain.
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Invalid source location: {0}")]
    InvalidLocation(String),
}

impl InfrastructureError {
    /// Attaches the source description the error came from.
    pub fn at(self, source_name: impl Into<String>) -> DomainError {
        match self {
            InfrastructureError::InvalidLocation(msg) => DomainError::InvalidInput(msg),
            other => DomainError::SourceUnavailable {
                source_name: source_name.into(),
                message: other.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for InfrastructureError {
    fn from(e: reqwest::Error) -> Self {
        InfrastructureError::Network(e.to_string())
    }
}

impl From<std::io::Error> for InfrastructureError {
    fn from(e: std::io::Error) -> Self {
        InfrastructureError::FileSystem(e.to_string())
    }
}
