// src/application/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Bookmarks have not been loaded yet")]
    NotLoaded,

    #[error("No record with id '{0}'")]
    RecordNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            err => ApplicationError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::Io(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_domain_error_when_add_context_then_context_kept_inside() {
        let err = ApplicationError::from(DomainError::InvalidInput("bad".to_string()))
            .context("loading");
        assert_eq!(err.to_string(), "Domain error: Invalid input: loading: bad");
    }

    #[test]
    fn given_not_loaded_when_add_context_then_becomes_other() {
        let err = ApplicationError::NotLoaded.context("stats");
        assert_eq!(err.to_string(), "stats: Bookmarks have not been loaded yet");
    }
}
