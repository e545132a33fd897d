// src/cli/error.rs
use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation aborted by user")]
    OperationAborted,

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Application(err) => CliError::Application(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

// Direct conversion from DomainError to CliError (via ApplicationError)
impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(err))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_domain_error_when_converted_then_wrapped_in_application() {
        let err = CliError::from(DomainError::InvalidInput("bad sort".to_string()));
        assert!(matches!(
            err,
            CliError::Application(ApplicationError::Domain(DomainError::InvalidInput(_)))
        ));
    }

    #[test]
    fn given_invalid_input_when_context_then_prefixed() {
        let err = CliError::InvalidInput("empty query".to_string()).context("search");
        assert_eq!(err.to_string(), "Invalid input: search: empty query");
    }

    #[test]
    fn given_aborted_when_context_then_folded_into_other() {
        let err = CliError::OperationAborted.context("browse");
        assert_eq!(err.to_string(), "browse: Operation aborted by user");
    }
}
