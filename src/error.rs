//! Error types for the Varline command line

use thiserror::Error;

/// Errors from parsing the command line
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Invalid context binding '{0}': expected name=value")]
    InvalidBinding(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
