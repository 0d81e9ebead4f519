//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, Format};

/// Application errors wrap domain errors and add conversion-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Please select a valid code.")]
    NoSelection,

    #[error(
        "Cannot convert {} to {}",
        .from.as_str().to_uppercase(),
        .to.as_str().to_uppercase()
    )]
    UnsupportedConversion { from: Format, to: Format },

    #[error("invalid converter table: {message}")]
    InvalidConverterTable { message: String },

    #[error("Cannot convert this code to {}: {message}", .target.as_str().to_uppercase())]
    Render { target: Format, message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
