//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors represent shorthand or tree violations.
/// These are independent of rendering and host concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Please select some lines")]
    EmptyInput,

    #[error("cannot parse line {line_number}: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error("line {line_number} starts a second root node: {line:?}")]
    MultipleRoots { line_number: usize, line: String },

    #[error("tree nesting exceeds limit of {limit}")]
    NestingTooDeep { limit: usize },

    #[error("Cannot convert these lines to a JS Object: {0}")]
    InvalidJson(String),

    #[error("unknown format: {0}")]
    UnknownFormat(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
