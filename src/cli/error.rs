//! CLI-level errors (wraps infrastructure errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("input file not found: {}", .0.display())]
    NoInput(PathBuf),

    #[error("cannot write {}", .path.display())]
    CantCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Conversion failed; the notifier has already reported why.
    #[error("no output produced")]
    NoOutput,
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoOutput => crate::exitcode::NO_OUTPUT,
            CliError::NoInput(_) => crate::exitcode::NOINPUT,
            CliError::CantCreate { .. } => crate::exitcode::CANTCREAT,
            CliError::Infra(InfraError::Io { .. }) => crate::exitcode::IOERR,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(DomainError::UnknownFormat(_)) => crate::exitcode::USAGE,
                ApplicationError::Domain(_) | ApplicationError::NoSelection => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::UnsupportedConversion { .. } => crate::exitcode::USAGE,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::InvalidConverterTable { .. }
                | ApplicationError::Render { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }
}
