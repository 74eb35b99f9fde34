//! Errors for whole-graph conversion and the process exit codes they map to.

use thiserror::Error;

use crate::resolve::ResolveError;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("malformed analyzer output: {source} (input begins: {preview})")]
    MalformedInput {
        source: serde_json::Error,
        preview: String,
    },

    #[error("failed to convert symbol {record}: {source}")]
    Symbol {
        record: String,
        source: ResolveError,
    },

    #[error("failed to convert doc {record}: {source}")]
    Doc {
        record: String,
        source: ResolveError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to serialize graph output: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GraphError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::MalformedInput { .. } => ExitCode::MalformedInput,
            Self::Symbol { .. } | Self::Doc { .. } | Self::Resolve(_) => ExitCode::ResolutionFailed,
            Self::Io(_) => ExitCode::IoError,
            Self::Config(_) => ExitCode::ConfigError,
            Self::Serialize(_) => ExitCode::GeneralError,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    MalformedInput = 3,
    ResolutionFailed = 4,
    IoError = 5,
}

impl ExitCode {
    /// Pick the exit code for an error chain, using the first error that has
    /// a specific mapping.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(graph) = cause.downcast_ref::<GraphError>() {
                return graph.exit_code();
            }
            if cause.is::<ResolveError>() {
                return Self::ResolutionFailed;
            }
            if cause.is::<std::io::Error>() {
                return Self::IoError;
            }
        }
        Self::GeneralError
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
