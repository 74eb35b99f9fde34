//! Error types for identity resolution.

use thiserror::Error;

/// Why a path or namespace path could not be given a canonical identity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("could not relativize path {path}: no known root contains it")]
    OutsideRoots { path: String },

    #[error("could not resolve owning repository for {path}: no requirement provides it")]
    NoMatchingRequirement { path: String },

    #[error("requirement '{requirement}' provides {path} but declares no repository URL")]
    MissingRepository { path: String, requirement: String },

    #[error("could not resolve symbol path {path}")]
    UnresolvedSymbolPath { path: String },
}

pub type ResolveResult<T> = Result<T, ResolveError>;
