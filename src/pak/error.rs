#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

use crate::pak::version::Version;

#[derive(Debug, Error)]
pub enum PakError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("input {}: {message}", .path.display())]
    Input { path: PathBuf, message: String },

    #[error("version mismatch between this tool ({expected}) and the compiled asset ({found})")]
    VersionMismatch { expected: Version, found: Version },

    #[error("attempting to pack an asset named \"{0}\" multiple times, which would produce ambiguous names")]
    DuplicateName(String),

    #[error("configuration: {0}")]
    Config(String),

    #[error("invalid data: {0}")]
    Invalid(String),
}

impl PakError {
    pub(crate) fn input(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        PakError::Input {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type PakResult<T> = Result<T, PakError>;
