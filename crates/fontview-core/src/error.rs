// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the font viewer core.
///
/// Every variant is local to the user action that triggered it: none of them
/// poison the font list or the registry, and nothing is retried automatically.
#[derive(Error, Debug)]
pub enum FontViewError {
    // Persisted path list
    #[error("Failed to persist font path list at {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Installation into the managed directory
    #[error("Failed to install font {file:?}: {source}")]
    Install {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a font file: {path:?}")]
    UnsupportedFile { path: PathBuf },

    // Registration
    #[error("Unable to load font file {path:?}: {reason}")]
    UnreadableFont { path: PathBuf, reason: String },

    #[error("No family name could be read from {path:?}")]
    NoFamilyName { path: PathBuf },

    #[error("Unknown font family: {family}")]
    UnknownFamily { family: String },

    // Removal
    #[error("Failed to delete {path:?}: {source}")]
    Deletion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Preview
    #[error("Render error: {message}")]
    Render { message: String },
}

/// Coarse classification used by the shell to word its notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    PersistenceFailure,
    InstallFailure,
    UnreadableFont,
    NoFamilyName,
    DeletionFailure,
    Other,
}

impl FontViewError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FontViewError::Persistence { .. } => FailureKind::PersistenceFailure,
            FontViewError::Install { .. } => FailureKind::InstallFailure,
            FontViewError::UnreadableFont { .. } => FailureKind::UnreadableFont,
            FontViewError::NoFamilyName { .. } => FailureKind::NoFamilyName,
            FontViewError::Deletion { .. } => FailureKind::DeletionFailure,
            FontViewError::UnsupportedFile { .. }
            | FontViewError::UnknownFamily { .. }
            | FontViewError::Render { .. } => FailureKind::Other,
        }
    }
}

pub type FontViewResult<T> = Result<T, FontViewError>;
