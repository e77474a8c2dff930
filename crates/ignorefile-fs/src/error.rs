//! Error types for ignorefile-fs

use std::path::PathBuf;

/// Result type for fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while persisting ignore files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The ignore file could not be opened
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ignore file could not be read
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ignore file could not be created or written
    #[error("failed to create {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The advisory lock on the output file could not be acquired
    #[error("lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// Rule-level error from ignorefile-core
    #[error(transparent)]
    Rules(#[from] ignorefile_core::Error),
}
