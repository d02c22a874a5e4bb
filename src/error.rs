//! Error types shared across the catalogue and its persistence layer.
//!
//! Every failure mode here is recoverable by the caller: retry with a
//! different path, toggle `overwrite`, or simply accept that the entity was
//! absent. Nothing in the crate panics for these conditions, so front ends
//! can surface each variant as a friendly message.

use std::path::PathBuf;

use thiserror::Error;

/// All the ways a catalogue operation can fail.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// A remove operation named an entity that the collection does not hold.
    #[error("{0} not found")]
    NotFound(String),

    /// `save` refused to clobber an existing snapshot because `overwrite`
    /// was off.
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    /// The snapshot's parent directory is missing and `make_dirs` was off.
    #[error("path does not exist and make_dirs is off: {0}")]
    PathUnavailable(PathBuf),

    /// The file at the load path exists but is not a valid catalogue
    /// snapshot. The underlying cause is logged before this is returned.
    #[error("not a valid catalogue file: {0}")]
    CorruptData(String),

    /// The load path does not point at a file.
    #[error("file does not exist: {0}")]
    Missing(PathBuf),

    /// Filesystem trouble while preparing the snapshot location.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unexpected SQLite failure while writing a snapshot. Read-side
    /// failures are folded into [`CatalogueError::CorruptData`] instead.
    #[error("snapshot storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Result alias used throughout the crate.
pub type CatalogueResult<T> = Result<T, CatalogueError>;
