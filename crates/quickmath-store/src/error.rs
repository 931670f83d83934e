//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur reading or writing stored best scores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The scores file exists but could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scores file does not contain a valid score list.
    #[error("corrupt scores file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The scores could not be serialized.
    #[error("failed to encode scores: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns `true` if the stored data itself is bad, as opposed to the
    /// file being unreachable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}
