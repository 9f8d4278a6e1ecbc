//! Snapshot error types

use feeds::FeedError;
use thiserror::Error;

/// Errors raised inside one analytical block.
///
/// These never cross the assembler boundary as errors: the assembler
/// converts each one into a labeled entry in the document's error list.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Upstream fetch or decode failure
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Fetched data was well-formed but unusable for this block
    #[error("{0}")]
    Data(String),
}

/// Result type alias for block operations
pub type Result<T> = std::result::Result<T, SnapshotError>;

impl SnapshotError {
    /// Create a data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}
