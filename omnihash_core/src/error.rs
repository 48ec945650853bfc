//! Error types for the omnihash core library

use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the omnihash core library
///
/// Errors fall into two categories:
/// - Source errors: the byte source could not be acquired at all
/// - Stream errors: the byte source failed partway through a hashing pass
#[derive(Error, Debug)]
pub enum Error {
    /// The byte source could not be acquired (unreadable file, failed fetch).
    /// Recoverable per input item; other items keep processing.
    #[error("cannot read source: {0}")]
    Source(String),

    /// The byte source failed mid-stream. The whole pass for that item is
    /// discarded; no partial digests are ever reported.
    #[error(transparent)]
    Stream(#[from] std::io::Error),
}

impl Error {
    /// Create a source-acquisition error from any displayable cause.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }
}
