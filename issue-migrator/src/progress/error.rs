//! Progress tracking error types.

use thiserror::Error;

/// Errors that can occur while reading or appending tracking entries.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Failed to read or write the tracking file.
    #[error("Tracking file '{path}' I/O error: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
