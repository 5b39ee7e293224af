//! Aha! API error types.

use crate::http::UnexpectedStatus;
use thiserror::Error;

/// Errors returned by [`AhaClient`](super::AhaClient).
#[derive(Debug, Error)]
pub enum AhaError {
    /// Network or decoding failure.
    #[error("Aha! request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Aha! API error: {0}")]
    Status(#[from] UnexpectedStatus),

    /// An endpoint or resource URL could not be parsed.
    #[error("Invalid Aha! URL: {0}")]
    Url(#[from] url::ParseError),
}
