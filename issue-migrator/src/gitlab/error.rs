//! GitLab API error types.

use crate::http::UnexpectedStatus;
use thiserror::Error;

/// Errors returned by [`GitLabClient`](super::GitLabClient).
#[derive(Debug, Error)]
pub enum GitLabError {
    /// Network or decoding failure.
    #[error("GitLab request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("GitLab API error: {0}")]
    Status(#[from] UnexpectedStatus),

    /// An endpoint URL could not be built.
    #[error("Invalid GitLab URL: {0}")]
    Url(#[from] url::ParseError),
}
