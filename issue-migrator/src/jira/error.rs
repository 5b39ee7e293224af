//! Jira API error types.

use crate::http::UnexpectedStatus;
use thiserror::Error;

/// Errors returned by [`JiraClient`](super::JiraClient).
#[derive(Debug, Error)]
pub enum JiraError {
    /// Network or decoding failure.
    #[error("Jira request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Jira API error: {0}")]
    Status(#[from] UnexpectedStatus),

    /// An endpoint URL could not be built.
    #[error("Invalid Jira URL: {0}")]
    Url(#[from] url::ParseError),
}
