//! Shared HTTP plumbing for the API clients.

use reqwest::{Client, Response};
use thiserror::Error;
use url::Url;

/// A non-success HTTP response.
#[derive(Debug, Error)]
#[error("{status} from {url}: {body}")]
pub struct UnexpectedStatus {
    /// HTTP status code.
    pub status: u16,
    /// Requested URL.
    pub url: String,
    /// Response body, possibly empty.
    pub body: String,
}

/// Builds an HTTP client. No timeouts are configured.
pub(crate) fn build_client(verify_ssl: bool) -> reqwest::Result<Client> {
    Client::builder()
        .danger_accept_invalid_certs(!verify_ssl)
        .build()
}

/// Returns `url` with a trailing slash so relative joins append to its path.
pub(crate) fn api_base(url: &Url) -> Url {
    let mut base = url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// Passes success responses through and turns anything else into
/// [`UnexpectedStatus`].
pub(crate) async fn check_status(response: Response) -> Result<Response, UnexpectedStatus> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(UnexpectedStatus {
        status: status.as_u16(),
        url,
        body,
    })
}
