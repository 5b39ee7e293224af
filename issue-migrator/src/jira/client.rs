//! Jira REST API v2 client.

use super::models::{IssueDetails, IssueSummary, JiraIssue, SearchPage};
use super::JiraError;
use crate::http::{api_base, build_client, check_status};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Jira client using basic authentication.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    base_url: Url,
    account: String,
    password: String,
}

impl JiraClient {
    /// Creates a client for the instance at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::Http`] if the HTTP client cannot be built.
    pub fn new(
        url: &Url,
        account: impl Into<String>,
        password: impl Into<String>,
        verify_ssl: bool,
    ) -> Result<Self, JiraError> {
        Ok(Self {
            http: build_client(verify_ssl)?,
            base_url: api_base(url),
            account: account.into(),
            password: password.into(),
        })
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.http
            .get(url)
            .basic_auth(&self.account, Some(&self.password))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, JiraError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Runs a JQL search and returns every matching issue.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if any page request fails.
    pub async fn search(&self, jql: &str, page_size: u32) -> Result<Vec<JiraIssue>, JiraError> {
        let url = self.base_url.join("rest/api/2/search")?;
        let mut issues = Vec::new();

        loop {
            let start_at = issues.len();
            let request = self.get(url.clone()).query(&[
                ("jql", jql.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", page_size.to_string()),
            ]);
            let page: SearchPage = Self::send(request).await?;
            debug!(start_at, count = page.issues.len(), total = page.total, "Fetched search page");

            let fetched = page.issues.len();
            issues.extend(page.issues);
            if fetched == 0 || issues.len() >= page.total {
                break;
            }
        }

        Ok(issues)
    }

    /// Fetches the attachments and comments of an issue.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the request fails.
    pub async fn issue_details(&self, issue_id: &str) -> Result<IssueDetails, JiraError> {
        let url = self.base_url.join(&format!("rest/api/2/issue/{issue_id}"))?;
        Self::send(self.get(url).query(&[("fields", "attachment,comment")])).await
    }

    /// Fetches the summary (title) of an issue.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the request fails.
    pub async fn issue_summary(&self, key: &str) -> Result<String, JiraError> {
        let url = self.base_url.join(&format!("rest/api/2/issue/{key}"))?;
        let summary: IssueSummary = Self::send(self.get(url).query(&[("fields", "summary")])).await?;
        Ok(summary.fields.summary)
    }

    /// Downloads attachment content.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the URL is invalid or the download fails.
    pub async fn download(&self, content_url: &str) -> Result<Vec<u8>, JiraError> {
        let url = Url::parse(content_url)?;
        let response = check_status(self.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
