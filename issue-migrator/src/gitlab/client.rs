//! GitLab REST API v4 client.

use super::models::{
    GitLabEpic, GitLabIssue, GitLabMilestone, GitLabNote, GitLabProject, GitLabUpload,
    GitLabUser, NewEpic, NewIssue,
};
use super::GitLabError;
use crate::http::{api_base, build_client, check_status};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

/// Items requested per page on list endpoints.
const PER_PAGE: u32 = 100;

/// Authenticated GitLab API client.
///
/// Write methods take an optional `sudo` username; when set, the request is
/// performed as that user (requires an admin token).
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl GitLabClient {
    /// Creates a client for the instance at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &Url, token: impl Into<String>, verify_ssl: bool) -> Result<Self, GitLabError> {
        Ok(Self {
            http: build_client(verify_ssl)?,
            base_url: api_base(url),
            token: token.into(),
        })
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        sudo: Option<&str>,
    ) -> Result<RequestBuilder, GitLabError> {
        let url = self.base_url.join(&format!("api/v4/{path}"))?;
        let mut request = self
            .http
            .request(method, url)
            .header("PRIVATE-TOKEN", &self.token);
        if let Some(user) = sudo {
            request = request.header("Sudo", user);
        }
        Ok(request)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, GitLabError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Fetches every page of a list endpoint, following `X-Next-Page`.
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GitLabError> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self
                .request(Method::GET, path, None)?
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()
                .await?;
            let response = check_status(response).await?;
            let next_page = response
                .headers()
                .get("x-next-page")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u32>().ok());

            let batch: Vec<T> = response.json().await?;
            debug!(path, page, count = batch.len(), "Fetched page");
            items.extend(batch);

            match next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(items)
    }

    /// Lists the members of a group.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if any request fails.
    pub async fn list_group_members(&self, group_id: u64) -> Result<Vec<GitLabUser>, GitLabError> {
        self.get_all(&format!("groups/{group_id}/members")).await
    }

    /// Fetches a project.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn get_project(&self, project_id: u64) -> Result<GitLabProject, GitLabError> {
        Self::send(self.request(Method::GET, &format!("projects/{project_id}"), None)?).await
    }

    /// Lists every epic of a group.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if any request fails.
    pub async fn list_group_epics(&self, group_id: u64) -> Result<Vec<GitLabEpic>, GitLabError> {
        self.get_all(&format!("groups/{group_id}/epics")).await
    }

    /// Creates an epic in a group.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn create_epic(
        &self,
        group_id: u64,
        epic: &NewEpic,
        sudo: Option<&str>,
    ) -> Result<GitLabEpic, GitLabError> {
        let request = self
            .request(Method::POST, &format!("groups/{group_id}/epics"), sudo)?
            .json(epic);
        Self::send(request).await
    }

    /// Adds an issue to an epic.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn link_epic_issue(
        &self,
        group_id: u64,
        epic_iid: u64,
        issue_id: u64,
        sudo: Option<&str>,
    ) -> Result<(), GitLabError> {
        let request = self.request(
            Method::POST,
            &format!("groups/{group_id}/epics/{epic_iid}/issues/{issue_id}"),
            sudo,
        )?;
        Self::send::<serde_json::Value>(request).await?;
        Ok(())
    }

    /// Creates an issue in a project.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn create_issue(
        &self,
        project_id: u64,
        issue: &NewIssue,
        sudo: Option<&str>,
    ) -> Result<GitLabIssue, GitLabError> {
        let request = self
            .request(Method::POST, &format!("projects/{project_id}/issues"), sudo)?
            .json(issue);
        Self::send(request).await
    }

    /// Closes an issue.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn close_issue(
        &self,
        project_id: u64,
        issue_iid: u64,
        sudo: Option<&str>,
    ) -> Result<GitLabIssue, GitLabError> {
        let request = self
            .request(
                Method::PUT,
                &format!("projects/{project_id}/issues/{issue_iid}"),
                sudo,
            )?
            .json(&json!({ "state_event": "close" }));
        Self::send(request).await
    }

    /// Adds a note to an issue.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn create_note(
        &self,
        project_id: u64,
        issue_iid: u64,
        body: &str,
        sudo: Option<&str>,
    ) -> Result<GitLabNote, GitLabError> {
        let request = self
            .request(
                Method::POST,
                &format!("projects/{project_id}/issues/{issue_iid}/notes"),
                sudo,
            )?
            .json(&json!({ "body": body }));
        Self::send(request).await
    }

    /// Uploads a file to a project for use in markdown.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn upload_file(
        &self,
        project_id: u64,
        file_name: String,
        content: Vec<u8>,
        sudo: Option<&str>,
    ) -> Result<GitLabUpload, GitLabError> {
        let form = Form::new().part("file", Part::bytes(content).file_name(file_name));
        let request = self
            .request(Method::POST, &format!("projects/{project_id}/uploads"), sudo)?
            .multipart(form);
        Self::send(request).await
    }

    /// Finds a project milestone by exact title.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn find_milestone(
        &self,
        project_id: u64,
        title: &str,
    ) -> Result<Option<GitLabMilestone>, GitLabError> {
        let request = self
            .request(Method::GET, &format!("projects/{project_id}/milestones"), None)?
            .query(&[("title", title)]);
        let milestones: Vec<GitLabMilestone> = Self::send(request).await?;
        Ok(milestones.into_iter().find(|m| m.title == title))
    }

    /// Creates a project milestone.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if the request fails.
    pub async fn create_milestone(
        &self,
        project_id: u64,
        title: &str,
        sudo: Option<&str>,
    ) -> Result<GitLabMilestone, GitLabError> {
        let request = self
            .request(Method::POST, &format!("projects/{project_id}/milestones"), sudo)?
            .json(&json!({ "title": title }));
        Self::send(request).await
    }
}
