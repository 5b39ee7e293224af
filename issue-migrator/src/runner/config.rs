//! Runner configuration.

use std::path::{Path, PathBuf};

/// API secrets, kept out of the settings file.
#[derive(Clone, Default)]
pub struct Credentials {
    gitlab_token: String,
    jira_password: Option<String>,
    aha_token: Option<String>,
}

impl Credentials {
    /// Creates credentials with the GitLab token only.
    pub fn new(gitlab_token: impl Into<String>) -> Self {
        Self {
            gitlab_token: gitlab_token.into(),
            ..Self::default()
        }
    }

    /// Sets the Jira password or API token.
    #[must_use]
    pub fn with_jira_password(mut self, password: Option<String>) -> Self {
        self.jira_password = password;
        self
    }

    /// Sets the Aha! API token.
    #[must_use]
    pub fn with_aha_token(mut self, token: Option<String>) -> Self {
        self.aha_token = token;
        self
    }

    /// Returns the GitLab token.
    pub fn gitlab_token(&self) -> &str {
        &self.gitlab_token
    }

    /// Returns the Jira password, if set.
    pub fn jira_password(&self) -> Option<&str> {
        self.jira_password.as_deref()
    }

    /// Returns the Aha! token, if set.
    pub fn aha_token(&self) -> Option<&str> {
        self.aha_token.as_deref()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gitlab_token", &"<redacted>")
            .field("jira_password", &self.jira_password.as_ref().map(|_| "<redacted>"))
            .field("aha_token", &self.aha_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the settings file.
    settings_path: PathBuf,
    /// API secrets.
    credentials: Credentials,
    /// Whether to preview without writing anything.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(settings_path: PathBuf, credentials: Credentials, dry_run: bool) -> Self {
        Self {
            settings_path,
            credentials,
            dry_run,
        }
    }

    /// Returns the settings file path.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Returns the API secrets.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
