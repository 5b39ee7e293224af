//! Orchestrates migration runs.
//!
//! Records are processed strictly one after another. A record either ends
//! skipped or migrated; any error halts the batch, leaving earlier records
//! tracked so a re-run resumes after them.

mod aha;
mod config;
mod error;
mod jira;
mod plan;

pub use config::{Credentials, RunnerConfig};
pub use error::{MigrationError, RunnerError};

use crate::aha::AhaClient;
use crate::config::{load_settings, MigrationSettings};
use crate::gitlab::GitLabClient;
use crate::identity::IdentityResolver;
use crate::jira::JiraClient;
use crate::markup::{HtmlConverter, Translator};
use crate::progress::{FileProgressStore, MemoryProgressStore, ProgressStore};
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::TemplateRenderer;
use aha::RoadmapMigration;
use jira::JiraMigration;
use std::collections::HashMap;
use tracing::{error, info, warn};

/// Runs migrations described by one settings file.
pub struct Runner {
    config: RunnerConfig,
    settings: MigrationSettings,
    gitlab: GitLabClient,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Loads the settings and builds the GitLab client.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the settings are invalid, a template does
    /// not compile, or the client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let settings = load_settings(config.settings_path())?;
        let gitlab = GitLabClient::new(
            &settings.gitlab.url,
            config.credentials().gitlab_token(),
            settings.gitlab.verify_ssl,
        )?;
        let renderer = TemplateRenderer::new(&settings.templates)?;

        Ok(Self {
            config,
            settings,
            gitlab,
            renderer,
        })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &MigrationSettings {
        &self.settings
    }

    /// Migrates Jira issues, tracking progress as configured in `[tracking]`.
    ///
    /// # Errors
    ///
    /// See [`migrate_jira_with`](Self::migrate_jira_with).
    pub async fn migrate_jira(&self) -> Result<RunSummary, RunnerError> {
        let tracking = &self.settings.tracking;
        if tracking.enabled {
            let mut store = FileProgressStore::open(&tracking.file)?;
            info!(
                path = %store.path().display(),
                entries = store.len(),
                "Loaded progress"
            );
            self.migrate_jira_with(&mut store).await
        } else {
            warn!("Tracking is disabled, re-runs will duplicate issues");
            self.migrate_jira_with(&mut MemoryProgressStore::new()).await
        }
    }

    /// Migrates Jira issues using `store` for resume tracking.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Record`] for the first record that fails, or
    /// another [`RunnerError`] if setup fails.
    pub async fn migrate_jira_with<S: ProgressStore>(
        &self,
        store: &mut S,
    ) -> Result<RunSummary, RunnerError> {
        let settings = self.settings.jira()?;
        let password = self
            .config
            .credentials()
            .jira_password()
            .ok_or(RunnerError::MissingCredential { name: "JIRA_TOKEN" })?;
        let jira = JiraClient::new(
            &settings.url,
            settings.account.as_str(),
            password,
            self.settings.gitlab.verify_ssl,
        )?;

        let roster = self
            .gitlab
            .list_group_members(self.settings.gitlab.users_group)
            .await?;
        info!(users = roster.len(), "Loaded GitLab roster");

        let mut migration = JiraMigration {
            settings,
            templates: &self.renderer,
            gitlab: &self.gitlab,
            identities: IdentityResolver::new(
                settings.user_names.clone(),
                roster,
                self.settings.gitlab.fallback_account.as_str(),
            ),
            translator: Translator::new(&settings.project, &settings.browse_base())?,
            jira,
            impersonate: self.settings.gitlab.impersonate,
            granularity: self.settings.tracking.granularity,
            dry_run: self.config.dry_run(),
            epic_groups: HashMap::new(),
        };

        let issues = migration.jira.search(&settings.jql, settings.page_size).await?;
        info!(count = issues.len(), "Fetched Jira issues");

        let mut summary = RunSummary::new(self.config.dry_run());
        summary.records_fetched = issues.len();

        for issue in &issues {
            let result = migration
                .process_record(issue, store, &mut summary)
                .await
                .map_err(|source| record_failed(&issue.key, source))?;
            summary.record_result(&result);
        }

        Ok(summary)
    }

    /// Migrates the configured Aha! release into nested GitLab epics.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Record`] for the first epic that fails, or
    /// another [`RunnerError`] if setup fails.
    pub async fn migrate_aha(&self) -> Result<RunSummary, RunnerError> {
        let settings = self.settings.aha()?;
        let token = self
            .config
            .credentials()
            .aha_token()
            .ok_or(RunnerError::MissingCredential { name: "AHA_TOKEN" })?;

        let migration = RoadmapMigration {
            settings,
            templates: &self.renderer,
            gitlab: &self.gitlab,
            aha: AhaClient::new(&settings.url, token, self.settings.gitlab.verify_ssl)?,
            html: HtmlConverter::new()?,
            dry_run: self.config.dry_run(),
        };

        let release = settings.release_reference();
        let epics = migration.aha.release_epics(&release).await?;
        info!(release = %release, count = epics.len(), "Fetched release epics");

        let mut summary = RunSummary::new(self.config.dry_run());
        summary.records_fetched = epics.len();

        for reference in &epics {
            let result: ProcessingResult = migration
                .process_epic(reference, &mut summary)
                .await
                .map_err(|source| record_failed(&reference.reference_num, source))?;
            summary.record_result(&result);
        }

        Ok(summary)
    }
}

fn record_failed(key: &str, source: MigrationError) -> RunnerError {
    error!(key, error = %source, "Record failed, halting the batch");
    RunnerError::Record {
        key: key.to_string(),
        source,
    }
}
