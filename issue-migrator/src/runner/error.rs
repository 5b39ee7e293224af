//! Runner error types.

use crate::aha::AhaError;
use crate::attachments::AttachmentError;
use crate::config::ConfigError;
use crate::gitlab::GitLabError;
use crate::issues::IssueError;
use crate::jira::JiraError;
use crate::progress::ProgressError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Settings loading errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A secret required by the selected source was not provided.
    #[error("Missing credential: set {name}")]
    MissingCredential {
        /// Environment variable that supplies it.
        name: &'static str,
    },

    /// A configured template does not compile.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The markup pipeline could not be compiled.
    #[error("Failed to build markup translator: {0}")]
    Markup(#[from] regex::Error),

    /// GitLab setup requests (client, roster) failed.
    #[error(transparent)]
    GitLab(#[from] GitLabError),

    /// Jira setup requests (client, search) failed.
    #[error(transparent)]
    Jira(#[from] JiraError),

    /// Aha! setup requests (client, release listing) failed.
    #[error(transparent)]
    Aha(#[from] AhaError),

    /// The progress store could not be opened.
    #[error(transparent)]
    Progress(#[from] ProgressError),

    /// A record failed; the batch was halted.
    #[error("Migration of {key} failed: {source}")]
    Record {
        /// Source record key.
        key: String,
        /// Underlying error.
        #[source]
        source: MigrationError,
    },
}

/// Errors that fail a single record.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The story point value has no weight mapping.
    #[error("Story points {estimate} have no entry in jira.story-points")]
    UnmappedEstimate {
        /// Source estimate.
        estimate: f64,
    },

    /// A Jira request failed.
    #[error(transparent)]
    Jira(#[from] JiraError),

    /// An Aha! request failed.
    #[error(transparent)]
    Aha(#[from] AhaError),

    /// A GitLab request failed.
    #[error(transparent)]
    GitLab(#[from] GitLabError),

    /// Attachment relocation failed.
    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    /// Issue publishing failed.
    #[error(transparent)]
    Issue(#[from] IssueError),

    /// A template failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The tracking entry could not be written.
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
