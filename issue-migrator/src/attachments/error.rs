//! Attachment relocation error types.

use crate::gitlab::GitLabError;
use crate::jira::JiraError;
use thiserror::Error;

/// Errors that can occur while moving attachments.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// The attachment could not be downloaded from Jira.
    #[error("Failed to download attachment '{filename}': {source}")]
    Download {
        /// Attachment file name.
        filename: String,
        /// Underlying error.
        #[source]
        source: JiraError,
    },

    /// The attachment could not be uploaded to GitLab.
    #[error("Failed to upload attachment '{filename}' to project {project_id}: {source}")]
    Upload {
        /// Attachment file name.
        filename: String,
        /// Target project.
        project_id: u64,
        /// Underlying error.
        #[source]
        source: GitLabError,
    },

    /// The embed pattern for a file name could not be compiled.
    #[error("Invalid embed pattern for '{filename}': {source}")]
    Pattern {
        /// Attachment file name.
        filename: String,
        /// Underlying error.
        #[source]
        source: regex::Error,
    },
}
