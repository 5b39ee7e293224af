//! Issue publishing error types.

use crate::gitlab::GitLabError;
use thiserror::Error;

/// Errors that can occur while publishing an issue.
#[derive(Debug, Error)]
pub enum IssueError {
    /// The issue could not be created.
    #[error("Failed to create issue in project {project_id}: {source}")]
    Create {
        /// Target project.
        project_id: u64,
        /// Underlying error.
        #[source]
        source: GitLabError,
    },

    /// A comment could not be replayed as a note.
    #[error("Failed to add note to issue #{iid} in project {project_id}: {source}")]
    Note {
        /// Target project.
        project_id: u64,
        /// Issue id within the project.
        iid: u64,
        /// Underlying error.
        #[source]
        source: GitLabError,
    },

    /// The issue could not be added to its epic.
    #[error("Failed to link issue #{iid} to epic &{epic_iid}: {source}")]
    Link {
        /// Issue id within the project.
        iid: u64,
        /// Epic id within the group.
        epic_iid: u64,
        /// Underlying error.
        #[source]
        source: GitLabError,
    },

    /// The issue could not be closed.
    #[error("Failed to close issue #{iid} in project {project_id}: {source}")]
    Close {
        /// Target project.
        project_id: u64,
        /// Issue id within the project.
        iid: u64,
        /// Underlying error.
        #[source]
        source: GitLabError,
    },
}
