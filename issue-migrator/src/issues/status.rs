//! Issue status types.

use serde::Serialize;

/// Outcome of publishing one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IssueStatus {
    /// Issue created and left open.
    Created {
        /// Issue id within the project.
        iid: u64,
        /// Browser URL.
        url: String,
    },

    /// Issue created and closed to mirror a finished source issue.
    Closed {
        /// Issue id within the project.
        iid: u64,
        /// Browser URL.
        url: String,
    },

    /// Dry run; nothing was written.
    Previewed,
}

impl IssueStatus {
    /// Returns true if the issue exists in GitLab.
    #[must_use]
    pub fn is_written(&self) -> bool {
        !matches!(self, Self::Previewed)
    }
}
