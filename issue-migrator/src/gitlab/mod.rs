//! Target system: GitLab.

mod client;
mod error;
mod models;

pub use client::GitLabClient;
pub use error::GitLabError;
pub use models::{
    join_labels, GitLabEpic, GitLabIssue, GitLabMilestone, GitLabNamespace, GitLabNote,
    GitLabProject, GitLabUpload, GitLabUser, NewEpic, NewIssue,
};
