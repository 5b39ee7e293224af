//! Jira source: issue search, details and attachment downloads.

mod client;
mod error;
mod models;

pub use client::JiraClient;
pub use error::JiraError;
pub use models::{
    IssueDetails, IssueFields, JiraAttachment, JiraComment, JiraIssue, JiraUser, NamedValue,
    Status, StatusCategory,
};
