//! Planned issues.

use super::IssueStatus;
use crate::gitlab::{join_labels, NewIssue};

/// Everything needed to create one issue in one project.
#[derive(Debug, Clone, Default)]
pub struct IssueDraft {
    /// Target project.
    pub project_id: u64,
    /// Title.
    pub title: String,
    /// Translated markdown description.
    pub description: String,
    /// Labels, in order.
    pub labels: Vec<String>,
    /// Assignee.
    pub assignee_id: Option<u64>,
    /// Weight.
    pub weight: Option<u32>,
    /// Milestone.
    pub milestone_id: Option<u64>,
    /// RFC 3339 creation timestamp.
    pub created_at: Option<String>,
    /// User to create the issue as.
    pub author: Option<String>,
    /// Comments to replay, in order.
    pub notes: Vec<NoteDraft>,
    /// Close the issue after creation.
    pub close: bool,
}

/// A comment to replay as an issue note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    /// Markdown body, including any attribution header.
    pub body: String,
    /// User to post the note as.
    pub author: Option<String>,
}

impl IssueDraft {
    pub(crate) fn to_request(&self) -> NewIssue {
        NewIssue {
            title: self.title.clone(),
            description: self.description.clone(),
            labels: join_labels(&self.labels),
            assignee_ids: self.assignee_id.into_iter().collect(),
            milestone_id: self.milestone_id,
            weight: self.weight,
            created_at: self.created_at.clone(),
        }
    }
}

/// An issue produced by the migration.
#[derive(Debug, Clone)]
pub struct MigratedIssue {
    /// Source record key.
    pub source_key: String,
    /// Target project.
    pub project_id: u64,
    /// Title.
    pub title: String,
    /// Number of notes replayed.
    pub notes: usize,
    /// Number of attachments relocated.
    pub attachments: usize,
    /// Whether the issue was added to an epic.
    pub linked_epic: bool,
    /// Outcome.
    pub status: IssueStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_joins_labels_and_omits_missing_assignee() {
        let draft = IssueDraft {
            project_id: 3,
            title: "Crash".to_string(),
            labels: vec!["bug".to_string(), "Doing".to_string()],
            weight: Some(5),
            ..IssueDraft::default()
        };

        let request = draft.to_request();

        assert_eq!(request.labels, "bug,Doing");
        assert!(request.assignee_ids.is_empty());
        assert_eq!(request.weight, Some(5));

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("assignee_ids").is_none());
        assert!(json.get("milestone_id").is_none());
    }
}
