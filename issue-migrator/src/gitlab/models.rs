//! GitLab API v4 request and response models.

use serde::{Deserialize, Serialize};

/// A group member, as returned by `GET /groups/:id/members`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitLabUser {
    /// User id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Display name.
    pub name: String,
}

/// A project, as returned by `GET /projects/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    /// Project id.
    pub id: u64,
    /// Namespace the project lives in.
    pub namespace: GitLabNamespace,
}

impl GitLabProject {
    /// Returns the group that owns epics for this project: the namespace's
    /// parent group, or the namespace itself at the top level.
    #[must_use]
    pub fn epic_group_id(&self) -> u64 {
        self.namespace.parent_id.unwrap_or(self.namespace.id)
    }
}

/// A project namespace.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabNamespace {
    /// Namespace id.
    pub id: u64,
    /// Parent group id, if the namespace is a subgroup.
    #[serde(default)]
    pub parent_id: Option<u64>,
}

/// A group epic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GitLabEpic {
    /// Global id.
    pub id: u64,
    /// Id within the group.
    pub iid: u64,
    /// Owning group.
    pub group_id: u64,
    /// Title, unique within the group by convention.
    pub title: String,
    /// Applied labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Parent epic id.
    #[serde(default)]
    pub parent_id: Option<u64>,
}

/// Request body for `POST /groups/:id/epics`.
#[derive(Debug, Clone, Serialize)]
pub struct NewEpic {
    /// Epic title.
    pub title: String,
    /// Epic description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma separated label names.
    pub labels: String,
    /// Parent epic id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

/// A project issue.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabIssue {
    /// Global id, used when linking to epics.
    pub id: u64,
    /// Id within the project, used in issue URLs.
    pub iid: u64,
    /// Owning project.
    pub project_id: u64,
    /// Browser URL.
    #[serde(default)]
    pub web_url: String,
    /// `opened` or `closed`.
    #[serde(default)]
    pub state: String,
}

/// Request body for `POST /projects/:id/issues`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewIssue {
    /// Issue title.
    pub title: String,
    /// Markdown description.
    pub description: String,
    /// Comma separated label names.
    pub labels: String,
    /// Assignees.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignee_ids: Vec<u64>,
    /// Milestone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,
    /// Issue weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Creation timestamp (RFC 3339). Honoured for admins and owners only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A note on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabNote {
    /// Note id.
    pub id: u64,
}

/// Response of `POST /projects/:id/uploads`.
///
/// Every field is optional; an upload without `url` is unusable and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitLabUpload {
    /// Project-relative URL of the stored file.
    #[serde(default)]
    pub url: Option<String>,
    /// Ready-made markdown link.
    #[serde(default)]
    pub markdown: Option<String>,
}

/// A project milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabMilestone {
    /// Global id, used when assigning issues.
    pub id: u64,
    /// Milestone title.
    pub title: String,
}

/// Joins label names the way the API expects them.
#[must_use]
pub fn join_labels(labels: &[String]) -> String {
    labels.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_issue_omits_unset_fields() {
        let issue = NewIssue {
            title: "Crash".to_string(),
            description: "body".to_string(),
            labels: join_labels(&["bug".to_string(), "Frontend".to_string()]),
            ..Default::default()
        };

        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["labels"], "bug,Frontend");
        assert!(json.get("weight").is_none());
        assert!(json.get("assignee_ids").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn project_epic_group_prefers_parent() {
        let project: GitLabProject =
            serde_json::from_value(serde_json::json!({"id": 1, "namespace": {"id": 5, "parent_id": 2}}))
                .unwrap();
        assert_eq!(project.epic_group_id(), 2);

        let project: GitLabProject =
            serde_json::from_value(serde_json::json!({"id": 1, "namespace": {"id": 5}})).unwrap();
        assert_eq!(project.epic_group_id(), 5);
    }
}
