//! Jira REST API v2 response models.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of `GET /rest/api/2/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

/// An issue returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssue {
    /// Numeric id, as a string.
    pub id: String,
    /// Human key such as `PRO-12`.
    pub key: String,
    /// Issue fields.
    pub fields: IssueFields,
}

/// Standard and custom issue fields.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    /// Title.
    pub summary: String,
    /// Wiki markup body.
    #[serde(default)]
    pub description: Option<String>,
    /// Issue type.
    #[serde(rename = "issuetype")]
    pub issue_type: NamedValue,
    /// Workflow status.
    pub status: Status,
    /// Assignee.
    #[serde(default)]
    pub assignee: Option<JiraUser>,
    /// Reporter.
    #[serde(default)]
    pub reporter: Option<JiraUser>,
    /// Components.
    #[serde(default)]
    pub components: Vec<NamedValue>,
    /// Creation timestamp, e.g. `2021-03-04T10:11:12.000+0000`.
    #[serde(default)]
    pub created: Option<String>,
    /// Every other field, including custom fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Any `{ "name": ... }` object.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedValue {
    /// Name.
    pub name: String,
}

/// Workflow status with its category.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    /// Status name, e.g. `In Review`.
    pub name: String,
    /// Status category.
    #[serde(rename = "statusCategory")]
    pub category: StatusCategory,
}

/// Status category (`new`, `indeterminate`, `done`).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCategory {
    /// Stable key.
    pub key: String,
    /// Display name, e.g. `In Progress`.
    pub name: String,
}

/// A Jira user reference.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraUser {
    /// Display name.
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    /// Login name (server instances only).
    #[serde(default)]
    pub name: Option<String>,
}

impl JiraUser {
    /// Returns the login name, or the display name where logins are hidden.
    #[must_use]
    pub fn login(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.display_name)
    }
}

impl JiraIssue {
    /// Returns a custom field as a string.
    #[must_use]
    pub fn custom_str(&self, field: &str) -> Option<&str> {
        self.fields
            .extra
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns a custom field as a number.
    #[must_use]
    pub fn custom_number(&self, field: &str) -> Option<f64> {
        self.fields.extra.get(field).and_then(Value::as_f64)
    }

    /// Returns the name of the last named sprint in a sprint field.
    ///
    /// Handles both sprint objects and the legacy serialized
    /// `...,name=Sprint 4,...` strings.
    #[must_use]
    pub fn last_sprint(&self, field: &str) -> Option<String> {
        self.fields
            .extra
            .get(field)
            .and_then(Value::as_array)?
            .iter()
            .filter_map(sprint_name)
            .last()
    }

    /// Returns true if the status category is `done`.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.fields.status.category.key == "done"
    }

    /// Returns true if the status category is `In Progress`.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.fields.status.category.name == "In Progress"
    }
}

fn sprint_name(sprint: &Value) -> Option<String> {
    let name = match sprint {
        Value::Object(object) => object.get("name").and_then(Value::as_str)?.to_string(),
        Value::String(legacy) => legacy
            .split(',')
            .find_map(|part| part.strip_prefix("name="))?
            .to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}

/// Response of `GET /rest/api/2/issue/:id?fields=attachment,comment`.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueDetails {
    fields: DetailFields,
}

impl IssueDetails {
    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[JiraAttachment] {
        &self.fields.attachment
    }

    /// Returns the comments in creation order.
    #[must_use]
    pub fn comments(&self) -> &[JiraComment] {
        &self.fields.comment.comments
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DetailFields {
    #[serde(default)]
    attachment: Vec<JiraAttachment>,
    #[serde(default)]
    comment: CommentPage,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CommentPage {
    #[serde(default)]
    comments: Vec<JiraComment>,
}

/// A file attached to an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraAttachment {
    /// Original file name.
    pub filename: String,
    /// Download URL.
    pub content: String,
    /// Uploader.
    pub author: JiraUser,
}

/// An issue comment.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraComment {
    /// Author.
    pub author: JiraUser,
    /// Wiki markup body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Response of `GET /rest/api/2/issue/:key?fields=summary`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IssueSummary {
    pub fields: SummaryFields,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SummaryFields {
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(extra: Value) -> JiraIssue {
        let mut fields = json!({
            "summary": "Crash on save",
            "issuetype": {"name": "Bug"},
            "status": {"name": "In Review", "statusCategory": {"key": "indeterminate", "name": "In Progress"}},
            "components": [{"name": "UI"}],
        });
        if let (Some(target), Value::Object(extra)) = (fields.as_object_mut(), extra) {
            target.extend(extra);
        }
        serde_json::from_value(json!({"id": "10001", "key": "PRO-1", "fields": fields})).unwrap()
    }

    #[test]
    fn reads_custom_fields() {
        let issue = issue(json!({
            "customfield_10006": "PRO-100",
            "customfield_10002": 5.0,
        }));

        assert_eq!(issue.custom_str("customfield_10006"), Some("PRO-100"));
        assert_eq!(issue.custom_number("customfield_10002"), Some(5.0));
        assert_eq!(issue.custom_str("customfield_missing"), None);
        assert!(issue.is_in_progress());
        assert!(!issue.is_done());
    }

    #[test]
    fn last_sprint_reads_objects_and_legacy_strings() {
        let issue = issue(json!({
            "sprints": [{"name": "Sprint 1"}, {"name": "Sprint 2"}, {"name": ""}],
            "legacy": ["com.atlassian.greenhopper.service.sprint.Sprint@1[id=3,name=Sprint 9,state=CLOSED]"],
        }));

        assert_eq!(issue.last_sprint("sprints").as_deref(), Some("Sprint 2"));
        assert_eq!(issue.last_sprint("legacy").as_deref(), Some("Sprint 9"));
        assert_eq!(issue.last_sprint("none"), None);
    }

    #[test]
    fn user_login_falls_back_to_display_name() {
        let user: JiraUser = serde_json::from_value(json!({"displayName": "Alice"})).unwrap();
        assert_eq!(user.login(), "Alice");

        let user: JiraUser =
            serde_json::from_value(json!({"displayName": "Alice", "name": "alice"})).unwrap();
        assert_eq!(user.login(), "alice");
    }
}
