//! Top-level settings deserialization.

use super::{AhaSettings, JiraSettings};
use crate::progress::TrackingGranularity;
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

/// Parsed contents of the settings file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MigrationSettings {
    /// Progress tracking options.
    #[serde(default)]
    pub tracking: TrackingSettings,

    /// Target GitLab instance.
    pub gitlab: GitLabSettings,

    /// Jira issue migration (optional, required by the `jira` command).
    pub jira: Option<JiraSettings>,

    /// Aha! roadmap migration (optional, required by the `aha` command).
    pub aha: Option<AhaSettings>,

    /// Handlebars formats for generated text.
    #[serde(default)]
    pub templates: TemplateSettings,
}

/// Progress tracking options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackingSettings {
    /// Whether migrated records are persisted between runs.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Tracking file path.
    #[serde(default = "default_tracking_file")]
    pub file: PathBuf,

    /// When entries are committed.
    #[serde(default)]
    pub granularity: TrackingGranularity,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_tracking_file(),
            granularity: TrackingGranularity::default(),
        }
    }
}

/// Target GitLab instance settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitLabSettings {
    /// Instance URL, e.g. `https://gitlab.com/`.
    pub url: Url,

    /// Username used when a source identity cannot be matched.
    pub fallback_account: String,

    /// Group whose members form the user roster.
    pub users_group: u64,

    /// Act as the original author via the `Sudo` header (self-managed
    /// instances with an admin token only).
    #[serde(default)]
    pub impersonate: bool,

    /// Verify TLS certificates of every API.
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

/// Handlebars formats for the text the migration generates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateSettings {
    /// Footer linking back to the source issue. Variables: `key`, `url`.
    #[serde(default = "default_source_link_format")]
    pub source_link: String,

    /// Note naming the source sprint. Variables: `sprint`.
    #[serde(default = "default_sprint_note_format")]
    pub sprint_note: String,

    /// Header prepended to replayed comments when not impersonating.
    /// Variables: `author`.
    #[serde(default = "default_comment_header_format")]
    pub comment_header: String,

    /// Reference appended to roadmap epic descriptions. Variables:
    /// `resource`, `name`.
    #[serde(default = "default_roadmap_reference_format")]
    pub roadmap_reference: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            source_link: default_source_link_format(),
            sprint_note: default_sprint_note_format(),
            comment_header: default_comment_header_format(),
            roadmap_reference: default_roadmap_reference_format(),
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_tracking_file() -> PathBuf {
    PathBuf::from("migrated_issues.txt")
}

/// Default format for the source link footer.
pub fn default_source_link_format() -> String {
    "Imported from Jira issue [{{key}}]({{url}})".to_string()
}

/// Default format for the sprint note.
pub fn default_sprint_note_format() -> String {
    "Original Jira sprint name {{sprint}}".to_string()
}

/// Default format for the comment attribution header.
pub fn default_comment_header_format() -> String {
    "Original comment by {{author}}".to_string()
}

/// Default format for the roadmap reference.
pub fn default_roadmap_reference_format() -> String {
    "{{resource}}".to_string()
}
