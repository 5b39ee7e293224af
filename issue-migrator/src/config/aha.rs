//! Aha! roadmap migration settings.

use serde::Deserialize;
use url::Url;

/// Settings for migrating one Aha! release into GitLab epics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AhaSettings {
    /// Account URL, e.g. `https://company.aha.io/`.
    pub url: Url,

    /// Product prefix used in release references.
    pub project: String,

    /// Internal release number (not the release name).
    pub release: String,

    /// GitLab group that receives the epics.
    pub group: u64,

    /// Labels applied to every created epic.
    #[serde(default = "default_roadmap_labels")]
    pub default_labels: Vec<String>,

    /// Label marking epics that came from Aha! epics.
    #[serde(default = "default_epic_label")]
    pub epic_label: String,

    /// Label marking epics that came from Aha! features.
    #[serde(default = "default_feature_label")]
    pub feature_label: String,
}

impl AhaSettings {
    /// Returns the release reference, e.g. `PROJECT-R-1`.
    #[must_use]
    pub fn release_reference(&self) -> String {
        format!("{}-R-{}", self.project, self.release)
    }
}

fn default_roadmap_labels() -> Vec<String> {
    vec!["PM".to_string(), "release".to_string()]
}

fn default_epic_label() -> String {
    "Aha::Epic".to_string()
}

fn default_feature_label() -> String {
    "Aha::Feature".to_string()
}
