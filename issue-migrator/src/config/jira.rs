//! Jira issue migration settings.

use super::settings::default_true;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

/// Settings for migrating Jira issues into GitLab projects.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JiraSettings {
    /// Instance URL, e.g. `https://company.atlassian.net/`.
    pub url: Url,

    /// Account name used for basic authentication.
    pub account: String,

    /// Short project key, used to autolink references like `PRO-12`.
    pub project: String,

    /// Search query selecting the issues to migrate.
    pub jql: String,

    /// Issues requested per search page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Custom field holding the epic link.
    pub epic_field: Option<String>,

    /// Custom field holding the sprints.
    pub sprint_field: Option<String>,

    /// Custom field holding the story points.
    pub story_points_field: Option<String>,

    /// Append a link back to the Jira issue to each description.
    #[serde(default = "default_true")]
    pub add_source_link: bool,

    /// Append the last sprint name to each description.
    #[serde(default = "default_true")]
    pub add_sprint_note: bool,

    /// Use the last sprint as the GitLab milestone, creating it if needed.
    #[serde(default)]
    pub sprint_as_milestone: bool,

    /// Labels added to every created issue and epic.
    #[serde(default)]
    pub default_labels: Vec<String>,

    /// Jira display name to GitLab username overrides.
    #[serde(default)]
    pub user_names: BTreeMap<String, String>,

    /// Jira issue type to GitLab label. Unlisted types are not migrated.
    pub issue_types: BTreeMap<String, String>,

    /// Jira component to grouping name. Unlisted components are ignored.
    pub components: BTreeMap<String, String>,

    /// Grouping name to GitLab project id.
    pub projects: BTreeMap<String, u64>,

    /// Grouping name to the label applied to its issues and epics.
    #[serde(default)]
    pub project_labels: BTreeMap<String, String>,

    /// Story points to GitLab weight.
    #[serde(default)]
    pub story_points: StoryPointTable,
}

impl JiraSettings {
    /// Returns the prefix used for issue browse links, with a trailing slash.
    #[must_use]
    pub fn browse_base(&self) -> String {
        let base = self.url.as_str();
        if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        }
    }

    /// Returns the browse URL of an issue.
    #[must_use]
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}browse/{key}", self.browse_base())
    }
}

fn default_page_size() -> u32 {
    100
}

/// Fixed mapping from story points to issue weight.
///
/// Keys are matched exactly; there is no rounding to the nearest entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>")]
pub struct StoryPointTable {
    entries: Vec<(f64, u32)>,
}

impl StoryPointTable {
    /// Returns the weight for `points`, if the table has an entry.
    #[must_use]
    pub fn weight_for(&self, points: f64) -> Option<u32> {
        self.entries
            .iter()
            .find(|(key, _)| *key == points)
            .map(|(_, weight)| *weight)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StoryPointTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (1.0, 1),
                (2.0, 2),
                (3.0, 3),
                (5.0, 5),
                (8.0, 8),
                (13.0, 13),
                (20.0, 21),
                (21.0, 21),
                (34.0, 34),
                (40.0, 34),
            ],
        }
    }
}

impl TryFrom<BTreeMap<String, u32>> for StoryPointTable {
    type Error = String;

    fn try_from(map: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        let mut entries = map
            .into_iter()
            .map(|(key, weight)| {
                key.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|points| points.is_finite())
                    .map(|points| (points, weight))
                    .ok_or_else(|| format!("story point key '{key}' is not a number"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { entries })
    }
}
