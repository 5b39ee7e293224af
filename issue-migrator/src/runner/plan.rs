//! Pure decisions about where and how a Jira issue lands in GitLab.

use super::MigrationError;
use crate::config::JiraSettings;
use crate::jira::{JiraIssue, NamedValue};
use chrono::{DateTime, SecondsFormat};
use tracing::warn;

/// A target project chosen by component routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Route<'s> {
    /// Grouping the component mapped to.
    pub grouping: &'s str,
    /// GitLab project id.
    pub project_id: u64,
    /// Label added to issues in this project.
    pub label: Option<&'s str>,
}

/// Maps components to target projects, de-duplicated in first-seen order.
/// Unknown components are logged and ignored.
pub(crate) fn route_components<'s>(
    settings: &'s JiraSettings,
    components: &[NamedValue],
) -> Vec<Route<'s>> {
    let mut routes: Vec<Route<'s>> = Vec::new();

    for component in components {
        let Some((grouping, project_id)) = settings
            .components
            .get(&component.name)
            .and_then(|grouping| {
                let project_id = settings.projects.get(grouping)?;
                Some((grouping.as_str(), *project_id))
            })
        else {
            warn!(component = %component.name, "Unknown component, ignoring");
            continue;
        };

        if routes.iter().any(|route| route.project_id == project_id) {
            continue;
        }
        routes.push(Route {
            grouping,
            project_id,
            label: settings.project_labels.get(grouping).map(String::as_str),
        });
    }

    routes
}

/// Labels shared by every copy of an issue: type label, in-progress status
/// name, epic title, then the default labels.
pub(crate) fn base_labels(
    settings: &JiraSettings,
    issue: &JiraIssue,
    type_label: &str,
    epic_title: Option<&str>,
) -> Vec<String> {
    let mut labels = vec![type_label.to_string()];
    if issue.is_in_progress() {
        labels.push(issue.fields.status.name.clone());
    }
    labels.extend(epic_title.map(str::to_string));
    labels.extend(settings.default_labels.iter().cloned());
    labels
}

/// Returns `base` plus the project label of `route`.
pub(crate) fn project_labels(base: &[String], route: &Route<'_>) -> Vec<String> {
    let mut labels = base.to_vec();
    labels.extend(route.label.map(str::to_string));
    labels
}

/// Maps the story point field to a weight. Zero points count as no estimate.
///
/// # Errors
///
/// Returns [`MigrationError::UnmappedEstimate`] for a value missing from the
/// table.
pub(crate) fn weight(settings: &JiraSettings, issue: &JiraIssue) -> Result<Option<u32>, MigrationError> {
    let Some(estimate) = settings
        .story_points_field
        .as_deref()
        .and_then(|field| issue.custom_number(field))
        .filter(|points| *points != 0.0)
    else {
        return Ok(None);
    };

    settings
        .story_points
        .weight_for(estimate)
        .map(Some)
        .ok_or(MigrationError::UnmappedEstimate { estimate })
}

/// Converts Jira's `2021-03-04T10:11:12.000+0000` into RFC 3339 with whole
/// seconds. Unparsable values are dropped so GitLab uses the current time.
pub(crate) fn created_at(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    match DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        Ok(timestamp) => Some(timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)),
        Err(error) => {
            warn!(created = raw, %error, "Unparsable created timestamp, leaving it unset");
            None
        }
    }
}
