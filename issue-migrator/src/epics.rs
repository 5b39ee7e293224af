//! Find-or-create of GitLab epics by title.

use crate::gitlab::{join_labels, GitLabClient, GitLabEpic, GitLabError, NewEpic};
use tracing::{debug, info};

/// Outcome of [`EpicResolver::get_or_create`].
#[derive(Debug, Clone, PartialEq)]
pub enum EpicOutcome {
    /// An epic with the title already existed.
    Existing(GitLabEpic),
    /// A new epic was created.
    Created(GitLabEpic),
}

impl EpicOutcome {
    /// Returns the resolved epic.
    #[must_use]
    pub fn epic(&self) -> &GitLabEpic {
        match self {
            Self::Existing(epic) | Self::Created(epic) => epic,
        }
    }

    /// Returns true if the epic was created by this call.
    #[must_use]
    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Resolves epic titles within a group, creating missing epics.
///
/// Titles are the identity of an epic, which is what makes repeated runs
/// reuse rather than duplicate them. The group is listed on every call.
#[derive(Debug, Clone)]
pub struct EpicResolver<'a> {
    gitlab: &'a GitLabClient,
    default_labels: Vec<String>,
}

impl<'a> EpicResolver<'a> {
    /// Creates a resolver that labels new epics with `default_labels`.
    pub fn new(gitlab: &'a GitLabClient, default_labels: Vec<String>) -> Self {
        Self {
            gitlab,
            default_labels,
        }
    }

    /// Returns the epic titled `title` in `group_id`, creating it if needed.
    ///
    /// New epics get the default labels plus `extra_label`, and are nested
    /// under `parent_id` when given.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError`] if listing or creating fails.
    pub async fn get_or_create(
        &self,
        group_id: u64,
        title: &str,
        description: Option<&str>,
        extra_label: Option<&str>,
        parent_id: Option<u64>,
    ) -> Result<EpicOutcome, GitLabError> {
        let epics = self.gitlab.list_group_epics(group_id).await?;
        if let Some(epic) = epics.into_iter().find(|epic| epic.title == title) {
            debug!(group_id, title, epic_id = epic.id, "Reusing existing epic");
            return Ok(EpicOutcome::Existing(epic));
        }

        let mut labels = self.default_labels.clone();
        labels.extend(extra_label.map(str::to_string));
        let request = NewEpic {
            title: title.to_string(),
            description: description.map(str::to_string),
            labels: join_labels(&labels),
            parent_id,
        };

        let epic = self.gitlab.create_epic(group_id, &request, None).await?;
        info!(group_id, title, epic_id = epic.id, "Created epic");
        Ok(EpicOutcome::Created(epic))
    }
}
