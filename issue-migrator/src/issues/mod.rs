//! GitLab issue publishing.
//!
//! An [`IssueDraft`] is fully prepared by the runner; publishing only performs
//! the writes, in order: create, replay notes, link to the epic, close.

mod draft;
mod error;
mod status;

pub use draft::{IssueDraft, MigratedIssue, NoteDraft};
pub use error::IssueError;
pub use status::IssueStatus;

use crate::gitlab::{GitLabClient, GitLabEpic};
use tracing::{debug, info, info_span, Instrument};

/// Publishes `draft` and returns the created issue's status.
///
/// # Errors
///
/// Returns [`IssueError`] on the first failed write. Writes already made are
/// not rolled back.
pub async fn publish_issue(
    gitlab: &GitLabClient,
    draft: &IssueDraft,
    epic: Option<&GitLabEpic>,
) -> Result<IssueStatus, IssueError> {
    let project_id = draft.project_id;
    let span = info_span!("publish_issue", project_id, title = %draft.title);

    async {
        let issue = gitlab
            .create_issue(project_id, &draft.to_request(), draft.author.as_deref())
            .await
            .map_err(|source| IssueError::Create { project_id, source })?;
        let iid = issue.iid;
        info!(iid, url = %issue.web_url, "Issue created");

        for note in &draft.notes {
            gitlab
                .create_note(project_id, iid, &note.body, note.author.as_deref())
                .await
                .map_err(|source| IssueError::Note {
                    project_id,
                    iid,
                    source,
                })?;
        }
        debug!(iid, notes = draft.notes.len(), "Notes replayed");

        if let Some(epic) = epic {
            gitlab
                .link_epic_issue(epic.group_id, epic.iid, issue.id, draft.author.as_deref())
                .await
                .map_err(|source| IssueError::Link {
                    iid,
                    epic_iid: epic.iid,
                    source,
                })?;
            debug!(iid, epic_iid = epic.iid, "Linked to epic");
        }

        if draft.close {
            gitlab
                .close_issue(project_id, iid, draft.author.as_deref())
                .await
                .map_err(|source| IssueError::Close {
                    project_id,
                    iid,
                    source,
                })?;
            info!(iid, "Issue closed");
            return Ok(IssueStatus::Closed {
                iid,
                url: issue.web_url,
            });
        }

        Ok(IssueStatus::Created {
            iid,
            url: issue.web_url,
        })
    }
    .instrument(span)
    .await
}
