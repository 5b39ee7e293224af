//! Run summary types.

use super::result::ProcessingResult;
use crate::epics::EpicOutcome;
use crate::issues::IssueStatus;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of source records fetched.
    pub records_fetched: usize,

    /// Number of records migrated (including those routed nowhere).
    pub records_migrated: usize,

    /// Number of records skipped (already tracked, filtered).
    pub records_skipped: usize,

    /// Number of GitLab issues created.
    pub issues_created: usize,

    /// Number of created issues that were closed.
    pub issues_closed: usize,

    /// Number of notes replayed.
    pub notes_created: usize,

    /// Number of attachments relocated.
    pub attachments_relocated: usize,

    /// Number of epics created.
    pub epics_created: usize,

    /// Number of existing epics reused.
    pub epics_reused: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Migrated { issues, .. } => {
                self.records_migrated += 1;
                for issue in issues {
                    if issue.status.is_written() {
                        self.issues_created += 1;
                    }
                    if matches!(issue.status, IssueStatus::Closed { .. }) {
                        self.issues_closed += 1;
                    }
                    self.notes_created += issue.notes;
                    self.attachments_relocated += issue.attachments;
                }
            }
            ProcessingResult::Skipped { .. } => self.records_skipped += 1,
        }
    }

    /// Updates the summary with an epic resolution.
    pub fn record_epic(&mut self, outcome: &EpicOutcome) {
        if outcome.was_created() {
            self.epics_created += 1;
        } else {
            self.epics_reused += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gitlab::GitLabEpic;
    use crate::issues::MigratedIssue;

    fn issue(status: IssueStatus) -> MigratedIssue {
        MigratedIssue {
            source_key: "PRO-1".to_string(),
            project_id: 3,
            title: "Crash".to_string(),
            notes: 2,
            attachments: 1,
            linked_epic: false,
            status,
        }
    }

    #[test]
    fn can_record_result() {
        let mut summary = RunSummary::new(false);

        summary.record_result(&ProcessingResult::Migrated {
            key: "PRO-1".to_string(),
            issues: vec![
                issue(IssueStatus::Created {
                    iid: 1,
                    url: "https://example.com/1".to_string(),
                }),
                issue(IssueStatus::Closed {
                    iid: 2,
                    url: "https://example.com/2".to_string(),
                }),
            ],
        });
        summary.record_result(&ProcessingResult::Skipped {
            key: "PRO-2".to_string(),
            reason: "already migrated".to_string(),
        });

        assert_eq!(summary.records_migrated, 1);
        assert_eq!(summary.records_skipped, 1);
        assert_eq!(summary.issues_created, 2);
        assert_eq!(summary.issues_closed, 1);
        assert_eq!(summary.notes_created, 4);
        assert_eq!(summary.attachments_relocated, 2);
    }

    #[test]
    fn previewed_issues_are_not_counted_as_created() {
        let mut summary = RunSummary::new(true);

        summary.record_result(&ProcessingResult::Migrated {
            key: "PRO-1".to_string(),
            issues: vec![issue(IssueStatus::Previewed)],
        });

        assert_eq!(summary.records_migrated, 1);
        assert_eq!(summary.issues_created, 0);
        assert!(summary.dry_run);
    }

    #[test]
    fn can_record_epics() {
        let epic = GitLabEpic {
            id: 1,
            iid: 1,
            group_id: 7,
            title: "Billing".to_string(),
            labels: Vec::new(),
            parent_id: None,
        };
        let mut summary = RunSummary::new(false);

        summary.record_epic(&EpicOutcome::Created(epic.clone()));
        summary.record_epic(&EpicOutcome::Existing(epic));

        assert_eq!(summary.epics_created, 1);
        assert_eq!(summary.epics_reused, 1);
    }
}
