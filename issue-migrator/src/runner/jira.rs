//! Jira issue migration path.

use super::plan::{base_labels, created_at, project_labels, route_components, weight, Route};
use super::MigrationError;
use crate::attachments::relocate_attachments;
use crate::config::JiraSettings;
use crate::epics::EpicResolver;
use crate::gitlab::{GitLabClient, GitLabEpic};
use crate::identity::IdentityResolver;
use crate::issues::{publish_issue, IssueDraft, IssueStatus, MigratedIssue, NoteDraft};
use crate::jira::{IssueDetails, JiraClient, JiraIssue};
use crate::markup::{ReplacementMap, Translator};
use crate::progress::{container_entry, ProgressStore, TrackingGranularity};
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::TemplateRenderer;
use std::collections::HashMap;
use tracing::{debug, info, info_span, Instrument};

/// State shared by every record of one Jira run.
pub(crate) struct JiraMigration<'a> {
    pub settings: &'a JiraSettings,
    pub templates: &'a TemplateRenderer,
    pub gitlab: &'a GitLabClient,
    pub jira: JiraClient,
    pub identities: IdentityResolver,
    pub translator: Translator,
    pub impersonate: bool,
    pub granularity: TrackingGranularity,
    pub dry_run: bool,
    /// Project id to epic group id.
    pub epic_groups: HashMap<u64, u64>,
}

/// Record-level values shared by every target project.
struct RecordPlan {
    base_labels: Vec<String>,
    epic_title: Option<String>,
    sprint: Option<String>,
    weight: Option<u32>,
    assignee_id: Option<u64>,
    created_at: Option<String>,
    author: Option<String>,
    close: bool,
}

impl JiraMigration<'_> {
    /// Runs one record to a terminal state.
    pub async fn process_record<S: ProgressStore>(
        &mut self,
        issue: &JiraIssue,
        store: &mut S,
        summary: &mut RunSummary,
    ) -> Result<ProcessingResult, MigrationError> {
        let key = issue.key.clone();
        let span = info_span!("record", key = %key);

        async {
            if store.has(&key) {
                info!("Already migrated, skipping");
                return Ok(ProcessingResult::Skipped {
                    key,
                    reason: "already migrated".to_string(),
                });
            }

            let issue_type = &issue.fields.issue_type.name;
            let Some(type_label) = self.settings.issue_types.get(issue_type) else {
                info!(issue_type = %issue_type, "Issue type is not mapped, skipping");
                return Ok(ProcessingResult::Skipped {
                    key,
                    reason: format!("issue type '{issue_type}' is not mapped"),
                });
            };

            let routes = route_components(self.settings, &issue.fields.components);

            let mut migrated = Vec::with_capacity(routes.len());
            if routes.is_empty() {
                info!("No component routes to a project");
            } else {
                let plan = self.plan_record(issue, type_label).await?;
                let details = self.jira.issue_details(&issue.id).await?;
                for route in &routes {
                    let entry = container_entry(&key, route.project_id);
                    if self.granularity == TrackingGranularity::PerContainer && store.has(&entry) {
                        debug!(project_id = route.project_id, "Project already migrated, skipping");
                        continue;
                    }

                    let project_span =
                        info_span!("project", project_id = route.project_id, grouping = route.grouping);
                    let result = self
                        .migrate_to_project(issue, &details, &plan, route, summary)
                        .instrument(project_span)
                        .await?;
                    migrated.push(result);

                    if !self.dry_run && self.granularity == TrackingGranularity::PerContainer {
                        store.append(&entry)?;
                    }
                }
            }

            if !self.dry_run {
                store.append(&key)?;
            }
            info!(issues = migrated.len(), "Record migrated");
            Ok(ProcessingResult::Migrated {
                key,
                issues: migrated,
            })
        }
        .instrument(span)
        .await
    }

    async fn plan_record(
        &self,
        issue: &JiraIssue,
        type_label: &str,
    ) -> Result<RecordPlan, MigrationError> {
        let weight = weight(self.settings, issue)?;

        let epic_title = match self
            .settings
            .epic_field
            .as_deref()
            .and_then(|field| issue.custom_str(field))
        {
            Some(epic_key) => Some(self.jira.issue_summary(epic_key).await?),
            None => None,
        };

        let fields = &issue.fields;
        let author = fields
            .reporter
            .as_ref()
            .filter(|_| self.impersonate)
            .map(|reporter| self.identities.resolve(&reporter.display_name).to_string());

        Ok(RecordPlan {
            base_labels: base_labels(self.settings, issue, type_label, epic_title.as_deref()),
            sprint: self
                .settings
                .sprint_field
                .as_deref()
                .and_then(|field| issue.last_sprint(field)),
            epic_title,
            weight,
            assignee_id: fields
                .assignee
                .as_ref()
                .and_then(|assignee| self.identities.user_id(&assignee.display_name)),
            created_at: created_at(fields.created.as_deref()),
            author,
            close: issue.is_done(),
        })
    }

    async fn migrate_to_project(
        &mut self,
        issue: &JiraIssue,
        details: &IssueDetails,
        plan: &RecordPlan,
        route: &Route<'_>,
        summary: &mut RunSummary,
    ) -> Result<MigratedIssue, MigrationError> {
        let project_id = route.project_id;

        let replacements = if self.dry_run {
            ReplacementMap::new()
        } else {
            let impersonation = self.impersonate.then_some(&self.identities);
            relocate_attachments(
                &self.jira,
                self.gitlab,
                details.attachments(),
                project_id,
                impersonation,
            )
            .await?
        };

        let draft = IssueDraft {
            project_id,
            title: issue.fields.summary.clone(),
            description: self.description(issue, plan, &replacements)?,
            labels: project_labels(&plan.base_labels, route),
            assignee_id: plan.assignee_id,
            weight: plan.weight,
            milestone_id: self.milestone(project_id, plan).await?,
            created_at: plan.created_at.clone(),
            author: plan.author.clone(),
            notes: self.notes(details, &replacements)?,
            close: plan.close,
        };

        if self.dry_run {
            print_preview(&issue.key, &draft, details.attachments().len());
            return Ok(MigratedIssue {
                source_key: issue.key.clone(),
                project_id,
                title: draft.title,
                notes: draft.notes.len(),
                attachments: 0,
                linked_epic: plan.epic_title.is_some(),
                status: IssueStatus::Previewed,
            });
        }

        let epic = match &plan.epic_title {
            Some(title) => Some(self.epic(project_id, title, route.label, summary).await?),
            None => None,
        };
        let status = publish_issue(self.gitlab, &draft, epic.as_ref()).await?;

        Ok(MigratedIssue {
            source_key: issue.key.clone(),
            project_id,
            title: draft.title,
            notes: draft.notes.len(),
            attachments: replacements.len(),
            linked_epic: epic.is_some(),
            status,
        })
    }

    fn description(
        &self,
        issue: &JiraIssue,
        plan: &RecordPlan,
        replacements: &ReplacementMap,
    ) -> Result<String, MigrationError> {
        let mut description = self
            .translator
            .translate(issue.fields.description.as_deref(), replacements);

        if self.settings.add_source_link {
            let link = self
                .templates
                .source_link(&issue.key, &self.settings.browse_url(&issue.key))?;
            description.push_str("\n\n");
            description.push_str(&link);
        }
        if let (true, Some(sprint)) = (self.settings.add_sprint_note, &plan.sprint) {
            description.push_str("\n\n");
            description.push_str(&self.templates.sprint_note(sprint)?);
        }

        Ok(description)
    }

    fn notes(
        &self,
        details: &IssueDetails,
        replacements: &ReplacementMap,
    ) -> Result<Vec<NoteDraft>, MigrationError> {
        details
            .comments()
            .iter()
            .map(|comment| -> Result<NoteDraft, MigrationError> {
                let author = &comment.author.display_name;
                let body = self
                    .translator
                    .translate(comment.body.as_deref(), replacements);

                if self.impersonate {
                    return Ok(NoteDraft {
                        body,
                        author: Some(self.identities.resolve(author).to_string()),
                    });
                }
                let header = self.templates.comment_header(author)?;
                Ok(NoteDraft {
                    body: format!("{header}\n\n{body}"),
                    author: None,
                })
            })
            .collect()
    }

    async fn milestone(
        &self,
        project_id: u64,
        plan: &RecordPlan,
    ) -> Result<Option<u64>, MigrationError> {
        let Some(sprint) = plan.sprint.as_deref().filter(|_| self.settings.sprint_as_milestone)
        else {
            return Ok(None);
        };
        if self.dry_run {
            return Ok(None);
        }

        if let Some(milestone) = self.gitlab.find_milestone(project_id, sprint).await? {
            return Ok(Some(milestone.id));
        }
        let milestone = self.gitlab.create_milestone(project_id, sprint, None).await?;
        info!(project_id, title = sprint, "Created milestone");
        Ok(Some(milestone.id))
    }

    async fn epic(
        &mut self,
        project_id: u64,
        title: &str,
        project_label: Option<&str>,
        summary: &mut RunSummary,
    ) -> Result<GitLabEpic, MigrationError> {
        let group_id = match self.epic_groups.get(&project_id) {
            Some(group_id) => *group_id,
            None => {
                let group_id = self.gitlab.get_project(project_id).await?.epic_group_id();
                self.epic_groups.insert(project_id, group_id);
                group_id
            }
        };

        let resolver = EpicResolver::new(self.gitlab, self.settings.default_labels.clone());
        let outcome = resolver
            .get_or_create(group_id, title, None, project_label, None)
            .await?;
        summary.record_epic(&outcome);
        Ok(outcome.epic().clone())
    }
}

fn print_preview(key: &str, draft: &IssueDraft, attachments: usize) {
    println!("\n[DRY RUN] {key} -> project {}", draft.project_id);
    println!("  Title: {}", draft.title);
    println!("  Labels: {}", draft.labels.join(", "));
    if let Some(weight) = draft.weight {
        println!("  Weight: {weight}");
    }
    if let Some(created_at) = &draft.created_at {
        println!("  Created: {created_at}");
    }
    println!(
        "  Notes: {}, attachments: {attachments}, close: {}",
        draft.notes.len(),
        draft.close
    );

    println!("  Description:");
    for line in draft.description.lines().take(10) {
        println!("    {line}");
    }
    if draft.description.lines().count() > 10 {
        println!("    ...");
    }
}
