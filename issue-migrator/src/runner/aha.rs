//! Aha! roadmap migration path.
//!
//! Release epics become GitLab epics and their features become child epics.
//! Epics are matched by title, so re-running reuses what exists instead of
//! duplicating it and no progress store is needed.

use super::MigrationError;
use crate::aha::{AhaClient, AhaDescription, EpicReference};
use crate::config::AhaSettings;
use crate::epics::EpicResolver;
use crate::gitlab::GitLabClient;
use crate::markup::HtmlConverter;
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::TemplateRenderer;
use tracing::{info, info_span, Instrument};

pub(crate) struct RoadmapMigration<'a> {
    pub settings: &'a AhaSettings,
    pub templates: &'a TemplateRenderer,
    pub gitlab: &'a GitLabClient,
    pub aha: AhaClient,
    pub html: HtmlConverter,
    pub dry_run: bool,
}

impl RoadmapMigration<'_> {
    /// Migrates one release epic and its features.
    pub async fn process_epic(
        &self,
        reference: &EpicReference,
        summary: &mut RunSummary,
    ) -> Result<ProcessingResult, MigrationError> {
        let key = reference.reference_num.clone();
        let span = info_span!("epic", key = %key);

        async {
            let epic = self.aha.epic(&key).await?;
            let description = self.description(&epic.description, &epic.name, &epic.resource)?;
            let resolver = EpicResolver::new(self.gitlab, self.settings.default_labels.clone());

            let parent_id = if self.dry_run {
                print_preview(&epic.name, &self.settings.epic_label, &description, None);
                None
            } else {
                let outcome = resolver
                    .get_or_create(
                        self.settings.group,
                        &epic.name,
                        Some(&description),
                        Some(&self.settings.epic_label),
                        None,
                    )
                    .await?;
                summary.record_epic(&outcome);
                Some(outcome.epic().id)
            };

            for feature_ref in &epic.features {
                let feature = self.aha.feature(&feature_ref.resource).await?;
                let description =
                    self.description(&feature.description, &feature.name, &feature.resource)?;

                if self.dry_run {
                    print_preview(
                        &feature.name,
                        &self.settings.feature_label,
                        &description,
                        Some(&epic.name),
                    );
                    continue;
                }

                let outcome = resolver
                    .get_or_create(
                        self.settings.group,
                        &feature.name,
                        Some(&description),
                        Some(&self.settings.feature_label),
                        parent_id,
                    )
                    .await?;
                summary.record_epic(&outcome);
            }

            info!(
                release = epic.release.as_ref().map(|release| release.name.as_str()),
                features = epic.features.len(),
                "Epic migrated"
            );
            Ok(ProcessingResult::Migrated {
                key,
                issues: Vec::new(),
            })
        }
        .instrument(span)
        .await
    }

    fn description(
        &self,
        description: &AhaDescription,
        name: &str,
        resource: &str,
    ) -> Result<String, MigrationError> {
        let body = self.html.convert(description.body.as_deref());
        let reference = self.templates.roadmap_reference(name, resource)?;
        Ok(format!("{body}\n\n{reference}\n"))
    }
}

fn print_preview(title: &str, label: &str, description: &str, parent: Option<&str>) {
    match parent {
        Some(parent) => println!("\n[DRY RUN]   Feature epic \"{title}\" under \"{parent}\""),
        None => println!("\n[DRY RUN] Epic \"{title}\""),
    }
    println!("  Label: {label}");
    for line in description.lines().take(5) {
        println!("    {line}");
    }
}
