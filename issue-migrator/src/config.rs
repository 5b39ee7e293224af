//! Settings loading and validation.
//!
//! All migration behaviour is driven by one kebab-case TOML file. Secrets
//! (API tokens and passwords) are not part of it; they are passed in by the
//! caller.

mod aha;
mod error;
mod jira;
mod settings;

pub use aha::AhaSettings;
pub use error::ConfigError;
pub use jira::{JiraSettings, StoryPointTable};
pub use settings::{
    default_comment_header_format, default_roadmap_reference_format,
    default_source_link_format, default_sprint_note_format, GitLabSettings, MigrationSettings,
    TemplateSettings, TrackingSettings,
};

use std::path::Path;
use tracing::{debug, info};

/// Loads and validates a settings file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, unreadable, not valid TOML,
/// or fails validation.
pub fn load_settings(path: &Path) -> Result<MigrationSettings, ConfigError> {
    info!(path = %path.display(), "Loading settings");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let settings: MigrationSettings =
        toml::from_str(&contents).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

    settings.validate(path)?;
    debug!(
        jira = settings.jira.is_some(),
        aha = settings.aha.is_some(),
        "Settings validated"
    );
    Ok(settings)
}

impl MigrationSettings {
    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if self.gitlab.fallback_account.trim().is_empty() {
            return Err(invalid("gitlab.fallback-account must not be empty".into()));
        }

        if self.tracking.enabled && self.tracking.file.as_os_str().is_empty() {
            return Err(invalid("tracking.file must not be empty".into()));
        }

        if let Some(jira) = &self.jira {
            if jira.project.trim().is_empty() {
                return Err(invalid("jira.project must not be empty".into()));
            }
            if jira.page_size == 0 {
                return Err(invalid("jira.page-size must be greater than 0".into()));
            }
            for (component, grouping) in &jira.components {
                if !jira.projects.contains_key(grouping) {
                    return Err(invalid(format!(
                        "component '{component}' maps to '{grouping}', which has no entry in jira.projects"
                    )));
                }
            }
        }

        if let Some(aha) = &self.aha {
            if aha.project.trim().is_empty() || aha.release.trim().is_empty() {
                return Err(invalid("aha.project and aha.release must not be empty".into()));
            }
        }

        Ok(())
    }

    /// Returns the Jira section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if the file has none.
    pub fn jira(&self) -> Result<&JiraSettings, ConfigError> {
        self.jira
            .as_ref()
            .ok_or(ConfigError::MissingSection { section: "jira" })
    }

    /// Returns the Aha! section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] if the file has none.
    pub fn aha(&self) -> Result<&AhaSettings, ConfigError> {
        self.aha
            .as_ref()
            .ok_or(ConfigError::MissingSection { section: "aha" })
    }
}
