//! Moves Jira attachments into GitLab project uploads.
//!
//! Each attachment is downloaded and re-uploaded under a random name, and the
//! returned [`ReplacementMap`] rewrites `!file.png|thumbnail!` embeds in the
//! translated text to point at the upload.

mod error;

pub use error::AttachmentError;

use crate::gitlab::GitLabClient;
use crate::identity::IdentityResolver;
use crate::jira::{JiraAttachment, JiraClient};
use crate::markup::ReplacementMap;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Relocates `attachments` into project `project_id`.
///
/// When `impersonation` is given, each upload is made as the resolved author
/// of the attachment.
///
/// # Errors
///
/// Returns [`AttachmentError`] on the first failed download or upload.
pub async fn relocate_attachments(
    jira: &JiraClient,
    gitlab: &GitLabClient,
    attachments: &[JiraAttachment],
    project_id: u64,
    impersonation: Option<&IdentityResolver>,
) -> Result<ReplacementMap, AttachmentError> {
    let mut replacements = ReplacementMap::new();

    for attachment in attachments {
        let filename = attachment.filename.as_str();
        let content = jira
            .download(&attachment.content)
            .await
            .map_err(|source| AttachmentError::Download {
                filename: filename.to_string(),
                source,
            })?;

        let sudo = impersonation.map(|identities| identities.resolve(attachment.author.login()));
        let upload = gitlab
            .upload_file(project_id, upload_name(filename), content, sudo)
            .await
            .map_err(|source| AttachmentError::Upload {
                filename: filename.to_string(),
                project_id,
                source,
            })?;

        let Some(url) = upload.url else {
            debug!(filename, project_id, "Upload response has no url, skipping");
            continue;
        };

        let pattern = embed_pattern(filename).map_err(|source| AttachmentError::Pattern {
            filename: filename.to_string(),
            source,
        })?;
        replacements.insert(pattern, format!("![{filename}]({url})"));
        info!(filename, project_id, %url, "Relocated attachment");
    }

    Ok(replacements)
}

/// Random upload name that keeps a plain ASCII extension.
fn upload_name(filename: &str) -> String {
    let id = Uuid::new_v4();
    let extension = Path::new(filename)
        .extension()
        .and_then(|extension| extension.to_str())
        .filter(|extension| {
            !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric())
        });

    match extension {
        Some(extension) => format!("{id}.{extension}"),
        None => id.to_string(),
    }
}

/// Matches a Jira embed such as `!name.png!` or `!name.png|width=300!`.
fn embed_pattern(filename: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("!{}[^!]*!", regex::escape(filename)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_name_keeps_ascii_extension() {
        let name = upload_name("Écran d'accueil.png");
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), 36 + ".png".len());
        assert!(name.is_ascii());
    }

    #[test]
    fn upload_name_drops_unusual_extension() {
        assert_eq!(upload_name("notes").len(), 36);
        assert_eq!(upload_name("archive.tär").len(), 36);
    }

    #[test]
    fn embed_pattern_matches_options_and_escapes_name() {
        let pattern = embed_pattern("shot (1).png").unwrap();

        assert!(pattern.is_match("see !shot (1).png|thumbnail! here"));
        assert!(pattern.is_match("!shot (1).png!"));
        assert!(!pattern.is_match("!shot 1.png!"));
    }
}
