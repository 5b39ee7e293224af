#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod aha;
pub mod attachments;
pub mod config;
pub mod epics;
pub mod gitlab;
pub(crate) mod http;
pub mod identity;
pub mod issues;
pub mod jira;
pub mod markup;
pub mod progress;
pub mod runner;
pub mod summary;
pub mod templates;

pub use attachments::{relocate_attachments, AttachmentError};
pub use config::{load_settings, ConfigError, MigrationSettings};
pub use epics::{EpicOutcome, EpicResolver};
pub use http::UnexpectedStatus;
pub use identity::IdentityResolver;
pub use issues::{publish_issue, IssueDraft, IssueError, IssueStatus, MigratedIssue};
pub use markup::{HtmlConverter, ReplacementMap, Translator};
pub use progress::{
    FileProgressStore, MemoryProgressStore, ProgressError, ProgressStore, TrackingGranularity,
};
pub use runner::{Credentials, MigrationError, Runner, RunnerConfig, RunnerError};
pub use summary::{ProcessingResult, RunSummary};
pub use templates::{create_handlebars_registry, TemplateError, TemplateRenderer};
