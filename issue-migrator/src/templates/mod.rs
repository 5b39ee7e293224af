//! Template rendering using Handlebars.
//!
//! The small text fragments the migrator adds to GitLab content (source link
//! footer, sprint note, comment attribution, roadmap reference) are
//! configurable templates.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};
