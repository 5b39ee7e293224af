//! Template renderer.

use super::TemplateError;
use crate::config::TemplateSettings;
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{json, Value};

const SOURCE_LINK: &str = "source-link";
const SPRINT_NOTE: &str = "sprint-note";
const COMMENT_HEADER: &str = "comment-header";
const ROADMAP_REFERENCE: &str = "roadmap-reference";

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Output is markdown
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("eq", Box::new(eq_helper));

    hbs
}

/// Helper function for equality comparison in templates.
///
/// Usage: `{{#if (eq variable "value")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Renders the configured text fragments.
///
/// Templates are compiled once at construction, so syntax errors surface
/// before any record is migrated.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compiles the templates in `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] if a template does not parse.
    pub fn new(settings: &TemplateSettings) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(SOURCE_LINK, &settings.source_link)?;
        handlebars.register_template_string(SPRINT_NOTE, &settings.sprint_note)?;
        handlebars.register_template_string(COMMENT_HEADER, &settings.comment_header)?;
        handlebars.register_template_string(ROADMAP_REFERENCE, &settings.roadmap_reference)?;
        Ok(Self { handlebars })
    }

    /// Renders the link back to the source issue.
    ///
    /// Variables: `key`, `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn source_link(&self, key: &str, url: &str) -> Result<String, TemplateError> {
        self.render(SOURCE_LINK, &json!({ "key": key, "url": url }))
    }

    /// Renders the note naming the source sprint.
    ///
    /// Variables: `sprint`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn sprint_note(&self, sprint: &str) -> Result<String, TemplateError> {
        self.render(SPRINT_NOTE, &json!({ "sprint": sprint }))
    }

    /// Renders the attribution header of a replayed comment.
    ///
    /// Variables: `author`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn comment_header(&self, author: &str) -> Result<String, TemplateError> {
        self.render(COMMENT_HEADER, &json!({ "author": author }))
    }

    /// Renders the reference appended to roadmap epic descriptions.
    ///
    /// Variables: `resource`, `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn roadmap_reference(&self, name: &str, resource: &str) -> Result<String, TemplateError> {
        self.render(
            ROADMAP_REFERENCE,
            &json!({ "name": name, "resource": resource }),
        )
    }

    fn render(&self, name: &str, data: &Value) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(name, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates() {
        let renderer = TemplateRenderer::new(&TemplateSettings::default()).unwrap();

        assert_eq!(
            renderer
                .source_link("PRO-1", "https://jira.example.com/browse/PRO-1")
                .unwrap(),
            "Imported from Jira issue [PRO-1](https://jira.example.com/browse/PRO-1)"
        );
        assert_eq!(
            renderer.sprint_note("Sprint 4").unwrap(),
            "Original Jira sprint name Sprint 4"
        );
        assert_eq!(
            renderer.comment_header("Alice").unwrap(),
            "Original comment by Alice"
        );
        assert_eq!(
            renderer.roadmap_reference("Checkout", "https://acme.aha.io/epics/1").unwrap(),
            "https://acme.aha.io/epics/1"
        );
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = TemplateRenderer::new(&TemplateSettings::default()).unwrap();

        let result = renderer.comment_header("<Ops & Infra>").unwrap();

        assert_eq!(result, "Original comment by <Ops & Infra>");
    }

    #[test]
    fn test_render_conditional_eq() {
        let settings = TemplateSettings {
            comment_header: r#"{{#if (eq author "bot")}}Automated{{else}}By {{author}}{{/if}}"#
                .to_string(),
            ..TemplateSettings::default()
        };
        let renderer = TemplateRenderer::new(&settings).unwrap();

        assert_eq!(renderer.comment_header("bot").unwrap(), "Automated");
        assert_eq!(renderer.comment_header("Alice").unwrap(), "By Alice");
    }

    #[test]
    fn test_strict_mode_rejects_unknown_variable() {
        let settings = TemplateSettings {
            sprint_note: "Sprint {{milestone}}".to_string(),
            ..TemplateSettings::default()
        };
        let renderer = TemplateRenderer::new(&settings).unwrap();

        assert!(renderer.sprint_note("Sprint 4").is_err());
    }

    #[test]
    fn test_invalid_template_fails_at_construction() {
        let settings = TemplateSettings {
            source_link: "{{#if key}}unterminated".to_string(),
            ..TemplateSettings::default()
        };

        assert!(matches!(
            TemplateRenderer::new(&settings),
            Err(TemplateError::RegistrationError(_))
        ));
    }
}
