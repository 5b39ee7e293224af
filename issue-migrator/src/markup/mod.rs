//! Markup dialect translation.
//!
//! Jira wiki markup is rewritten into GitLab-flavoured markdown by a fixed,
//! ordered list of regex substitutions. This is not a parser: later rules
//! assume the output shape of earlier ones, so the order of the tables in
//! `rules` is part of the behaviour.
//!
//! Roadmap HTML goes through [`HtmlConverter`], which walks a parsed tree.

mod html;
mod rules;

pub use html::HtmlConverter;

use regex::{NoExpand, Regex};
use rules::{compile, Rule, STRUCTURE_RULES, TEXT_RULES};

/// Ordered pattern-to-replacement pairs applied after the static pipeline.
///
/// Replacements are inserted literally; `$` has no special meaning.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMap {
    entries: Vec<(Regex, String)>,
}

impl ReplacementMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a replacement. Entries apply in insertion order.
    pub fn insert(&mut self, pattern: Regex, replacement: impl Into<String>) {
        self.entries.push((pattern, replacement.into()));
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(pattern, replacement)` pairs in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&Regex, &str)> {
        self.entries
            .iter()
            .map(|(pattern, replacement)| (pattern, replacement.as_str()))
    }

    fn apply(&self, text: String) -> String {
        self.iter()
            .fold(text, |text, (pattern, replacement)| {
                pattern
                    .replace_all(&text, NoExpand(replacement))
                    .into_owned()
            })
    }
}

/// Jira wiki to GitLab markdown translator.
///
/// Holds the compiled rule pipeline; translation itself is a pure function of
/// its inputs.
#[derive(Debug, Clone)]
pub struct Translator {
    rules: Vec<Rule>,
}

impl Translator {
    /// Builds a translator that autolinks `project_key` references such as
    /// `PRO-12` to `{browse_base}browse/PRO-12`.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if a rule fails to compile.
    pub fn new(project_key: &str, browse_base: &str) -> Result<Self, regex::Error> {
        let mut rules = compile(STRUCTURE_RULES)?;
        rules.push(Rule::new(
            &format!(r"(\b{}-\d+\b)", regex::escape(project_key)),
            format!("[${{1}}]({}browse/${{1}})", browse_base.replace('$', "$$")),
        )?);
        rules.extend(compile(TEXT_RULES)?);
        Ok(Self { rules })
    }

    /// Translates `text`, then applies `replacements` as the final pass.
    ///
    /// Absent or empty input yields an empty string.
    #[must_use]
    pub fn translate(&self, text: Option<&str>, replacements: &ReplacementMap) -> String {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return String::new();
        };

        let translated = self
            .rules
            .iter()
            .fold(text.to_string(), |text, rule| rule.apply(&text));
        replacements.apply(translated)
    }
}
