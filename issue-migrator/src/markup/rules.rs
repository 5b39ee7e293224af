//! Substitution rules shared by the markup converters.

use regex::Regex;

/// One regex rewrite. Replacements may reference capture groups as `${n}`.
#[derive(Debug, Clone)]
pub(crate) struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    /// Compiles a rule.
    pub(crate) fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Rewrites every non-overlapping match in `text`.
    pub(crate) fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Compiles an ordered rule table.
pub(crate) fn compile(table: &[(&str, &str)]) -> Result<Vec<Rule>, regex::Error> {
    table
        .iter()
        .map(|(pattern, replacement)| Rule::new(pattern, *replacement))
        .collect()
}

/// Jira wiki rules that run before issue cross references are linked.
pub(crate) const STRUCTURE_RULES: &[(&str, &str)] = &[
    // line breaks
    (r"(\r\n)", "  ${1}"),
    // block code
    (r"\{code:([a-z]+)\}\s*", "\n```${1}\n"),
    (r"\{code\}\s*", "\n```\n"),
    // block quotes
    (r"\n\s*bq\. (.*)\n", "\n> ${1}\n"),
    (r"\{quote\}", "\n>>>\n"),
    // colors
    (r"\{color:[#\w]+\}(.*)\{color\}", "> **${1}**"),
    // ruler
    (r"\n-{4,}\n", "\n---\n"),
    // user mentions
    (r"\[~([a-z]+)\]", "@${1}"),
    // links without alt text
    (r"\[([^|\]]*)\]", "${1}"),
    // links with alt text
    (r"\[(?:(.+)\|)([a-z]+://.+)\]", "[${1}](${2})"),
];

/// Jira wiki rules that run after cross references are linked.
///
/// Lists and headings come before emphasis so that their markers are already
/// rewritten when the emphasis patterns look for `*`, `-` and `#`.
pub(crate) const TEXT_RULES: &[(&str, &str)] = &[
    // ordered lists
    (r"\n *# ", "\n 1. "),
    (r"\n *[*\-#]# ", "\n   1. "),
    (r"\n *[*\-#]{2}# ", "\n     1. "),
    // unordered lists
    (r"\n *\* ", "\n - "),
    (r"\n *[*\-#][*\-] ", "\n   - "),
    (r"\n *[*\-#]{2}[*\-] ", "\n     - "),
    // bold
    (r"(^|\W)\*(\S.*\S)\*(\W|$)", "${1}**${2}**${3}"),
    // emphasis
    (r"(^|\W)_(\S.*\S)_(\W|$)", "${1}*${2}*${3}"),
    // strikethrough
    (r"(^|\W)-(\S.*\S)-(\W|$)", "${1}~~${2}~~${3}"),
    // underline
    (r"(^|\W)\+(\S.*\S)\+(\W|$)", "${1}__${2}__${3}"),
    // inline code
    (r"(^|\W)\{\{(.*)\}\}(\W|$)", "${1}`${2}`${3}"),
    // headings
    (r"\n?\bh1\. ", "\n# "),
    (r"\n?\bh2\. ", "\n## "),
    (r"\n?\bh3\. ", "\n### "),
    (r"\n?\bh4\. ", "\n#### "),
    (r"\n?\bh5\. ", "\n##### "),
    (r"\n?\bh6\. ", "\n###### "),
    // emojis
    (r":\)", ":smiley:"),
    (r":\(", ":disappointed:"),
    (r":P", ":yum:"),
    (r":D", ":grin:"),
    (r";\)", ":wink:"),
    (r"\(y\)", ":thumbsup:"),
    (r"\(n\)", ":thumbsdown:"),
    (r"\(i\)", ":information_source:"),
    (r"\(/\)", ":white_check_mark:"),
    (r"\(x\)", ":x:"),
    (r"\(!\)", ":warning:"),
    (r"\(\+\)", ":heavy_plus_sign:"),
    (r"\(-\)", ":heavy_minus_sign:"),
    (r"\(\?\)", ":grey_question:"),
    (r"\(on\)", ":bulb:"),
    (r"\(\*[rgby]?\)", ":star:"),
];
