//! Rich-text (HTML) to markdown conversion for roadmap descriptions.

use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Open list while walking the tree.
#[derive(Debug, Clone, Copy)]
enum List {
    Bullet,
    /// Number of the next item.
    Numbered(u32),
}

/// Converts rich-text editor HTML to markdown by walking the parsed tree.
///
/// Entities are decoded by the parser. Nested lists are indented under their
/// parent item.
#[derive(Debug, Clone)]
pub struct HtmlConverter {
    whitespace: Regex,
    trailing: Regex,
    blank_lines: Regex,
}

impl HtmlConverter {
    /// Compiles the whitespace normalisation patterns.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            whitespace: Regex::new(r"\s+")?,
            trailing: Regex::new(r"[ \t]+\n")?,
            blank_lines: Regex::new(r"\n(?:[ \t]*\n)+")?,
        })
    }

    /// Converts `html` to markdown. Absent input yields an empty string.
    #[must_use]
    pub fn convert(&self, html: Option<&str>) -> String {
        let Some(html) = html else {
            return String::new();
        };

        let fragment = Html::parse_fragment(html);
        let mut lists = Vec::new();
        let markdown = self.children(fragment.root_element(), &mut lists);
        let markdown = self.trailing.replace_all(&markdown, "\n");
        self.blank_lines
            .replace_all(&markdown, "\n\n")
            .trim()
            .to_string()
    }

    fn children(&self, element: ElementRef<'_>, lists: &mut Vec<List>) -> String {
        let mut out = String::new();
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(&self.text(text)),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        out.push_str(&self.element(child, lists));
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn text(&self, text: &str) -> String {
        self.whitespace
            .replace_all(text, " ")
            .replace('*', r"\*")
            .replace('_', r"\_")
    }

    fn element(&self, element: ElementRef<'_>, lists: &mut Vec<List>) -> String {
        let name = element.value().name();
        if let Some(level) = heading_level(name) {
            let title = self.children(element, lists);
            return block(&format!("{} {}", "#".repeat(level), title.trim()));
        }

        match name {
            "p" | "div" | "section" | "article" => block(self.children(element, lists).trim()),
            "br" => "\n".to_string(),
            "hr" => block("---"),
            "strong" | "b" => self.emphasis(element, lists, "**"),
            "em" | "i" => self.emphasis(element, lists, "*"),
            "del" | "s" | "strike" => self.emphasis(element, lists, "~~"),
            "code" => format!("`{}`", element.text().collect::<String>()),
            "pre" => {
                let code = element.text().collect::<String>();
                block(&format!("```\n{}\n```", code.trim_end()))
            }
            "a" => {
                let label = self.children(element, lists);
                match element.value().attr("href").filter(|href| !href.is_empty()) {
                    Some(href) => format!("[{}]({href})", label.trim()),
                    None => label,
                }
            }
            "img" => match element.value().attr("src") {
                Some(src) => {
                    let alt = element.value().attr("alt").unwrap_or_default();
                    format!("![{alt}]({src})")
                }
                None => String::new(),
            },
            "ul" => self.list(element, lists, List::Bullet),
            "ol" => {
                let start = element
                    .value()
                    .attr("start")
                    .and_then(|start| start.parse().ok())
                    .unwrap_or(1);
                self.list(element, lists, List::Numbered(start))
            }
            "li" => self.item(element, lists),
            "blockquote" => {
                let inner = self.children(element, lists);
                let inner = self.blank_lines.replace_all(&inner, "\n\n");
                let quoted = inner
                    .trim()
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                block(&quoted)
            }
            "script" | "style" | "head" | "title" => String::new(),
            _ => self.children(element, lists),
        }
    }

    /// Wraps the content in `marker`, keeping surrounding spaces outside it.
    fn emphasis(&self, element: ElementRef<'_>, lists: &mut Vec<List>, marker: &str) -> String {
        let inner = self.children(element, lists);
        let trimmed = inner.trim();
        if trimmed.is_empty() {
            return inner;
        }

        let lead = if inner.starts_with(char::is_whitespace) { " " } else { "" };
        let trail = if inner.ends_with(char::is_whitespace) { " " } else { "" };
        format!("{lead}{marker}{trimmed}{marker}{trail}")
    }

    fn list(&self, element: ElementRef<'_>, lists: &mut Vec<List>, kind: List) -> String {
        let nested = !lists.is_empty();
        lists.push(kind);
        let mut items = String::new();
        for child in element.children().filter_map(ElementRef::wrap) {
            items.push_str(&self.element(child, lists));
        }
        lists.pop();

        if nested {
            format!("\n{items}")
        } else {
            block(items.trim_end())
        }
    }

    /// Renders one list item; continuation lines are indented to the marker
    /// width so nested content stays inside the item.
    fn item(&self, element: ElementRef<'_>, lists: &mut Vec<List>) -> String {
        let marker = match lists.last_mut() {
            Some(List::Numbered(next)) => {
                let marker = format!("{next}. ");
                *next += 1;
                marker
            }
            _ => "* ".to_string(),
        };
        let indent = " ".repeat(marker.len());
        let content = self.children(element, lists);

        let mut out = marker;
        for (index, line) in content.trim().lines().enumerate() {
            if index > 0 {
                out.push('\n');
                if !line.trim().is_empty() {
                    out.push_str(&indent);
                }
            }
            out.push_str(line);
        }
        out.push('\n');
        out
    }
}

fn heading_level(name: &str) -> Option<usize> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn block(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("\n\n{text}\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(html: &str) -> String {
        HtmlConverter::new().unwrap().convert(Some(html))
    }

    #[test]
    fn absent_input_is_empty() {
        assert_eq!(HtmlConverter::new().unwrap().convert(None), "");
    }

    #[test]
    fn converts_paragraphs_and_emphasis() {
        assert_eq!(
            convert("<p>One <strong>bold</strong> and <em>soft</em></p><p>Two</p>"),
            "One **bold** and *soft*\n\nTwo"
        );
    }

    #[test]
    fn emphasis_survives_attributes() {
        assert_eq!(convert(r#"<b class="x">bold</b>"#), "**bold**");
        assert_eq!(convert(r#"<p>a<em style="color:red"> soft </em>b</p>"#), "a *soft* b");
    }

    #[test]
    fn converts_links_and_images() {
        assert_eq!(
            convert(r#"<p><a href="https://example.com" target="_blank">site</a></p>"#),
            "[site](https://example.com)"
        );
        assert_eq!(
            convert(r#"<img src="https://example.com/a.png" alt="a">"#),
            "![a](https://example.com/a.png)"
        );
    }

    #[test]
    fn converts_lists_and_headings() {
        assert_eq!(
            convert("<h2>Goals</h2><ul><li>fast</li><li>safe</li></ul>"),
            "## Goals\n\n* fast\n* safe"
        );
    }

    #[test]
    fn numbers_ordered_lists() {
        assert_eq!(
            convert("<ol><li>first</li><li>second</li></ol>"),
            "1. first\n2. second"
        );
        assert_eq!(convert(r#"<ol start="3"><li>third</li></ol>"#), "3. third");
    }

    #[test]
    fn indents_nested_lists() {
        assert_eq!(
            convert("<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"),
            "* a\n  * b\n* c"
        );
        assert_eq!(
            convert("<ol><li>step<ul><li>detail</li></ul></li></ol>"),
            "1. step\n   * detail"
        );
    }

    #[test]
    fn decodes_named_and_numeric_entities() {
        assert_eq!(
            convert("It&#8217;s &mdash; done"),
            "It\u{2019}s \u{2014} done"
        );
        assert_eq!(
            convert("<div><span>a &lt;b&gt; &amp; c&nbsp;d</span></div>"),
            "a <b> & c d"
        );
    }

    #[test]
    fn escapes_markdown_in_text() {
        assert_eq!(convert("<p>snake_case *star*</p>"), r"snake\_case \*star\*");
    }

    #[test]
    fn keeps_code_verbatim() {
        assert_eq!(
            convert("<pre><code>let a_b = 1;\nlet c = 2;</code></pre>"),
            "```\nlet a_b = 1;\nlet c = 2;\n```"
        );
        assert_eq!(convert("<p>run <code>make_all</code></p>"), "run `make_all`");
    }

    #[test]
    fn keeps_line_breaks() {
        assert_eq!(convert("a<br>b<br/>c"), "a\nb\nc");
    }

    #[test]
    fn quotes_blockquotes() {
        assert_eq!(
            convert("<blockquote><p>one</p><p>two</p></blockquote>"),
            "> one\n>\n> two"
        );
    }
}
