//! Markdown to HTML rendering with pluggable heading output.

use std::sync::LazyLock;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use regex::Regex;

use crate::blocks::{BlockRule, LIST_BLOCK_RULES, allows};
use crate::heading::{HeadingFormatter, IdHeadingFormatter};

/// Opening tag at the start of a raw HTML block.
static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<([A-Za-z][A-Za-z0-9-]*)(?:\s[^>]*)?>").unwrap());

/// Block HTML elements whose content is left verbatim.
const PRE_TAGS: [&str; 3] = ["pre", "script", "style"];

/// Heading being collected until its end tag.
struct PendingHeading<'a> {
    level: u8,
    /// ATX heading inside a list item, emitted as literal text.
    literal: bool,
    inline: Vec<Event<'a>>,
}

/// Markdown renderer.
///
/// Non-heading content is rendered by `pulldown-cmark`'s HTML writer. Each
/// heading's inline content is rendered first and then handed to the
/// configured [`HeadingFormatter`], so the formatter sees the final inline
/// HTML (including `<code>`, `<em>` and escaped entities).
///
/// Raw HTML blocks of the form `<tag ...>content</tag>` get inline markdown
/// (emphasis, code spans, links) rendered inside them, except for `<pre>`,
/// `<script>` and `<style>`.
///
/// The renderer holds no per-document state and can be shared across threads.
pub struct MarkdownRenderer<F: HeadingFormatter = IdHeadingFormatter> {
    formatter: F,
}

impl MarkdownRenderer {
    /// Create a renderer using [`IdHeadingFormatter`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatter: IdHeadingFormatter,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: HeadingFormatter> MarkdownRenderer<F> {
    /// Replace the heading formatter.
    #[must_use]
    pub fn with_formatter<G: HeadingFormatter>(self, formatter: G) -> MarkdownRenderer<G> {
        MarkdownRenderer { formatter }
    }

    /// Parser options implied by [`LIST_BLOCK_RULES`].
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_STRIKETHROUGH;
        if allows(&LIST_BLOCK_RULES, BlockRule::Table)
            || allows(&LIST_BLOCK_RULES, BlockRule::NpTable)
        {
            options |= Options::ENABLE_TABLES;
        }
        options
    }

    /// Render markdown text to HTML.
    pub fn render(&self, markdown: &str) -> String {
        let options = self.parser_options();
        let parser = Parser::new_ext(markdown, options).into_offset_iter();
        let atx_in_lists = allows(&LIST_BLOCK_RULES, BlockRule::Heading);

        let mut events: Vec<Event<'_>> = Vec::new();
        let mut pending: Option<PendingHeading<'_>> = None;
        let mut html_block: Option<String> = None;
        let mut list_depth = 0usize;

        for (event, range) in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    let is_atx = markdown[range].trim_start().starts_with('#');
                    pending = Some(PendingHeading {
                        level: heading_level_to_num(level),
                        literal: list_depth > 0 && is_atx && !atx_in_lists,
                        inline: Vec::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(heading) = pending.take() {
                        events.push(Event::Html(self.finish_heading(heading).into()));
                    }
                }
                Event::Start(Tag::HtmlBlock) => html_block = Some(String::new()),
                Event::End(TagEnd::HtmlBlock) => {
                    if let Some(block) = html_block.take() {
                        events.push(Event::Html(render_block_html(&block, options).into()));
                    }
                }
                Event::Html(text) if html_block.is_some() => {
                    if let Some(block) = html_block.as_mut() {
                        block.push_str(&text);
                    }
                }
                event => {
                    match &event {
                        Event::Start(Tag::List(_)) => list_depth += 1,
                        Event::End(TagEnd::List(_)) => list_depth = list_depth.saturating_sub(1),
                        _ => {}
                    }
                    match pending.as_mut() {
                        Some(heading) => heading.inline.push(event),
                        None => events.push(event),
                    }
                }
            }
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        output
    }

    fn finish_heading(&self, heading: PendingHeading<'_>) -> String {
        let mut inline = String::new();
        html::push_html(&mut inline, heading.inline.into_iter());

        if heading.literal {
            let marker = "#".repeat(usize::from(heading.level));
            format!("{marker} {inline}")
        } else {
            self.formatter.format(heading.level, &inline)
        }
    }
}

/// Render inline markdown between the outer tags of a raw HTML block.
///
/// Blocks that are not a single `<tag>...</tag>` element, or whose content
/// holds block-level markdown, are returned unchanged.
fn render_block_html(block: &str, options: Options) -> String {
    let Some(open) = OPEN_TAG_RE.captures(block) else {
        return block.to_owned();
    };
    let tag = &open[1];
    if PRE_TAGS.iter().any(|pre| pre.eq_ignore_ascii_case(tag)) {
        return block.to_owned();
    }

    let open_len = open[0].len();
    let rest = &block[open_len..];
    let trimmed = rest.trim_end();
    let close = format!("</{tag}>");
    let Some(inner_len) = trimmed.len().checked_sub(close.len()) else {
        return block.to_owned();
    };
    let closes = trimmed
        .get(inner_len..)
        .is_some_and(|end| end.eq_ignore_ascii_case(&close));
    if !closes {
        return block.to_owned();
    }

    let inner = &rest[..inner_len];
    let Some(rendered) = render_inline(inner.trim(), options) else {
        return block.to_owned();
    };

    let lead = &inner[..inner.len() - inner.trim_start().len()];
    let trail = &inner[inner.trim_end().len()..];
    format!(
        "{}{lead}{rendered}{trail}{}",
        &block[..open_len],
        &rest[inner_len..]
    )
}

/// Render `text` as inline markdown, or `None` if it contains block markup.
fn render_inline(text: &str, options: Options) -> Option<String> {
    let mut events: Vec<Event<'_>> = Vec::new();
    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(Tag::Paragraph) => {
                if !events.is_empty() {
                    events.push(Event::Text("\n\n".into()));
                }
            }
            Event::End(TagEnd::Paragraph) => {}
            Event::Start(
                Tag::Emphasis
                | Tag::Strong
                | Tag::Strikethrough
                | Tag::Link { .. }
                | Tag::Image { .. },
            )
            | Event::End(
                TagEnd::Emphasis
                | TagEnd::Strong
                | TagEnd::Strikethrough
                | TagEnd::Link
                | TagEnd::Image,
            )
            | Event::Text(_)
            | Event::Code(_)
            | Event::InlineHtml(_)
            | Event::SoftBreak
            | Event::HardBreak => events.push(event),
            _ => return None,
        }
    }

    let mut output = String::with_capacity(text.len());
    html::push_html(&mut output, events.into_iter());
    Some(output)
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::new().render(markdown)
    }

    #[test]
    fn test_single_heading() {
        assert_eq!(
            render("# Heading One"),
            "<h1 id=\"heading-one\">Heading One</h1>"
        );
    }

    #[test]
    fn test_plain_text_has_no_ids() {
        let html = render("Just a paragraph of text.\n\nAnd another one.");

        assert!(!html.contains("id="));
        assert!(html.contains("<p>Just a paragraph of text.</p>"));
    }

    #[test]
    fn test_heading_with_inline_code_and_quotes() {
        assert_eq!(
            render("# `<h1>` with 'special' chars"),
            "<h1 id=\"h1-with-special-chars\"><code>&lt;h1&gt;</code> with 'special' chars</h1>"
        );
    }

    #[test]
    fn test_heading_keeps_inline_markup() {
        assert_eq!(
            render("## Hello *World*"),
            "<h2 id=\"hello-world\">Hello <em>World</em></h2>"
        );
    }

    #[test]
    fn test_setext_heading() {
        assert_eq!(render("Title\n====="), "<h1 id=\"title\">Title</h1>");
    }

    #[test]
    fn test_duplicate_headings_share_id() {
        let html = render("## Setup\n\nFirst.\n\n## Setup\n\nSecond.");

        assert_eq!(html.matches(r#"<h2 id="setup">Setup</h2>"#).count(), 2);
    }

    #[test]
    fn test_heading_followed_by_paragraph() {
        assert_eq!(
            render("### Intro\nBody text."),
            "<h3 id=\"intro\">Intro</h3>\n<p>Body text.</p>\n"
        );
    }

    #[test]
    fn test_atx_heading_in_list_is_literal() {
        let html = render("- # not a heading\n- item");

        assert!(!html.contains("<h1"));
        assert!(html.contains("<li># not a heading</li>"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_block_html_passes_through() {
        let html = render("<div class=\"note\">kept</div>\n\n# After");

        assert!(html.contains("<div class=\"note\">kept</div>"));
        assert!(html.contains("<h1 id=\"after\">After</h1>"));
    }

    #[test]
    fn test_block_html_renders_inline_markdown() {
        assert_eq!(
            render("<div class=\"row\">*emphasis* and `code`</div>"),
            "<div class=\"row\"><em>emphasis</em> and <code>code</code></div>"
        );
    }

    #[test]
    fn test_block_html_multiline_content() {
        let html = render("<section>\nSee [docs](/docs) for **more**.\n</section>\n");

        assert_eq!(
            html,
            "<section>\nSee <a href=\"/docs\">docs</a> for <strong>more</strong>.\n</section>\n"
        );
    }

    #[test]
    fn test_pre_block_is_verbatim() {
        let source = "<pre>*not emphasis*</pre>\n";

        assert_eq!(render(source), source);
    }

    #[test]
    fn test_unbalanced_block_html_is_verbatim() {
        let source = "<div>\n*open only*\n";

        assert_eq!(render(source), source);
    }

    #[test]
    fn test_heading_has_no_trailing_newline() {
        assert_eq!(
            render("# A\n\n## B"),
            "<h1 id=\"a\">A</h1><h2 id=\"b\">B</h2>"
        );
    }

    #[test]
    fn test_custom_formatter() {
        let renderer = MarkdownRenderer::new()
            .with_formatter(|level: u8, html: &str| format!("<h{level} class=\"x\">{html}</h{level}>"));

        assert_eq!(renderer.render("## Two"), "<h2 class=\"x\">Two</h2>");
    }

    #[test]
    fn test_parser_options_enable_tables() {
        let options = MarkdownRenderer::new().parser_options();

        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(!options.contains(Options::ENABLE_HEADING_ATTRIBUTES));
    }
}
