//! Heading formatting strategies.

use crate::slug::slugify;

/// Strategy for emitting a rendered heading.
///
/// Receives the heading level (1-6) and the heading's already-rendered inline
/// HTML, and returns the complete heading element.
///
/// Any `Fn(u8, &str) -> String` closure is a formatter:
///
/// ```
/// use tf_renderer::MarkdownRenderer;
///
/// let renderer = MarkdownRenderer::new()
///     .with_formatter(|level: u8, html: &str| format!("<h{level}>{html}</h{level}>"));
/// assert_eq!(renderer.render("## Plain"), "<h2>Plain</h2>");
/// ```
pub trait HeadingFormatter: Send + Sync {
    /// Format a heading of `level` whose inline content renders to `html`.
    fn format(&self, level: u8, html: &str) -> String;
}

impl<F> HeadingFormatter for F
where
    F: Fn(u8, &str) -> String + Send + Sync,
{
    fn format(&self, level: u8, html: &str) -> String {
        self(level, html)
    }
}

/// Default formatter: adds an `id` attribute derived with [`slugify`].
///
/// Identical headings produce identical ids; no de-duplication is attempted.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdHeadingFormatter;

impl HeadingFormatter for IdHeadingFormatter {
    fn format(&self, level: u8, html: &str) -> String {
        let id = slugify(html);
        format!(r#"<h{level} id="{id}">{html}</h{level}>"#)
    }
}
