//! Markdown renderer with slugified heading anchors.
//!
//! This crate provides a [`MarkdownRenderer`] that converts markdown to HTML
//! using `pulldown-cmark`, with headings emitted through a pluggable
//! [`HeadingFormatter`].
//!
//! # Architecture
//!
//! - [`BlockRule`] / [`LIST_BLOCK_RULES`]: which block rules are recognised
//!   inside list items
//! - [`HeadingFormatter`]: strategy for turning a heading's level and rendered
//!   inline HTML into markup
//! - [`IdHeadingFormatter`]: default strategy, adds an `id` computed by [`slugify`]
//!
//! # Example
//!
//! ```
//! use tf_renderer::MarkdownRenderer;
//!
//! let html = MarkdownRenderer::new().render("# Hello World");
//! assert_eq!(html, "<h1 id=\"hello-world\">Hello World</h1>");
//! ```

mod blocks;
mod heading;
mod renderer;
mod slug;

pub use blocks::{BlockRule, LIST_BLOCK_RULES};
pub use heading::{HeadingFormatter, IdHeadingFormatter};
pub use renderer::MarkdownRenderer;
pub use slug::slugify;
