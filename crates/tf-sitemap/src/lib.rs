//! Sitemap extraction from Jinja template trees.
//!
//! Walks a template directory and builds a [`SitemapNode`] tree of the pages
//! it finds. Page metadata comes from block tags in the template source:
//!
//! | Block                         | Node field    |
//! |-------------------------------|---------------|
//! | `{% block title %}`           | `title`       |
//! | `{% block meta_description %}`| `description` |
//! | `{% block meta_copydoc %}`    | `link`        |
//!
//! # Example
//!
//! ```no_run
//! use tf_sitemap::Scanner;
//!
//! let tree = Scanner::new("templates")?.scan()?;
//! for child in &tree.children {
//!     println!("{} {:?}", child.name, child.title);
//! }
//! # Ok::<(), tf_sitemap::SitemapError>(())
//! ```

mod lines;
mod node;
mod scanner;

pub use lines::{
    ScrapedTags, TEMPLATE_PREFIXES, clean_tag, extended_path, extends_targets, is_template,
    scrape_tags,
};
pub use node::SitemapNode;
pub use scanner::{DEFAULT_BASE_TEMPLATES, MAX_EXTENDS_DEPTH, Scanner, SitemapError};
