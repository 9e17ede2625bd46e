//! Path-to-template resolution and rendering.
//!
//! Turns a request path into a rendered page without a handler per page:
//!
//! 1. [`PathResolver`] probes `<path>.html`, `<path>/index.html`, `<path>.md`,
//!    `<path>/index.md` in that order
//! 2. HTML templates are rendered directly with the per-path [`RenderContext`]
//! 3. Markdown pages have their front matter extracted ([`front_matter`]),
//!    includes expanded, variables substituted, and the resulting HTML is
//!    rendered into the page's wrapper template
//!
//! The template engine sits behind [`TemplateEngine`]; [`MiniJinjaEngine`]
//! is the default implementation.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use tf_finder::{TemplateFinder, UrlPath};
//! use tf_loader::FsLoader;
//!
//! let finder = TemplateFinder::new(Arc::new(FsLoader::new(PathBuf::from("templates"))));
//! let (body, status) = finder.handle("/docs/install").unwrap();
//! ```

mod context;
mod engine;
mod error;
mod finder;
pub mod front_matter;
mod path;
mod resolver;

pub use context::RenderContext;
pub use engine::{EngineError, MiniJinjaEngine, TemplateEngine};
pub use error::FinderError;
pub use finder::{Dispatch, TemplateFinder, not_found_message};
pub use front_matter::{FrontMatter, FrontMatterDocument, FrontMatterError};
pub use path::{TemplateKind, TemplateRef, UrlPath};
pub use resolver::{PathResolver, template_exists};
