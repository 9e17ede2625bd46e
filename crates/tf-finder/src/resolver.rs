//! Template existence probing and path resolution.

use std::sync::Arc;

use tf_loader::{LoaderError, TemplateLoader};

use crate::path::{TemplateRef, UrlPath};

/// Check whether a template exists at `name`.
///
/// A "not found" answer from the loader becomes `Ok(false)`.
///
/// # Errors
///
/// Any other loader failure is returned unchanged: it points at a broken
/// template root, not at a routing decision.
pub fn template_exists(loader: &dyn TemplateLoader, name: &str) -> Result<bool, LoaderError> {
    match loader.get_source(name) {
        Ok(_) => Ok(true),
        Err(err) if err.is_not_found() => Ok(false),
        Err(err) => Err(err),
    }
}

/// Maps URL paths to the best matching template.
pub struct PathResolver {
    loader: Arc<dyn TemplateLoader>,
}

impl PathResolver {
    /// Create a resolver probing templates through `loader`.
    #[must_use]
    pub fn new(loader: Arc<dyn TemplateLoader>) -> Self {
        Self { loader }
    }

    /// Candidate templates for `path`, in precedence order.
    ///
    /// An HTML file masks a markdown file of the same name, and a literal
    /// page masks its own `index` variant.
    #[must_use]
    pub fn candidates(path: &UrlPath) -> [TemplateRef; 4] {
        let base = path.as_str();
        let index = |file: &str| {
            if path.is_root() {
                file.to_owned()
            } else {
                format!("{base}/{file}")
            }
        };

        [
            TemplateRef::new(format!("{base}.html")),
            TemplateRef::new(index("index.html")),
            TemplateRef::new(format!("{base}.md")),
            TemplateRef::new(index("index.md")),
        ]
    }

    /// Resolve `path` to the first existing candidate template.
    ///
    /// Returns `Ok(None)` when nothing matches or when the path addresses a
    /// partial (any segment starting with `_`), whether or not a file exists.
    ///
    /// # Errors
    ///
    /// Returns the loader error if probing fails for a reason other than
    /// "not found".
    pub fn resolve(&self, path: &UrlPath) -> Result<Option<TemplateRef>, LoaderError> {
        if path.is_partial() {
            tracing::debug!(path = %path, "Refusing to resolve partial");
            return Ok(None);
        }

        for candidate in Self::candidates(path) {
            if template_exists(self.loader.as_ref(), candidate.name())? {
                tracing::debug!(path = %path, template = %candidate, "Resolved template");
                return Ok(Some(candidate));
            }
        }

        tracing::debug!(path = %path, "No template matches");
        Ok(None)
    }
}
