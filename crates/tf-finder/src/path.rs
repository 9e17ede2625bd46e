//! URL paths and template references.

use std::fmt;

use serde::Deserialize;

/// Request path with leading, trailing and repeated slashes removed.
///
/// `""` is the site root. Segments are joined with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UrlPath(String);

impl UrlPath {
    /// Normalize a raw request path (e.g., `"/docs/install/"` becomes `"docs/install"`).
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        Self(segments.join("/"))
    }

    /// Normalized path without leading slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments in order. The root path yields a single empty segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Whether any segment marks a partial (leading `_`).
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.segments().any(|segment| segment.starts_with('_'))
    }

    /// Whether this is the site root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for UrlPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of template, derived from its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// `.html` template, rendered directly.
    Html,
    /// `.md` page, rendered through its wrapper template.
    Markdown,
}

/// Logical path of a template within the template root.
///
/// Existence is not implied; see [`template_exists`](crate::template_exists).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TemplateRef {
    name: String,
}

impl TemplateRef {
    /// Create a reference to the template at `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Logical template path.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template kind, or `None` for suffixes other than `.html` and `.md`.
    #[must_use]
    pub fn kind(&self) -> Option<TemplateKind> {
        if self.name.ends_with(".md") {
            Some(TemplateKind::Markdown)
        } else if self.name.ends_with(".html") {
            Some(TemplateKind::Html)
        } else {
            None
        }
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
