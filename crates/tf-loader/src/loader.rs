//! Loader trait and error types.
//!
//! Provides the core [`TemplateLoader`] trait along with [`LoaderError`] for
//! unified error handling across backends.

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum LoaderErrorKind {
    /// No template exists at the requested path.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Other/unknown error category.
    Other,
}

/// Loader error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct LoaderError {
    /// Semantic error category.
    pub kind: LoaderErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl LoaderError {
    /// Create a new loader error.
    #[must_use]
    pub fn new(kind: LoaderErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(LoaderErrorKind::NotFound).with_path(path)
    }

    /// Whether this error means "no template here" rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == LoaderErrorKind::NotFound
    }

    /// Create a loader error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => LoaderErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => LoaderErrorKind::PermissionDenied,
            _ => LoaderErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            LoaderErrorKind::NotFound => "Template not found",
            LoaderErrorKind::PermissionDenied => "Permission denied",
            LoaderErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Source of raw template text, addressed by logical path.
///
/// Implementations must be safe to share across request handlers.
pub trait TemplateLoader: Send + Sync {
    /// Read the raw source of the template at `name`.
    ///
    /// # Arguments
    ///
    /// * `name` - Logical template path (e.g., "index.html", "docs/guide.md")
    ///
    /// # Errors
    ///
    /// Returns [`LoaderErrorKind::NotFound`] if no template exists at `name`,
    /// or another kind if the template exists but cannot be read.
    fn get_source(&self, name: &str) -> Result<String, LoaderError>;
}
