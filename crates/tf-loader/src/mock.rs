//! Mock loader implementation for testing.
//!
//! Provides [`MockLoader`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};

use crate::loader::{LoaderError, LoaderErrorKind, TemplateLoader};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock loader for testing.
///
/// Stores templates in memory. Use the builder methods to configure the mock
/// with test data.
///
/// # Example
///
/// ```
/// use tf_loader::{MockLoader, TemplateLoader};
///
/// let loader = MockLoader::new()
///     .with_template("index.html", "<h1>Home</h1>")
///     .with_failure("broken.html");
///
/// assert_eq!(loader.get_source("index.html").unwrap(), "<h1>Home</h1>");
/// assert!(loader.get_source("missing.html").unwrap_err().is_not_found());
/// assert!(!loader.get_source("broken.html").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Default)]
pub struct MockLoader {
    templates: HashMap<String, String>,
    failures: HashSet<String>,
}

impl MockLoader {
    /// Create a new empty mock loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template with the given logical path and source.
    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(name.into(), source.into());
        self
    }

    /// Make reads of `name` fail with a non-"not found" error.
    #[must_use]
    pub fn with_failure(mut self, name: impl Into<String>) -> Self {
        self.failures.insert(name.into());
        self
    }
}

impl TemplateLoader for MockLoader {
    fn get_source(&self, name: &str) -> Result<String, LoaderError> {
        if self.failures.contains(name) {
            return Err(LoaderError::new(LoaderErrorKind::Other)
                .with_path(name)
                .with_backend(BACKEND));
        }

        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| LoaderError::not_found(name).with_backend(BACKEND))
    }
}
