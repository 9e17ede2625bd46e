//! Filesystem template loader.
//!
//! Provides [`FsLoader`] for reading templates from a template root directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::loader::{LoaderError, TemplateLoader};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem template loader.
///
/// Maps logical template names onto files beneath `root_dir`. Every call goes
/// to disk; nothing is cached between calls.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use tf_loader::{FsLoader, TemplateLoader};
///
/// let loader = FsLoader::new(PathBuf::from("templates"));
/// let source = loader.get_source("index.html");
/// ```
#[derive(Debug, Clone)]
pub struct FsLoader {
    /// Root directory for template storage.
    root_dir: PathBuf,
}

impl FsLoader {
    /// Create a new filesystem loader rooted at `root_dir`.
    #[must_use]
    pub fn new(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }

    /// Resolve a logical name to a file path under the root.
    ///
    /// Names with parent directory components (`..`) or absolute names are
    /// rejected, since they would escape the template root.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let escapes = Path::new(name).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes {
            return None;
        }
        Some(self.root_dir.join(name))
    }
}

impl TemplateLoader for FsLoader {
    fn get_source(&self, name: &str) -> Result<String, LoaderError> {
        let Some(path) = self.resolve(name) else {
            tracing::debug!(name, "Rejected template name outside the template root");
            return Err(LoaderError::not_found(name).with_backend(BACKEND));
        };

        // Directories are not templates
        if !path.is_file() {
            return Err(LoaderError::not_found(name).with_backend(BACKEND));
        }

        fs::read_to_string(&path).map_err(|e| LoaderError::io(e, Some(path)).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoaderErrorKind;

    fn create_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>TEST</h1>").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/index.html"), "<h1>NESTED HTML</h1>").unwrap();
        dir
    }

    #[test]
    fn test_get_source_reads_file() {
        let root = create_root();
        let loader = FsLoader::new(root.path().to_path_buf());

        assert_eq!(loader.get_source("index.html").unwrap(), "<h1>TEST</h1>");
        assert_eq!(
            loader.get_source("nested/index.html").unwrap(),
            "<h1>NESTED HTML</h1>"
        );
    }

    #[test]
    fn test_get_source_missing_is_not_found() {
        let root = create_root();
        let loader = FsLoader::new(root.path().to_path_buf());

        let err = loader.get_source("missing.html").unwrap_err();

        assert_eq!(err.kind, LoaderErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_get_source_directory_is_not_found() {
        let root = create_root();
        let loader = FsLoader::new(root.path().to_path_buf());

        let err = loader.get_source("nested").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_source_rejects_parent_dir() {
        let root = create_root();
        let loader = FsLoader::new(root.path().join("nested"));

        let err = loader.get_source("../index.html").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_source_rejects_absolute_name() {
        let root = create_root();
        let loader = FsLoader::new(root.path().join("nested"));
        let absolute = root.path().join("index.html");

        let err = loader.get_source(&absolute.to_string_lossy()).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let loader = FsLoader::new(PathBuf::from("/nonexistent/templates"));

        assert!(loader.get_source("index.html").unwrap_err().is_not_found());
    }
}
