//! Sitemap discovery by walking a template tree.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::lines::{self, is_template};
use crate::node::SitemapNode;

/// Layout templates every page ultimately extends, relative to the scan root.
pub const DEFAULT_BASE_TEMPLATES: [&str; 2] = ["base.html", "base_no_nav.html"];

/// Longest `{% extends %}` chain followed before giving up.
pub const MAX_EXTENDS_DEPTH: usize = 32;

const INDEX_FILE: &str = "index.html";

/// Error type for sitemap scanning.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// The scan root is missing or not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Reading a directory or file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SitemapError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Builds a [`SitemapNode`] tree from a directory of Jinja templates.
///
/// A file is a page when it is not a layout template (see
/// [`is_template`](crate::is_template)) and either extends the same template
/// as its directory's `index.html` or transitively extends a base template.
/// Directories absorb the metadata of their `index.html`; directories with
/// neither a title nor child pages are dropped.
///
/// Node names are paths starting at the scan root's own directory name, e.g.
/// `templates/about/team` for `templates/about/team.html`.
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    label: String,
    base_paths: Vec<PathBuf>,
}

impl Scanner {
    /// Create a scanner rooted at `root` using [`DEFAULT_BASE_TEMPLATES`].
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist or is not a directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SitemapError> {
        let root = root.as_ref();
        let root = fs::canonicalize(root).map_err(|e| SitemapError::io(root, e))?;
        if !root.is_dir() {
            return Err(SitemapError::NotADirectory(root));
        }
        let label = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let scanner = Self {
            root,
            label,
            base_paths: Vec::new(),
        };
        Ok(scanner.with_base_templates(DEFAULT_BASE_TEMPLATES))
    }

    /// Replace the base templates.
    ///
    /// Names are resolved like `{% extends %}` targets, so both `base.html`
    /// and `templates/base.html` name `base.html` in a root called `templates`.
    #[must_use]
    pub fn with_base_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.base_paths = templates
            .into_iter()
            .map(|name| self.resolve_extends(name.as_ref()))
            .collect();
        self
    }

    /// Canonical scan root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the whole tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed or a page cannot be
    /// read. Files that are not valid UTF-8 are skipped.
    pub fn scan(&self) -> Result<SitemapNode, SitemapError> {
        tracing::debug!(root = %self.root.display(), "Scanning template tree");
        self.scan_directory(&self.root)
    }

    /// Filesystem path of an `{% extends %}` target.
    ///
    /// Targets are relative to the scan root, except that a target starting
    /// with the root's own directory name is taken relative to its parent.
    /// Absolute targets are used as given.
    #[must_use]
    pub fn resolve_extends(&self, target: &str) -> PathBuf {
        let target = Path::new(target);
        if target.is_absolute() {
            return target.to_path_buf();
        }
        match target.components().next() {
            Some(Component::Normal(first)) if first == OsStr::new(&self.label) => self
                .root
                .parent()
                .unwrap_or(&self.root)
                .join(target),
            _ => self.root.join(target),
        }
    }

    /// Whether `path` is one of the base templates.
    #[must_use]
    pub fn is_base_template(&self, path: &Path) -> bool {
        self.base_paths.iter().any(|base| base == path)
    }

    /// Whether the template at `path` reaches a base template through its
    /// chain of `{% extends %}` tags.
    ///
    /// Missing targets, templates that extend nothing, circular chains and
    /// chains longer than [`MAX_EXTENDS_DEPTH`] all yield `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if a template in the chain exists but cannot be read.
    pub fn extends_base(&self, path: &Path) -> Result<bool, SitemapError> {
        let mut visited = HashSet::new();
        let mut current = path.to_path_buf();

        for _ in 0..MAX_EXTENDS_DEPTH {
            if !visited.insert(current.clone()) {
                tracing::warn!(path = %path.display(), at = %current.display(), "Circular extends chain");
                return Ok(false);
            }
            if !current.is_file() {
                return Ok(false);
            }
            let Some(source) = read_source(&current)? else {
                return Ok(false);
            };
            let Some(target) = lines::extended_path(source.lines()) else {
                return Ok(false);
            };

            let next = self.resolve_extends(target);
            if self.is_base_template(&next) {
                return Ok(true);
            }
            current = next;
        }

        tracing::warn!(path = %path.display(), "Extends chain too deep");
        Ok(false)
    }

    /// Whether the file at `path` with `source` is a page.
    ///
    /// `extended` is the template extended by the directory's `index.html`.
    ///
    /// # Errors
    ///
    /// Same as [`extends_base`](Self::extends_base).
    pub fn is_valid_page(
        &self,
        path: &Path,
        source: &str,
        extended: Option<&str>,
    ) -> Result<bool, SitemapError> {
        let file_name = path
            .file_name()
            .map(OsStr::to_string_lossy)
            .unwrap_or_default();
        if is_template(&file_name) {
            return Ok(false);
        }
        if let Some(extended) = extended
            && lines::extends_targets(source.lines()).any(|target| target == extended)
        {
            return Ok(true);
        }
        self.extends_base(path)
    }

    fn scan_directory(&self, dir: &Path) -> Result<SitemapNode, SitemapError> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut node = SitemapNode::directory(name);

        let mut extended = None;
        let index_path = dir.join(INDEX_FILE);
        let index_source = if index_path.is_file() {
            read_source(&index_path)?
        } else {
            None
        };
        if let Some(source) = &index_source {
            extended = lines::extended_path(source.lines());
            if self.is_valid_page(&index_path, source, extended)? {
                node.absorb(SitemapNode::page(
                    self.display_name(dir),
                    lines::scrape_tags(source.lines()),
                ));
            }
        }

        let entries = fs::read_dir(dir).map_err(|e| SitemapError::io(dir, e))?;
        let mut entries: Vec<_> = collect_entries(dir, entries)?
            .into_iter()
            .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
            .map(|e| (e.file_name(), e.path(), e.file_type()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (file_name, path, file_type) in entries {
            let file_type = match file_type {
                Ok(file_type) => file_type,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Skipping entry with unknown file type"
                    );
                    continue;
                }
            };

            if file_type.is_dir() {
                let child = self.scan_directory(&path)?;
                if child.is_worth_listing() {
                    node.children.push(child);
                }
            } else if file_type.is_file() && file_name != INDEX_FILE {
                let Some(source) = read_source(&path)? else {
                    continue;
                };
                if self.is_valid_page(&path, &source, extended)? {
                    let name = self.display_name(&path);
                    let name = name.strip_suffix(".html").unwrap_or(&name);
                    node.children
                        .push(SitemapNode::page(name, lines::scrape_tags(source.lines())));
                }
            }
        }

        Ok(node)
    }

    /// Slash-separated path of `path`, starting at the root's directory name.
    fn display_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let mut parts: Vec<String> = Vec::new();
        if !self.label.is_empty() {
            parts.push(self.label.clone());
        }
        parts.extend(
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        );
        parts.join("/")
    }
}

/// Collect directory entries, failing on the first one that cannot be read.
fn collect_entries<T>(
    dir: &Path,
    entries: impl IntoIterator<Item = io::Result<T>>,
) -> Result<Vec<T>, SitemapError> {
    entries
        .into_iter()
        .map(|entry| entry.map_err(|e| SitemapError::io(dir, e)))
        .collect()
}

/// Read a template, or `None` if it is missing or not UTF-8.
fn read_source(path: &Path) -> Result<Option<String>, SitemapError> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            tracing::warn!(path = %path.display(), "Skipping file that is not valid UTF-8");
            Ok(None)
        }
        Err(e) => Err(SitemapError::io(path, e)),
    }
}
