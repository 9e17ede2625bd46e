//! Template source loading for templatefinder.
//!
//! This crate provides the [`TemplateLoader`] trait: the one question the
//! request pipeline asks of its template storage is "give me the raw text of
//! the template at this logical path". A missing template is reported as
//! [`LoaderErrorKind::NotFound`]; every other failure is infrastructure.
//!
//! # Logical Paths
//!
//! Template names are slash-separated paths relative to the template root:
//! - `"index.html"` - root page
//! - `"guide.md"` - standalone markdown page
//! - `"docs/index.html"` - directory index
//!
//! # Backends
//!
//! - [`FsLoader`] reads templates from a directory on disk
//! - [`MockLoader`] keeps templates in memory (behind `mock` feature flag)

mod fs;
mod loader;
#[cfg(feature = "mock")]
mod mock;

pub use fs::FsLoader;
pub use loader::{LoaderError, LoaderErrorKind, TemplateLoader};
#[cfg(feature = "mock")]
pub use mock::MockLoader;
