//! Application state.

use tf_finder::TemplateFinder;

/// Application state shared across all request handlers.
pub(crate) struct AppState {
    /// Resolves and renders request paths.
    pub(crate) finder: TemplateFinder,
}
