//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tf_finder::{FinderError, UrlPath, not_found_message};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No page at the given path.
    #[error("Page not found: {0}")]
    PageNotFound(UrlPath),

    /// Resolving or rendering the page failed.
    #[error(transparent)]
    Finder(#[from] FinderError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::PageNotFound(path) => {
                (StatusCode::NOT_FOUND, not_found_message(path)).into_response()
            }
            Self::Finder(e) => {
                tracing::error!(error = %e, "Page rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
