//! Page endpoint.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use tf_finder::{Dispatch, UrlPath};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET / (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    render_page(&state, "")
}

/// Handle GET /{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    render_page(&state, &path)
}

fn render_page(state: &AppState, raw_path: &str) -> Result<Html<String>, ServerError> {
    let path = UrlPath::new(raw_path);
    match state.finder.dispatch(&path)? {
        Dispatch::Page(body) => Ok(Html(body)),
        Dispatch::NotFound => {
            tracing::debug!(path = %path, "No page found");
            Err(ServerError::PageNotFound(path))
        }
    }
}
