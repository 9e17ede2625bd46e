//! HTTP server for templatefinder.
//!
//! Serves every page of a template root from two routes, `/` and
//! `/{*path}`, without a handler per page. Request paths are resolved and
//! rendered by [`tf_finder::TemplateFinder`].
//!
//! | Outcome                  | Response                                        |
//! |--------------------------|-------------------------------------------------|
//! | Page rendered            | `200`, `text/html; charset=utf-8`               |
//! | No page at path          | `404`, `Can't find page for: <path>`            |
//! | Template root unreadable | `500`, details logged                           |
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use tf_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 8000,
//!         template_dir: PathBuf::from("templates"),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use tf_finder::TemplateFinder;
use tf_loader::FsLoader;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Template root directory.
    pub template_dir: PathBuf,
}

impl From<&tf_config::Config> for ServerConfig {
    fn from(config: &tf_config::Config) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            template_dir: config.templates_resolved.root_dir.clone(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !config.template_dir.is_dir() {
        tracing::warn!(
            template_dir = %config.template_dir.display(),
            "Template directory does not exist, every request will 404"
        );
    }

    let loader = Arc::new(FsLoader::new(config.template_dir.clone()));
    let state = Arc::new(AppState {
        finder: TemplateFinder::new(loader),
    });
    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, template_dir = %config.template_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
