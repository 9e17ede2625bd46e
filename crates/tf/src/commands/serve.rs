//! `tf serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use tf_config::{CliSettings, Config};
use tf_server::{ServerConfig, run_server};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover templatefinder.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template root directory (overrides config).
    #[arg(short, long)]
    template_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            template_dir: self.template_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Template directory: {}",
            config.templates_resolved.root_dir.display()
        ));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config file: {}", path.display()));
        }

        run_server(ServerConfig::from(&config))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
