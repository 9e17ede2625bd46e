//! `tf sitemap` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tf_config::Config;
use tf_sitemap::{Scanner, SitemapNode};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sitemap command.
#[derive(Args)]
pub(crate) struct SitemapArgs {
    /// Directory to scan (default: configured template directory).
    dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover templatefinder.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SitemapArgs {
    /// Execute the sitemap command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the directory cannot be
    /// scanned, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let tree = self.build()?;
        let json = serde_json::to_string_pretty(&tree)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{json}\n"))?;
                Output::new().success(&format!("Sitemap written to {}", path.display()));
            }
            None => writeln!(std::io::stdout().lock(), "{json}")?,
        }

        Ok(())
    }

    fn build(&self) -> Result<SitemapNode, CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let dir = self
            .dir
            .clone()
            .unwrap_or_else(|| config.templates_resolved.root_dir.clone());

        tracing::info!(dir = %dir.display(), "Scanning templates");
        let scanner = Scanner::new(&dir)?.with_base_templates(&config.sitemap.base_templates);
        Ok(scanner.scan()?)
    }
}
