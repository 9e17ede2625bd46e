//! templatefinder CLI.
//!
//! Provides commands for:
//! - `serve`: Serve a template directory, one page per template
//! - `sitemap`: Print the sitemap of a template directory as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ServeArgs, SitemapArgs};
use error::CliError;
use output::Output;

/// templatefinder - serve templates by URL path.
#[derive(Parser)]
#[command(name = "tf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the page server.
    Serve(ServeArgs),
    /// Build a sitemap from a template directory.
    Sitemap(SitemapArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Serve(args) => args.verbose,
            Self::Sitemap(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute())),
        Commands::Sitemap(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["tf", "serve", "--port", "9000", "--verbose"]).unwrap();

        assert!(cli.command.verbose());
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_parse_sitemap() {
        let cli = Cli::try_parse_from(["tf", "sitemap", "site/templates", "-o", "sitemap.json"])
            .unwrap();

        assert!(!cli.command.verbose());
        assert!(matches!(cli.command, Commands::Sitemap(_)));
    }
}
