//! `docview serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use docview_config::{CliSettings, Config, RoutingSetting};
use docview_server::{ServerConfig, run_server};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover docview.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bundle directory (overrides config).
    #[arg(short, long, env = "DOCVIEW_BUNDLE_DIR")]
    bundle_dir: Option<PathBuf>,

    /// Routing mode for sidebar links: auto, hash or path (overrides config).
    #[arg(short, long)]
    mode: Option<RoutingSetting>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            bundle_dir: self.bundle_dir,
            routing: self.mode,
            host: self.host,
            port: self.port,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let server_config = ServerConfig::from_config(&config)?;

        output.info(&format!(
            "Starting server on {}:{}",
            server_config.host, server_config.port
        ));
        output.info(&format!(
            "Bundle directory: {}",
            server_config.bundle_dir.display()
        ));
        output.info(&format!("Routing mode: {}", server_config.routing));

        run_server(server_config).await?;
        Ok(())
    }
}
