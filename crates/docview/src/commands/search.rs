//! `docview search` command implementation.

use std::path::PathBuf;

use clap::Args;
use docview_config::RoutingMode;
use docview_site::SearchResults;

use super::{load_config, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Search text (case-insensitive substring of title or description).
    query: String,

    /// Path to configuration file (default: auto-discover docview.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bundle directory (overrides config).
    #[arg(short, long, env = "DOCVIEW_BUNDLE_DIR")]
    bundle_dir: Option<PathBuf>,
}

impl SearchArgs {
    /// Execute the search command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails to load.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = load_config(self.config.as_deref(), self.bundle_dir, None)?;
        let site = load_site(&config, RoutingMode::Hash)?;

        match site.search(&self.query) {
            SearchResults::Hidden => output.warning("Empty query"),
            SearchResults::NoResults { query } => {
                output.warning(&format!("No results for {query:?}"));
            }
            SearchResults::Matches { entries, .. } => {
                for entry in &entries {
                    output.data(&format!("{}\t{}", entry.slug, entry.title));
                    if !entry.desc.is_empty() {
                        output.detail(&format!("    {}", entry.desc));
                    }
                }
                output.success(&format!("{} result(s)", entries.len()));
            }
        }
        Ok(())
    }
}
